//! Splits the tail of a face command line into positionals and options.
//!
//! Parsing is driven by the resolved action's option declarations: options
//! with a placeholder consume a value (`--version 1.0` or `--version=1.0`),
//! the rest are flags. `--` ends option parsing.

use crate::action::{Action, Options};
use crate::error::{FaceError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub positionals: Vec<String>,
    pub options: Options,
}

pub fn parse_action_args(action: &Action, tokens: &[String]) -> Result<ParsedArgs> {
    let mut parsed = ParsedArgs::default();
    let mut tokens = tokens.iter();

    while let Some(token) = tokens.next() {
        if token == "--" {
            parsed.positionals.extend(tokens.by_ref().cloned());
            break;
        }
        let Some(flag) = token.strip_prefix("--") else {
            parsed.positionals.push(token.clone());
            continue;
        };

        let (raw_name, inline_value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };
        let option = action
            .find_option(raw_name)
            .ok_or_else(|| FaceError::UnknownOption {
                action: action.name().to_string(),
                option: raw_name.to_string(),
            })?;

        let value = match (option.takes_value(), inline_value) {
            (true, Some(value)) => value,
            (true, None) => tokens.next().cloned().ok_or_else(|| {
                FaceError::argument(format!("{} requires a value", option.usage()))
            })?,
            (false, Some(_)) => {
                return Err(FaceError::argument(format!(
                    "--{} does not take a value",
                    option.name().flag()
                )));
            }
            (false, None) => "true".to_string(),
        };
        parsed.options.insert(option.name().to_string(), value);
    }

    Ok(parsed)
}
