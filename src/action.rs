//! Actions, their declared arity and option allow-lists.
//!
//! An action's business logic is an opaque handler; this module only owns
//! the contract around it: how many positionals it takes, which named
//! options it recognizes, and the documentation the help face renders.

use crate::dispatch::Dispatcher;
use crate::error::{FaceError, Result};
use crate::face::Face;
use crate::name::Name;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Named options keyed by their normalized name. Flags carry `"true"`.
pub type Options = BTreeMap<String, String>;

pub type ActionHandler = Arc<dyn Fn(&ActionCall<'_>) -> Result<String> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Reject `count` positionals unless the arity admits them.
    pub fn check(&self, action: &Name, count: usize) -> Result<()> {
        if self.accepts(count) {
            return Ok(());
        }
        Err(FaceError::argument(format!(
            "wrong number of arguments for action '{action}' ({count} for {self})"
        )))
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity::exactly(0)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..{max}", self.min),
            None => write!(f, "{}+", self.min),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionOption {
    name: Name,
    /// Value placeholder; `None` marks a boolean flag.
    placeholder: Option<String>,
    summary: Option<String>,
}

impl ActionOption {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::parse(name)?,
            placeholder: None,
            summary: None,
        })
    }

    pub fn value(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn takes_value(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// `--render-as FORMAT` or `--verbose`.
    pub fn usage(&self) -> String {
        match &self.placeholder {
            Some(placeholder) => format!("--{} {placeholder}", self.name.flag()),
            None => format!("--{}", self.name.flag()),
        }
    }
}

/// Everything a handler sees for one invocation.
pub struct ActionCall<'a> {
    pub dispatcher: &'a Dispatcher,
    pub face: &'a Face,
    pub action: &'a Action,
    pub args: &'a [String],
    pub options: &'a Options,
}

impl ActionCall<'_> {
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

#[derive(Clone)]
pub struct Action {
    name: Name,
    summary: Option<String>,
    description: Option<String>,
    arguments: Option<String>,
    returns: Option<String>,
    examples: Option<String>,
    default: bool,
    arity: Arity,
    options: Vec<ActionOption>,
    handler: ActionHandler,
}

impl Action {
    pub fn new<F>(name: &str, handler: F) -> Result<Self>
    where
        F: Fn(&ActionCall<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Ok(Self {
            name: Name::parse(name)?,
            summary: None,
            description: None,
            arguments: None,
            returns: None,
            examples: None,
            default: false,
            arity: Arity::default(),
            options: Vec::new(),
            handler: Arc::new(handler),
        })
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Positional synopsis shown in help, e.g. `[<face>] [<action>]`.
    pub fn arguments(mut self, arguments: &str) -> Self {
        self.arguments = Some(arguments.to_string());
        self
    }

    pub fn returns(mut self, returns: &str) -> Self {
        self.returns = Some(returns.to_string());
        self
    }

    pub fn examples(mut self, examples: &str) -> Self {
        self.examples = Some(examples.to_string());
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn option(mut self, option: ActionOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn default_action(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn returns_text(&self) -> Option<&str> {
        self.returns.as_deref()
    }

    pub fn examples_text(&self) -> Option<&str> {
        self.examples.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn declared_arity(&self) -> Arity {
        self.arity
    }

    pub fn options(&self) -> &[ActionOption] {
        &self.options
    }

    pub fn find_option(&self, raw: &str) -> Option<&ActionOption> {
        let name = Name::parse(raw).ok()?;
        self.options.iter().find(|option| option.name == name)
    }

    /// Normalize option keys and reject anything outside the allow-list.
    pub fn check_options(&self, options: &Options) -> Result<Options> {
        let mut checked = Options::new();
        for (key, value) in options {
            let option = self
                .find_option(key)
                .ok_or_else(|| FaceError::UnknownOption {
                    action: self.name.to_string(),
                    option: key.trim_start_matches('-').to_string(),
                })?;
            checked.insert(option.name.to_string(), value.clone());
        }
        Ok(checked)
    }

    /// Positional synopsis, declared or derived from the arity.
    pub fn argument_usage(&self) -> Option<String> {
        if let Some(arguments) = &self.arguments {
            return Some(arguments.clone());
        }
        let required = (0..self.arity.min).map(|_| "<arg>".to_string());
        let optional: Vec<String> = match self.arity.max {
            Some(max) => (self.arity.min..max).map(|_| "[<arg>]".to_string()).collect(),
            None => vec!["[<arg> ...]".to_string()],
        };
        let words: Vec<String> = required.chain(optional).collect();
        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    }

    pub(crate) fn call(&self, call: &ActionCall<'_>) -> Result<String> {
        (self.handler)(call)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("arity", &self.arity)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// Handlers are opaque; two actions are the same definition when everything
// the registry and help can observe matches.
impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.summary == other.summary
            && self.description == other.description
            && self.arguments == other.arguments
            && self.returns == other.returns
            && self.examples == other.examples
            && self.default == other.default
            && self.arity == other.arity
            && self.options == other.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> impl Fn(&ActionCall<'_>) -> Result<String> + Send + Sync + 'static {
        |_call| Ok(String::new())
    }

    #[test]
    fn arity_rejects_extra_arguments() {
        let name = Name::parse("show").unwrap();
        let arity = Arity::range(0, 1);
        assert!(arity.check(&name, 0).is_ok());
        assert!(arity.check(&name, 1).is_ok());
        let err = arity.check(&name, 3).unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("3 for 0..1"), "{err}");
    }

    #[test]
    fn arity_enforces_minimum() {
        let name = Name::parse("find").unwrap();
        assert!(Arity::exactly(1).check(&name, 0).is_err());
        assert!(Arity::at_least(1).check(&name, 9).is_ok());
    }

    #[test]
    fn options_are_normalized_and_allow_listed() {
        let action = Action::new("help", noop())
            .unwrap()
            .option(ActionOption::new("render-as").unwrap().value("FORMAT"));

        let mut options = Options::new();
        options.insert("render-as".to_string(), "json".to_string());
        let checked = action.check_options(&options).unwrap();
        assert_eq!(checked.get("render_as").map(String::as_str), Some("json"));

        options.insert("colour".to_string(), "true".to_string());
        match action.check_options(&options) {
            Err(FaceError::UnknownOption { action, option }) => {
                assert_eq!(action, "help");
                assert_eq!(option, "colour");
            }
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn argument_usage_falls_back_to_arity() {
        let action = Action::new("list", noop()).unwrap().arity(Arity::range(1, 2));
        assert_eq!(action.argument_usage().as_deref(), Some("<arg> [<arg>]"));

        let action = Action::new("list", noop())
            .unwrap()
            .arguments("<term>")
            .arity(Arity::exactly(1));
        assert_eq!(action.argument_usage().as_deref(), Some("<term>"));

        let action = Action::new("list", noop()).unwrap();
        assert_eq!(action.argument_usage(), None);
    }

    #[test]
    fn equality_ignores_handlers() {
        let left = Action::new("list", noop()).unwrap().summary("List things.");
        let right = Action::new("list", |_call: &ActionCall<'_>| Ok("other".to_string()))
            .unwrap()
            .summary("List things.");
        assert_eq!(left, right);
        assert_ne!(left, right.clone().default_action());
    }
}
