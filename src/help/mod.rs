//! The help face.
//!
//! `help` with no arguments lists every documented command-line face and
//! every legacy subcommand; with a subcommand it renders that face's help or
//! the legacy command's embedded documentation; with a subcommand and an
//! action it renders the action's detail. The `version` option selects the
//! face version and accepts every spelling of `current`.

pub mod render;

use crate::action::{Action, ActionCall, ActionOption, Arity, Options};
use crate::dispatch::{CommandTarget, Dispatcher};
use crate::error::{FaceError, Result};
use crate::face::Face;
use crate::legacy::{LegacyCommand, LegacyDoc};
use crate::name::Name;
use crate::version::VersionToken;
use render::{Listing, ListingEntry};
use tracing::{debug, warn};

pub const HELP_FACE: &str = "help";
pub const HELP_FACE_VERSION: &str = "0.0.1";

/// Listing summary for a legacy command whose documentation cannot be read.
pub const UNAVAILABLE_SUMMARY: &str = "(help unavailable)";

const LEGACY_TAKES_NO_ACTIONS: &str = "Legacy subcommands don't take actions";

pub fn help_face() -> Result<Face> {
    let action = Action::new(HELP_FACE, |call: &ActionCall<'_>| {
        help(call.dispatcher, call.args, call.options)
    })?
    .summary("Display help about subcommands and their actions.")
    .description(
        "Shows the list of available subcommands when called alone, the actions of a\n\
         subcommand when given its name, and the detail of one action when given a\n\
         subcommand and an action. Legacy subcommands show their embedded manual.",
    )
    .arguments("[<subcommand>] [<action>]")
    .arity(Arity::range(0, 2))
    .returns("Help text for the requested subcommand or action.")
    .examples(
        "List every subcommand:\n\n    $ faceplate help\n\n\
         Show the detail of the help action itself:\n\n    $ faceplate help help help",
    )
    .option(
        ActionOption::new("version")?
            .value("VERSION")
            .summary("Version of the subcommand to describe; defaults to 'current'."),
    )
    .option(
        ActionOption::new("render-as")?
            .value("FORMAT")
            .summary("Output format: 'console' (default) or 'json'."),
    )
    .default_action();

    Face::builder(HELP_FACE, HELP_FACE_VERSION)?
        .summary("Display help about subcommands and their actions.")
        .description("Renders documentation for faces and legacy subcommands.")
        .copyright("Faceplate contributors", "2011")
        .license("Apache-2.0")
        .action(action)
        .build()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Console,
    Json,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Console => "console",
            RenderFormat::Json => "json",
        }
    }
}

impl TryFrom<&str> for RenderFormat {
    type Error = FaceError;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(RenderFormat::Console),
            "json" => Ok(RenderFormat::Json),
            other => Err(FaceError::argument(format!(
                "unsupported render format '{other}'; expected console or json"
            ))),
        }
    }
}

/// Options of the help action after normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpRequest {
    pub version: VersionToken,
    pub format: RenderFormat,
}

impl HelpRequest {
    pub fn from_options(options: &Options) -> Result<Self> {
        let mut request = HelpRequest::default();
        for (key, value) in options {
            let unknown = || FaceError::UnknownOption {
                action: HELP_FACE.to_string(),
                option: key.clone(),
            };
            let name = Name::parse(key).map_err(|_| unknown())?;
            match name.as_str() {
                "version" => request.version = VersionToken::parse(value)?,
                "render_as" => request.format = RenderFormat::try_from(value.as_str())?,
                _ => return Err(unknown()),
            }
        }
        Ok(request)
    }
}

/// Render help for zero, one or two positional arguments.
pub fn help(dispatcher: &Dispatcher, args: &[String], options: &Options) -> Result<String> {
    if args.len() > 2 {
        return Err(too_many_arguments(args.len()));
    }
    let request = HelpRequest::from_options(options)?;
    let program = dispatcher.program();
    debug!(
        args = args.len(),
        version = %request.version,
        format = request.format.as_str(),
        "rendering help"
    );

    match args {
        [] => render::listing(program, &listing(dispatcher), request.format),
        [name] => match dispatcher.target(name, &request.version)? {
            CommandTarget::Face(face) => render::face(program, face, request.format),
            CommandTarget::Legacy(command) => legacy_help(dispatcher, &command, request.format),
        },
        [name, action] => match dispatcher.target(name, &request.version)? {
            CommandTarget::Face(face) => {
                let action = face
                    .get_action(action)
                    .ok_or_else(|| FaceError::ActionNotFound {
                        face: face.name().to_string(),
                        action: action.clone(),
                    })?;
                render::action(program, face, action, request.format)
            }
            CommandTarget::Legacy(_) => Err(FaceError::argument(LEGACY_TAKES_NO_ACTIONS)),
        },
        _ => Err(too_many_arguments(args.len())),
    }
}

/// Documented command-line faces and legacy subcommands, each sorted.
///
/// A legacy command whose documentation cannot be read is still listed,
/// with a stub summary.
pub fn listing(dispatcher: &Dispatcher) -> Listing {
    let registry = dispatcher.registry();
    let faces = registry
        .names()
        .filter(|name| registry.is_face_app(name.as_str()))
        .filter(|name| !registry.exclude_from_docs(name.as_str()))
        .filter_map(|name| registry.current(name.as_str()))
        .map(|face| ListingEntry {
            name: face.name().to_string(),
            summary: face.summary().map(str::to_string),
        })
        .collect();

    let legacy = dispatcher
        .legacy_applications()
        .into_iter()
        .map(|name| {
            let summary = listing_summary(&name, dispatcher.legacy().documentation(&name));
            ListingEntry { name, summary }
        })
        .collect();

    Listing { faces, legacy }
}

// One unreadable legacy command must not take the listing down with it.
fn listing_summary(name: &str, doc: Result<LegacyDoc>) -> Option<String> {
    match doc {
        Ok(doc) => doc.summary,
        Err(err) => {
            warn!(subcommand = %name, error = %err, "legacy documentation unavailable");
            Some(UNAVAILABLE_SUMMARY.to_string())
        }
    }
}

fn legacy_help(
    dispatcher: &Dispatcher,
    command: &LegacyCommand,
    format: RenderFormat,
) -> Result<String> {
    let doc = dispatcher.legacy().documentation(&command.name)?;
    render::legacy(dispatcher.program(), &doc, format)
}

fn too_many_arguments(count: usize) -> FaceError {
    FaceError::argument(format!(
        "help takes at most a subcommand and an action ({count} arguments given)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::LegacyBridge;

    fn dispatcher() -> Dispatcher {
        Dispatcher::with_builtin_faces(LegacyBridge::new("faceplate", Vec::new())).unwrap()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn help_face_declares_default_help_action() {
        let face = help_face().unwrap();
        let action = face.get_action("help").unwrap();
        assert!(action.is_default());
        assert_eq!(face.default_action().unwrap().name().as_str(), "help");
        assert_eq!(face.version().to_string(), HELP_FACE_VERSION);
    }

    #[test]
    fn accepts_zero_one_and_two_arguments() {
        let dispatcher = dispatcher();
        let options = Options::new();
        assert!(help(&dispatcher, &[], &options).is_ok());
        assert!(help(&dispatcher, &args(&[":help"]), &options).is_ok());
        assert!(help(&dispatcher, &args(&["help", "help"]), &options).is_ok());
    }

    #[test]
    fn three_arguments_always_fail() {
        let dispatcher = dispatcher();
        let err = help(
            &dispatcher,
            &args(&["help", "help", "for_the_love_of_god"]),
            &Options::new(),
        )
        .unwrap_err();
        assert!(err.is_argument_error(), "{err}");

        let err = help(&dispatcher, &args(&["nope", "nope", "nope"]), &Options::new()).unwrap_err();
        assert!(err.is_argument_error(), "{err}");
    }

    #[test]
    fn options_are_validated() {
        let mut options = Options::new();
        options.insert("render-as".to_string(), "yaml".to_string());
        assert!(HelpRequest::from_options(&options).unwrap_err().is_argument_error());

        let mut options = Options::new();
        options.insert("colour".to_string(), "always".to_string());
        assert!(matches!(
            HelpRequest::from_options(&options),
            Err(FaceError::UnknownOption { .. })
        ));

        let mut options = Options::new();
        options.insert("version".to_string(), ":current".to_string());
        options.insert("render_as".to_string(), "JSON".to_string());
        let request = HelpRequest::from_options(&options).unwrap();
        assert_eq!(request.version, VersionToken::Current);
        assert_eq!(request.format, RenderFormat::Json);
    }

    #[test]
    fn unreadable_legacy_docs_get_a_stub_summary() {
        let err = FaceError::LegacyHelpUnavailable {
            name: "broken".to_string(),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            listing_summary("broken", Err(err)).as_deref(),
            Some(UNAVAILABLE_SUMMARY)
        );

        let doc = LegacyDoc {
            name: "agent".to_string(),
            summary: None,
            help: "faceplate-agent\n".to_string(),
        };
        assert_eq!(listing_summary("agent", Ok(doc)), None);
    }

    #[test]
    fn unknown_action_is_reported() {
        let err = help(&dispatcher(), &args(&["help", "nope"]), &Options::new()).unwrap_err();
        assert!(matches!(err, FaceError::ActionNotFound { .. }), "{err}");
    }
}
