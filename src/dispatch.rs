//! Command targets and dispatch.
//!
//! A subcommand name resolves to either a registered face or a legacy
//! executable. Faces win when both exist; legacy commands are consulted
//! only when no face answers to the name.

use crate::action::{Action, ActionCall, Options};
use crate::cli::parse_action_args;
use crate::config::Config;
use crate::error::{FaceError, Result};
use crate::face::Face;
use crate::help;
use crate::legacy::{LegacyBridge, LegacyCommand};
use crate::registry::FaceRegistry;
use crate::version::VersionToken;
use std::process::ExitStatus;
use tracing::debug;

#[derive(Debug)]
pub enum CommandTarget<'a> {
    Face(&'a Face),
    Legacy(LegacyCommand),
}

/// Result of running a command line.
#[derive(Debug)]
pub enum Outcome {
    /// A face action produced text for stdout.
    Rendered(String),
    /// A legacy executable ran to completion.
    Legacy(ExitStatus),
}

#[derive(Debug)]
pub struct Dispatcher {
    registry: FaceRegistry,
    legacy: LegacyBridge,
}

impl Dispatcher {
    pub fn new(registry: FaceRegistry, legacy: LegacyBridge) -> Self {
        Self { registry, legacy }
    }

    /// Dispatcher with the built-in faces registered.
    pub fn with_builtin_faces(legacy: LegacyBridge) -> Result<Self> {
        let mut registry = FaceRegistry::new();
        registry.register(help::help_face()?)?;
        Ok(Self::new(registry, legacy))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_builtin_faces(LegacyBridge::new(
            config.program.clone(),
            config.search_path.clone(),
        ))
    }

    pub fn registry(&self) -> &FaceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FaceRegistry {
        &mut self.registry
    }

    pub fn legacy(&self) -> &LegacyBridge {
        &self.legacy
    }

    /// Program name used in usage lines; also the legacy prefix.
    pub fn program(&self) -> &str {
        self.legacy.prefix()
    }

    /// Resolve a name to a face (any version token) or, failing that, a
    /// legacy command. A missing version of an existing face is an error and
    /// never falls through to the legacy bridge.
    ///
    /// An internal face only shadows a legacy command of the same name
    /// when there is no such command, the same rule `run` and the listing
    /// apply.
    pub fn target(&self, name: &str, token: &VersionToken) -> Result<CommandTarget<'_>> {
        match self.registry.lookup(name, token) {
            Ok(face) if !face.is_cli_app() => Ok(self
                .legacy
                .locate(name)
                .map_or(CommandTarget::Face(face), CommandTarget::Legacy)),
            Ok(face) => Ok(CommandTarget::Face(face)),
            Err(FaceError::FaceNotFound { .. }) => self
                .legacy
                .locate(name)
                .map(CommandTarget::Legacy)
                .ok_or_else(|| FaceError::FaceNotFound {
                    name: name.to_string(),
                }),
            Err(err) => Err(err),
        }
    }

    /// Legacy subcommand names that are not shadowed by a command-line face
    /// or hidden from the docs, sorted.
    pub fn legacy_applications(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .legacy
            .available_subcommands()
            .filter(|name| !self.registry.is_face_app(name))
            .filter(|name| !self.registry.exclude_from_docs(name))
            .collect();
        names.sort();
        names
    }

    pub fn invoke(
        &self,
        face: &str,
        token: &VersionToken,
        action: Option<&str>,
        args: &[String],
        options: &Options,
    ) -> Result<String> {
        let face = self.registry.lookup(face, token)?;
        self.invoke_face(face, action, args, options)
    }

    /// Run one action of `face`, falling back to its default action.
    pub fn invoke_face(
        &self,
        face: &Face,
        action: Option<&str>,
        args: &[String],
        options: &Options,
    ) -> Result<String> {
        let action = resolve_action(face, action)?;
        action.declared_arity().check(action.name(), args.len())?;
        let options = action.check_options(options)?;
        debug!(
            face = %face.name(),
            version = %face.version(),
            action = %action.name(),
            args = args.len(),
            "invoking action"
        );
        action.call(&ActionCall {
            dispatcher: self,
            face,
            action,
            args,
            options: &options,
        })
    }

    /// Dispatch a full command line (without the program name).
    ///
    /// An empty line, `-h` and `--help` show the global help listing.
    pub fn run(&self, argv: &[String]) -> Result<Outcome> {
        let Some((subcommand, rest)) = argv.split_first() else {
            return self.run_face(help::HELP_FACE, &[]).map(Outcome::Rendered);
        };
        if matches!(subcommand.as_str(), "-h" | "--help") {
            return self.run_face(help::HELP_FACE, rest).map(Outcome::Rendered);
        }

        if self.registry.is_face_app(subcommand) {
            return self.run_face(subcommand, rest).map(Outcome::Rendered);
        }

        match self.legacy.locate(subcommand) {
            Some(command) => self
                .legacy
                .run(&command.name, rest)
                .map(Outcome::Legacy),
            None => Err(FaceError::FaceNotFound {
                name: subcommand.clone(),
            }),
        }
    }

    // A face whose only action is its default never takes an action word,
    // so `help help` describes the help face instead of naming its action.
    fn run_face(&self, name: &str, tokens: &[String]) -> Result<String> {
        let face = self.registry.lookup(name, &VersionToken::Current)?;
        let sole_default = matches!(face.actions(), [only] if only.is_default());
        let (action, tokens) = match tokens.split_first() {
            Some((first, rest))
                if !sole_default && !first.starts_with('-') && face.has_action(first) =>
            {
                (Some(first.as_str()), rest)
            }
            _ => (None, tokens),
        };
        let action = resolve_action(face, action)?;
        let parsed = parse_action_args(action, tokens)?;
        self.invoke_face(
            face,
            Some(action.name().as_str()),
            &parsed.positionals,
            &parsed.options,
        )
    }
}

fn resolve_action<'f>(face: &'f Face, action: Option<&str>) -> Result<&'f Action> {
    match action {
        Some(name) => face.get_action(name).ok_or_else(|| FaceError::ActionNotFound {
            face: face.name().to_string(),
            action: name.to_string(),
        }),
        None => face.default_action().ok_or_else(|| FaceError::NoDefaultAction {
            face: face.name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionOption, Arity};

    fn echo_face() -> Face {
        Face::builder("echo", "1.0.0")
            .unwrap()
            .summary("Echo arguments back.")
            .action(
                Action::new("say", |call: &ActionCall<'_>| {
                    let loud = call.option("loud").is_some();
                    let text = call.args.join(" ");
                    Ok(if loud { text.to_uppercase() } else { text })
                })
                .unwrap()
                .arity(Arity::range(0, 1))
                .option(ActionOption::new("loud").unwrap())
                .default_action(),
            )
            .action(
                Action::new("nothing", |_call: &ActionCall<'_>| Ok("nothing".to_string()))
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn dispatcher() -> Dispatcher {
        let mut dispatcher =
            Dispatcher::with_builtin_faces(LegacyBridge::new("faceplate", Vec::new())).unwrap();
        dispatcher.registry_mut().register(echo_face()).unwrap();
        dispatcher
            .registry_mut()
            .register(
                Face::builder("bare", "0.1.0")
                    .unwrap()
                    .action(
                        Action::new("only", |_call: &ActionCall<'_>| Ok(String::new())).unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_action_matches_explicit_action() {
        let dispatcher = dispatcher();
        let args = strings(&["hi"]);
        let implicit = dispatcher
            .invoke("echo", &VersionToken::Current, None, &args, &Options::new())
            .unwrap();
        let explicit = dispatcher
            .invoke("echo", &VersionToken::Current, Some("say"), &args, &Options::new())
            .unwrap();
        assert_eq!(implicit, explicit);
        assert_eq!(implicit, "hi");
    }

    #[test]
    fn extra_arguments_fail_with_argument_error() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .invoke(
                "echo",
                &VersionToken::Current,
                Some("say"),
                &strings(&["hi", "extra", "more"]),
                &Options::new(),
            )
            .unwrap_err();
        assert!(err.is_argument_error(), "{err}");
    }

    #[test]
    fn missing_default_action_is_reported() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .invoke("bare", &VersionToken::Current, None, &[], &Options::new())
            .unwrap_err();
        assert!(matches!(err, FaceError::NoDefaultAction { .. }), "{err}");
    }

    #[test]
    fn unknown_options_are_rejected() {
        let dispatcher = dispatcher();
        let mut options = Options::new();
        options.insert("quiet".to_string(), "true".to_string());
        let err = dispatcher
            .invoke("echo", &VersionToken::Current, Some("say"), &[], &options)
            .unwrap_err();
        assert!(matches!(err, FaceError::UnknownOption { .. }), "{err}");
    }

    #[test]
    fn command_line_resolves_action_then_options() {
        let dispatcher = dispatcher();
        let outcome = dispatcher.run(&strings(&["echo", "say", "hi", "--loud"])).unwrap();
        assert!(matches!(outcome, Outcome::Rendered(ref text) if text == "HI"));

        let outcome = dispatcher.run(&strings(&["echo", "hi"])).unwrap();
        assert!(matches!(outcome, Outcome::Rendered(ref text) if text == "hi"));

        let outcome = dispatcher.run(&strings(&["echo", "nothing"])).unwrap();
        assert!(matches!(outcome, Outcome::Rendered(ref text) if text == "nothing"));
    }

    #[test]
    fn sole_default_action_never_consumes_an_action_word() {
        let dispatcher = dispatcher();
        let Outcome::Rendered(page) = dispatcher.run(&strings(&["help", "help"])).unwrap() else {
            panic!("expected rendered help");
        };
        assert!(page.starts_with("USAGE: faceplate help <action>"), "{page}");

        let Outcome::Rendered(detail) =
            dispatcher.run(&strings(&["help", "help", "help"])).unwrap()
        else {
            panic!("expected rendered help");
        };
        assert!(detail.starts_with("USAGE: faceplate help help "), "{detail}");
    }

    #[test]
    fn unknown_subcommand_is_face_not_found() {
        let dispatcher = dispatcher();
        let err = dispatcher.run(&strings(&["huzzah"])).unwrap_err();
        assert!(matches!(err, FaceError::FaceNotFound { .. }), "{err}");
    }

    #[test]
    fn empty_command_line_renders_listing() {
        let dispatcher = dispatcher();
        let Outcome::Rendered(listing) = dispatcher.run(&[]).unwrap() else {
            panic!("expected rendered listing");
        };
        assert!(listing.contains("  echo"), "{listing}");
    }
}
