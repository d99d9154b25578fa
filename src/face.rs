//! Faces: named, versioned groups of actions.
//!
//! `FaceBuilder::build` is the only way to obtain a `Face`, so every face in
//! the registry has unique action names and at most one default action.

use crate::action::Action;
use crate::error::{FaceError, Result};
use crate::name::Name;
use crate::version::Version;

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    name: Name,
    version: Version,
    summary: Option<String>,
    description: Option<String>,
    copyright: Option<String>,
    license: Option<String>,
    cli_app: bool,
    exclude_from_docs: bool,
    actions: Vec<Action>,
}

impl Face {
    pub fn builder(name: &str, version: &str) -> Result<FaceBuilder> {
        Ok(FaceBuilder {
            face: Face {
                name: Name::parse(name)?,
                version: Version::parse(version)?,
                summary: None,
                description: None,
                copyright: None,
                license: None,
                cli_app: true,
                exclude_from_docs: false,
                actions: Vec::new(),
            },
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Runnable from the command line, as opposed to composition-only.
    pub fn is_cli_app(&self) -> bool {
        self.cli_app
    }

    pub fn excluded_from_docs(&self) -> bool {
        self.exclude_from_docs
    }

    /// Actions in declaration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn get_action(&self, raw: &str) -> Option<&Action> {
        let name = Name::parse(raw).ok()?;
        self.actions.iter().find(|action| *action.name() == name)
    }

    pub fn has_action(&self, raw: &str) -> bool {
        self.get_action(raw).is_some()
    }

    pub fn default_action(&self) -> Option<&Action> {
        self.actions.iter().find(|action| action.is_default())
    }
}

pub struct FaceBuilder {
    face: Face,
}

impl FaceBuilder {
    pub fn summary(mut self, summary: &str) -> Self {
        self.face.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.face.description = Some(description.to_string());
        self
    }

    pub fn copyright(mut self, owner: &str, years: &str) -> Self {
        self.face.copyright = Some(format!("Copyright {years} {owner}"));
        self
    }

    pub fn license(mut self, license: &str) -> Self {
        self.face.license = Some(license.to_string());
        self
    }

    /// Mark the face as composition-only; it never appears as a subcommand.
    pub fn internal(mut self) -> Self {
        self.face.cli_app = false;
        self
    }

    pub fn exclude_from_docs(mut self) -> Self {
        self.face.exclude_from_docs = true;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.face.actions.push(action);
        self
    }

    pub fn build(self) -> Result<Face> {
        let face = self.face;
        let mut default: Option<&Name> = None;
        for (idx, action) in face.actions.iter().enumerate() {
            if face.actions[..idx]
                .iter()
                .any(|earlier| earlier.name() == action.name())
            {
                return Err(FaceError::DuplicateAction {
                    face: face.name.to_string(),
                    action: action.name().to_string(),
                });
            }
            if action.is_default() {
                if let Some(first) = default {
                    return Err(FaceError::MultipleDefaultActions {
                        face: face.name.to_string(),
                        first: first.to_string(),
                        second: action.name().to_string(),
                    });
                }
                default = Some(action.name());
            }
        }
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionCall;

    fn action(name: &str) -> Action {
        Action::new(name, |_call: &ActionCall<'_>| Ok(String::new())).unwrap()
    }

    #[test]
    fn builds_face_with_default_action() {
        let face = Face::builder(":Huzzah", "2.0.1")
            .unwrap()
            .summary("Huzzah!")
            .action(action("bar").default_action())
            .action(action("baz"))
            .build()
            .unwrap();

        assert_eq!(face.name().as_str(), "huzzah");
        assert_eq!(face.version().to_string(), "2.0.1");
        assert!(face.is_cli_app());
        assert!(face.has_action(":bar"));
        assert_eq!(face.default_action().unwrap().name().as_str(), "bar");
    }

    #[test]
    fn rejects_two_default_actions() {
        let err = Face::builder("huzzah", "1.0.0")
            .unwrap()
            .action(action("bar").default_action())
            .action(action("baz").default_action())
            .build()
            .unwrap_err();
        assert!(matches!(err, FaceError::MultipleDefaultActions { .. }), "{err}");
    }

    #[test]
    fn rejects_duplicate_action_names() {
        let err = Face::builder("huzzah", "1.0.0")
            .unwrap()
            .action(action("bar"))
            .action(action("BAR"))
            .build()
            .unwrap_err();
        assert!(matches!(err, FaceError::DuplicateAction { .. }), "{err}");
    }

    #[test]
    fn internal_faces_are_not_cli_apps() {
        let face = Face::builder("plumbing", "0.1.0")
            .unwrap()
            .internal()
            .build()
            .unwrap();
        assert!(!face.is_cli_app());
        assert!(face.default_action().is_none());
    }
}
