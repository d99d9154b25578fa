//! Console and JSON rendering for the help face.
//!
//! Listing lines have the shape `␣␣<name>␣+<summary>` with names padded to a
//! common column, so a name is always followed by at least one space even
//! when it has no summary.

use super::RenderFormat;
use crate::action::{Action, ActionOption, Arity};
use crate::error::Result;
use crate::face::Face;
use crate::legacy::LegacyDoc;
use crate::version::Version;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub faces: Vec<ListingEntry>,
    pub legacy: Vec<ListingEntry>,
}

#[derive(Serialize)]
struct FaceDoc<'a> {
    name: &'a str,
    version: &'a Version,
    summary: Option<&'a str>,
    description: Option<&'a str>,
    copyright: Option<&'a str>,
    license: Option<&'a str>,
    actions: Vec<ActionDoc<'a>>,
}

#[derive(Serialize)]
struct ActionDoc<'a> {
    face: &'a str,
    name: &'a str,
    synopsis: String,
    default: bool,
    arity: Arity,
    summary: Option<&'a str>,
    description: Option<&'a str>,
    options: &'a [ActionOption],
    returns: Option<&'a str>,
    examples: Option<&'a str>,
}

#[derive(Serialize)]
struct LegacyHelpDoc<'a> {
    name: &'a str,
    command: String,
    legacy: bool,
    summary: Option<&'a str>,
    help: &'a str,
}

pub fn listing(program: &str, listing: &Listing, format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return to_json(listing);
    }

    let width = listing
        .faces
        .iter()
        .chain(&listing.legacy)
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!("Usage: {program} <subcommand> [options] <action> [options]"),
        String::new(),
        "Available subcommands:".to_string(),
        String::new(),
    ];
    lines.extend(listing.faces.iter().map(|entry| listing_line(entry, width)));
    if !listing.legacy.is_empty() {
        lines.push(String::new());
        lines.push("Available legacy subcommands:".to_string());
        lines.push(String::new());
        lines.extend(listing.legacy.iter().map(|entry| listing_line(entry, width)));
    }
    lines.push(String::new());
    lines.push(format!(
        "See '{program} help <subcommand> <action>' for help on a specific subcommand action."
    ));
    lines.push(format!(
        "See '{program} help <subcommand>' for help on a specific subcommand."
    ));
    Ok(finish(lines))
}

pub fn face(program: &str, face: &Face, format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return to_json(&face_doc(program, face));
    }

    let mut lines = vec![format!(
        "USAGE: {program} {} <action> [options]",
        face.name()
    )];
    if let Some(summary) = face.summary() {
        lines.push(String::new());
        lines.push(summary.to_string());
    }
    section(&mut lines, "VERSION", Some(face.version().to_string().as_str()));
    section(&mut lines, "DESCRIPTION", face.description());

    if !face.actions().is_empty() {
        lines.push(String::new());
        lines.push("ACTIONS:".to_string());
        let width = face
            .actions()
            .iter()
            .map(|action| action.name().as_str().len())
            .max()
            .unwrap_or(0);
        for action in face.actions() {
            let mut summary = action.summary_text().unwrap_or_default().to_string();
            if action.is_default() {
                summary = format!("{summary} (default)").trim_start().to_string();
            }
            lines.push(format!("  {:<width$}  {summary}", action.name().as_str()));
        }
    }

    let legal: Vec<&str> = face.copyright().into_iter().chain(face.license()).collect();
    if !legal.is_empty() {
        section(&mut lines, "COPYRIGHT AND LICENSE", Some(legal.join("\n").as_str()));
    }

    lines.push(String::new());
    lines.push(format!(
        "See '{program} help {} <action>' for help on a specific action.",
        face.name()
    ));
    Ok(finish(lines))
}

pub fn action(program: &str, face: &Face, action: &Action, format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return to_json(&action_doc(program, face, action));
    }

    let mut lines = vec![format!("USAGE: {}", synopsis(program, face, action))];
    if let Some(summary) = action.summary_text() {
        lines.push(String::new());
        lines.push(summary.to_string());
    }
    section(&mut lines, "DESCRIPTION", action.description_text());

    if !action.options().is_empty() {
        let usages: Vec<String> = action.options().iter().map(ActionOption::usage).collect();
        let width = usages.iter().map(String::len).max().unwrap_or(0);
        let body = action
            .options()
            .iter()
            .zip(&usages)
            .map(|(option, usage)| {
                format!("{usage:<width$}  {}", option.summary_text().unwrap_or_default())
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n");
        section(&mut lines, "OPTIONS", Some(body.as_str()));
    }
    section(&mut lines, "RETURNS", action.returns_text());
    section(&mut lines, "EXAMPLES", action.examples_text());
    if action.is_default() {
        section(
            &mut lines,
            "NOTES",
            Some(format!("This is the default action of '{}'.", face.name()).as_str()),
        );
    }
    Ok(finish(lines))
}

pub fn legacy(program: &str, doc: &LegacyDoc, format: RenderFormat) -> Result<String> {
    match format {
        RenderFormat::Console => Ok(doc.help.clone()),
        RenderFormat::Json => to_json(&LegacyHelpDoc {
            name: &doc.name,
            command: format!("{program}-{}", doc.name),
            legacy: true,
            summary: doc.summary.as_deref(),
            help: &doc.help,
        }),
    }
}

fn synopsis(program: &str, face: &Face, action: &Action) -> String {
    let mut words = vec![
        program.to_string(),
        face.name().to_string(),
        action.name().to_string(),
    ];
    words.extend(
        action
            .options()
            .iter()
            .map(|option| format!("[{}]", option.usage())),
    );
    words.extend(action.argument_usage());
    words.join(" ")
}

fn face_doc<'a>(program: &str, face: &'a Face) -> FaceDoc<'a> {
    FaceDoc {
        name: face.name().as_str(),
        version: face.version(),
        summary: face.summary(),
        description: face.description(),
        copyright: face.copyright(),
        license: face.license(),
        actions: face
            .actions()
            .iter()
            .map(|action| action_doc(program, face, action))
            .collect(),
    }
}

fn action_doc<'a>(program: &str, face: &'a Face, action: &'a Action) -> ActionDoc<'a> {
    ActionDoc {
        face: face.name().as_str(),
        name: action.name().as_str(),
        synopsis: synopsis(program, face, action),
        default: action.is_default(),
        arity: action.declared_arity(),
        summary: action.summary_text(),
        description: action.description_text(),
        options: action.options(),
        returns: action.returns_text(),
        examples: action.examples_text(),
    }
}

fn listing_line(entry: &ListingEntry, width: usize) -> String {
    format!(
        "  {:<width$}  {}",
        entry.name,
        entry.summary.as_deref().unwrap_or_default()
    )
}

fn section(lines: &mut Vec<String>, heading: &str, body: Option<&str>) {
    let Some(body) = body.filter(|body| !body.trim().is_empty()) else {
        return;
    };
    lines.push(String::new());
    lines.push(heading.to_string());
    lines.extend(body.lines().map(|line| {
        if line.is_empty() {
            String::new()
        } else {
            format!("  {line}")
        }
    }));
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
