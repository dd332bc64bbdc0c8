use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;

use crate::cli::{InspectArgs, RenderArgs};
use crate::formats::CharacterView;
use crate::{render, sheet, xml};

pub const DEFAULT_FILENAME: &str = "character_sheet.html";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedSheet {
    pub html: String,
    pub filename: String,
    pub name: String,
}

/// Parses an export and assembles its view. Fails only when the document
/// itself cannot be parsed.
pub fn view_from_xml(bytes: &[u8]) -> anyhow::Result<CharacterView> {
    let tree = xml::parse_document(bytes).context("read character export")?;
    Ok(sheet::assemble(&tree))
}

pub fn convert_xml(bytes: &[u8]) -> anyhow::Result<RenderedSheet> {
    let view = view_from_xml(bytes)?;
    let html = render::render(&view);
    let filename = suggested_filename(&view.name);
    tracing::info!(name = %view.name, %filename, bytes = html.len(), "rendered character sheet");
    Ok(RenderedSheet {
        html,
        filename,
        name: view.name,
    })
}

/// Keeps ASCII letters, digits, `_` and `-` of the character name and appends
/// `.html`; falls back to [`DEFAULT_FILENAME`].
pub fn suggested_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let stem: String = kept.trim().chars().filter(|c| *c != ' ').collect();
    if stem.is_empty() {
        DEFAULT_FILENAME.to_owned()
    } else {
        format!("{stem}.html")
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let input = PathBuf::from(&args.input);
    let bytes =
        std::fs::read(&input).with_context(|| format!("read input: {}", input.display()))?;
    let sheet = convert_xml(&bytes).with_context(|| format!("convert: {}", input.display()))?;

    let out_path = match &args.out {
        Some(out) => PathBuf::from(out),
        None => PathBuf::from(&sheet.filename),
    };
    if out_path.exists() && !args.force {
        anyhow::bail!("output already exists: {}", out_path.display());
    }
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output parent dir: {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&out_path)
        .with_context(|| format!("create output: {}", out_path.display()))?;
    file.write_all(sheet.html.as_bytes())
        .with_context(|| format!("write output: {}", out_path.display()))?;

    println!("{}", out_path.display());
    Ok(())
}

pub fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let input = PathBuf::from(&args.input);
    let bytes =
        std::fs::read(&input).with_context(|| format!("read input: {}", input.display()))?;
    let view = view_from_xml(&bytes).with_context(|| format!("inspect: {}", input.display()))?;
    let json = serde_json::to_string_pretty(&view).context("serialize character view")?;
    println!("{json}");
    Ok(())
}
