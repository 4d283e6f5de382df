//! Reference document reading.
//!
//! Copy decks arrive either as plain UTF-8 text (one expected line per file
//! line) or as a .docx export, where each `w:p` paragraph becomes one line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::AcquireError;

/// Read a reference document into ordered, trimmed, non-blank lines.
///
/// Dispatches on the `.docx` extension; everything else is read as text.
pub fn read_reference_document(path: &Path) -> Result<Vec<String>, AcquireError> {
    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));

    let lines = if is_docx {
        read_docx(path)?
    } else {
        read_text(path)?
    };

    Ok(lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

fn read_text(path: &Path) -> Result<Vec<String>, AcquireError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AcquireError::Parse(format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Pull paragraph text out of word/document.xml. Runs within a paragraph
/// concatenate; `w:tab` and `w:br` become spaces so adjacent runs do not fuse.
fn read_docx(path: &Path) -> Result<Vec<String>, AcquireError> {
    let file = File::open(path).map_err(|e| {
        AcquireError::Parse(format!("cannot open {}: {e}", path.display()))
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        AcquireError::Parse(format!("{} is not a valid .docx archive: {e}", path.display()))
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            AcquireError::Parse(format!(
                "{} has no word/document.xml: {e}",
                path.display()
            ))
        })?
        .read_to_string(&mut xml)
        .map_err(|e| {
            AcquireError::Parse(format!("cannot read document body: {e}"))
        })?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut lines = Vec::new();
    let mut in_text = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" | b"br" => current.push(' '),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                match e.unescape() {
                    Ok(text) => current.push_str(&text),
                    Err(_) => current.push_str(&String::from_utf8_lossy(e.as_ref())),
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => lines.push(current.clone()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AcquireError::Parse(format!(
                    "malformed document XML: {e}"
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(lines)
}
