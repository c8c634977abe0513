//! DOCX text: paragraphs of `word/document.xml`, one per line.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("Failed to open archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("Missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("Failed to read {DOCUMENT_PART}: {e}")))?;

    let paragraphs = paragraphs(&xml)?;
    Ok(paragraphs.join("\n").trim_end().to_string())
}

/// Collects the text of every `<w:p>`, honouring tabs and explicit breaks.
///
/// Paragraphs nest inside text boxes (`w:txbxContent`), so open paragraphs are
/// kept on a stack. An inner paragraph is emitted when it closes; the outer one
/// keeps its own runs on both sides of the box.
fn paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" if !open.is_empty() => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match (e.local_name().as_ref(), open.last_mut()) {
                // <w:p/> is a blank line, which separates résumé blocks
                (b"p", None) => paragraphs.push(String::new()),
                (b"tab", Some(current)) => current.push('\t'),
                (b"br" | b"cr", Some(current)) => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Docx(format!("Bad text run: {err}")))?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "Malformed XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
