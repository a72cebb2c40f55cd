//! Text extraction from uploaded or on-disk documents

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{Event, Parser, Tag};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// PDF text via `pdf-extract`.
///
/// Some "PDF" uploads are really text files with the wrong extension, so a
/// failed parse falls back to a lossy UTF-8 decode instead of erroring.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("PDF parsing failed ({}); decoding bytes as text", e);
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ResumeMatchError::TextProcessing(format!("Text file is not valid UTF-8: {}", e)))
    }
}

/// Markdown flattened to plain text, one block per line.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes)?;
        Ok(Self::flatten(&markdown))
    }
}

impl MarkdownExtractor {
    fn flatten(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak => text.push(' '),
                Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract text for a known file type.
pub fn extract_by_type(file_type: FileType, bytes: &[u8]) -> Result<String> {
    match file_type {
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => Err(ResumeMatchError::UnsupportedFormat(
            "expected a .pdf, .txt or .md document".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_flattening() {
        let md = "# Jane Doe\n\n**Software Engineer** with `Rust`\nand Go.\n\n- React\n- Node.js\n";
        let text = MarkdownExtractor.extract(md.as_bytes()).unwrap();

        assert_eq!(text, "Jane Doe\nSoftware Engineer with Rust and Go.\nReact\nNode.js");
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_plain_text() {
        let text = PlainTextExtractor.extract("Python developer".as_bytes()).unwrap();
        assert_eq!(text, "Python developer");
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_pdf_fallback_to_text() {
        let text = PdfExtractor.extract(b"Not really a PDF: python, docker").unwrap();
        assert!(text.contains("python, docker"));
    }

    #[test]
    fn test_unknown_type() {
        let err = extract_by_type(FileType::Unknown, b"data").unwrap_err();
        assert!(matches!(err, ResumeMatchError::UnsupportedFormat(_)));
    }
}
