//! Raw text extraction from supported resume formats

use crate::error::{Result, RoleMatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Unify line endings so blank-line section boundaries survive
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            RoleMatcherError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(normalize_line_endings(&text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(normalize_line_endings(&content))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&normalize_line_endings(&markdown_content)))
    }
}

impl MarkdownExtractor {
    /// Plain text with one line per heading or list item and a blank line after each block
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Heading(..)) | Event::End(Tag::Item) => text.push('\n'),
                Event::End(Tag::Paragraph) | Event::End(Tag::List(_)) | Event::End(Tag::CodeBlock(_)) => {
                    text.push_str("\n\n")
                }
                _ => {}
            }
        }

        Self::collapse_blank_lines(&text)
    }

    fn collapse_blank_lines(text: &str) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
                continue;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}
