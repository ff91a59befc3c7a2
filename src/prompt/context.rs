//! Retrieved-document context - Format search results as prompt text
//!
//! A document is a flat JSON object as produced by a retriever: a body field
//! (`chunk`, or `text` for Python sources) plus arbitrary metadata.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PromptError, Result};

/// Fields that hold document text rather than metadata
const BODY_FIELDS: [&str; 3] = ["text", "chunk", "content"];

/// Identifier fields hidden unless ids are requested
const ID_FIELDS: [&str; 2] = ["doc_id", "chunk_id"];

const TRUNCATION_MARKER: &str = "\n\n...\n\n";

/// A single retrieved document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

/// Controls how documents are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Keep `doc_id` and `chunk_id` in the metadata lines
    pub with_ids: bool,
    /// Cut the body to this many characters and append an ellipsis block
    pub max_length: Option<usize>,
}

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Source type, from the top level or a nested `metadata` object
    pub fn file_type(&self) -> Option<&str> {
        self.fields
            .get("file_type")
            .and_then(Value::as_str)
            .or_else(|| self.fields.get("metadata")?.get("file_type")?.as_str())
    }

    /// The text to show: `text` for Python sources, `chunk` otherwise
    pub fn body(&self) -> Result<&str> {
        let field = if self.file_type() == Some("python") { "text" } else { "chunk" };
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| PromptError::InvalidDocument(format!("missing string field '{}'", field)))
    }

    /// Render as `- key: value` metadata lines, a blank line, then the body
    pub fn format(&self, options: &FormatOptions) -> Result<String> {
        let mut out = String::new();
        for (key, value) in &self.fields {
            if BODY_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if !options.with_ids && ID_FIELDS.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::String(s) => out.push_str(&format!("- {}: {}\n", key, s)),
                other => out.push_str(&format!("- {}: {}\n", key, other)),
            }
        }
        out.push_str("\n\n");

        let body = self.body()?;
        match options.max_length.filter(|&n| n > 0) {
            Some(max) => {
                out.extend(body.chars().take(max));
                out.push_str(TRUNCATION_MARKER);
            }
            None => out.push_str(body),
        }
        Ok(out)
    }
}

/// Format several documents, separated by blank lines
pub fn format_documents(documents: &[Document], options: &FormatOptions) -> Result<String> {
    let parts = documents
        .iter()
        .map(|doc| doc.format(options))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("\n\n"))
}

/// Parse documents from a JSON array or from JSON Lines
pub fn parse_documents(input: &str) -> Result<Vec<Document>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut documents = Vec::new();
    for line in input.lines().filter(|l| !l.trim().is_empty()) {
        documents.push(serde_json::from_str(line)?);
    }
    Ok(documents)
}

/// Read and parse a document file (JSON array or JSON Lines)
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let documents = parse_documents(&content)?;
    debug!("Loaded {} document(s) from {}", documents.len(), path.display());
    Ok(documents)
}
