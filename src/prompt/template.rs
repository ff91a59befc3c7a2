//! Prompt Template - A named, immutable block of instruction text

use std::fmt;

use sha2::{Digest, Sha256};

/// A named prompt template
///
/// The content is held exactly as it was read; nothing in this crate
/// mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    content: String,
}

impl PromptTemplate {
    /// Create a template from a name and its literal text
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The registry key of this template
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The literal template text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length of the template text in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Short content fingerprint: hex of the first 8 bytes of the SHA-256
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }

    /// Names of the `{{variable}}` placeholders referenced in the text, in
    /// order of first appearance
    pub fn variables(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let name = after[..end].trim();
            if !name.is_empty() && !vars.iter().any(|v| v == name) {
                vars.push(name.to_string());
            }
            rest = &after[end + 2..];
        }

        vars
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let template = PromptTemplate::new("greeting.txt", "Hello there");
        assert_eq!(template.name(), "greeting.txt");
        assert_eq!(template.content(), "Hello there");
        assert_eq!(template.len(), 11);
        assert!(!template.is_empty());
    }

    #[test]
    fn test_display_is_verbatim() {
        let text = "Line 1\n\n  Line 3\t\n";
        let template = PromptTemplate::new("t.txt", text);
        assert_eq!(template.to_string(), text);
    }

    #[test]
    fn test_digest_is_stable() {
        let a = PromptTemplate::new("a.txt", "same text");
        let b = PromptTemplate::new("b.txt", "same text");
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 16);
    }

    #[test]
    fn test_digest_changes_with_content() {
        let a = PromptTemplate::new("a.txt", "version one");
        let b = PromptTemplate::new("a.txt", "version two");
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_known_value() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        let template = PromptTemplate::new("empty.txt", "");
        assert_eq!(template.digest(), "e3b0c44298fc1c14");
    }

    #[test]
    fn test_variables_none() {
        let template = PromptTemplate::new("plain.txt", "No placeholders at all.");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_variables_in_order_deduplicated() {
        let template = PromptTemplate::new(
            "q.txt",
            "Company: {{company}}, quarter {{ quarter }}. Again {{company}}.",
        );
        assert_eq!(template.variables(), vec!["company", "quarter"]);
    }

    #[test]
    fn test_variables_unclosed() {
        let template = PromptTemplate::new("bad.txt", "Open {{company and never closed");
        assert!(template.variables().is_empty());
    }
}
