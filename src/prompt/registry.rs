//! Template Registry - Read-only access to named prompt templates
//!
//! A registry is built once (from disk, from the bundled templates, or both)
//! and never changes afterwards, so it can be shared freely across threads.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::builtin;
use super::context::{Document, FormatOptions, format_documents};
use super::message::Message;
use super::render::PromptRenderer;
use super::template::PromptTemplate;
use crate::error::{PromptError, Result};

/// Variable that receives formatted documents in `compose_with_documents`
pub const DOCUMENTS_VAR: &str = "documents";

/// Immutable mapping from template name to template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, PromptTemplate>,
}

impl TemplateRegistry {
    /// Build a registry from already-loaded templates
    pub fn from_templates(templates: impl IntoIterator<Item = PromptTemplate>) -> Self {
        Self::from_map(templates.into_iter().map(|t| (t.name().to_string(), t)).collect())
    }

    pub(crate) fn from_map(templates: BTreeMap<String, PromptTemplate>) -> Self {
        Self { templates }
    }

    /// Registry holding the templates compiled into this crate
    pub fn builtin() -> Self {
        Self::from_templates(builtin::templates())
    }

    /// Combine two registries; templates in `other` replace same-named ones
    pub fn merged_with(mut self, other: TemplateRegistry) -> Self {
        for (name, template) in other.templates {
            if self.templates.contains_key(&name) {
                debug!("Template '{}' overrides an existing entry", name);
            }
            self.templates.insert(name, template);
        }
        self
    }

    /// Literal text of the template registered as `name`
    pub fn get(&self, name: &str) -> Result<&str> {
        self.template(name).map(PromptTemplate::content)
    }

    /// The template registered as `name`
    pub fn template(&self, name: &str) -> Result<&PromptTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| PromptError::UnknownTemplate(name.to_string()))
    }

    /// Render `name` with optional variable substitution
    ///
    /// An empty `vars` map yields the literal text.
    pub fn render(&self, name: &str, vars: &HashMap<String, String>) -> Result<String> {
        let template = self.template(name)?;
        PromptRenderer::new().render(template.content(), vars)
    }

    /// Render `name` as a system instruction followed by `user_input`
    pub fn compose(&self, name: &str, vars: &HashMap<String, String>, user_input: &str) -> Result<Vec<Message>> {
        let system = self.render(name, vars)?;
        Ok(vec![Message::system(system), Message::user(user_input)])
    }

    /// Compose with retrieved documents as context
    ///
    /// The formatted documents are bound to the `documents` variable. When the
    /// template does not reference `{{documents}}`, they are placed in the user
    /// message ahead of `user_input` instead.
    pub fn compose_with_documents(
        &self,
        name: &str,
        vars: &HashMap<String, String>,
        documents: &[Document],
        options: &FormatOptions,
        user_input: &str,
    ) -> Result<Vec<Message>> {
        let template = self.template(name)?;
        let context = format_documents(documents, options)?;

        if template.variables().iter().any(|v| v == DOCUMENTS_VAR) {
            let mut vars = vars.clone();
            vars.insert(DOCUMENTS_VAR.to_string(), context);
            return self.compose(name, &vars, user_input);
        }

        let system = self.render(name, vars)?;
        let user = if context.is_empty() {
            user_input.to_string()
        } else {
            format!("{}\n\n{}", context, user_input)
        };
        Ok(vec![Message::system(system), Message::user(user)])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// All templates in name order
    pub fn iter(&self) -> impl Iterator<Item = &PromptTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::message::Role;

    fn sample_registry() -> TemplateRegistry {
        TemplateRegistry::from_templates([
            PromptTemplate::new("plain.txt", "Answer briefly."),
            PromptTemplate::new("vars.txt", "Research {{company}}."),
        ])
    }

    #[test]
    fn test_get_registered() {
        let registry = sample_registry();
        assert_eq!(registry.get("plain.txt").unwrap(), "Answer briefly.");
    }

    #[test]
    fn test_get_unknown() {
        let registry = sample_registry();
        let err = registry.get("nonexistent.txt").unwrap_err();
        assert!(matches!(err, PromptError::UnknownTemplate(ref n) if n == "nonexistent.txt"));
    }

    #[test]
    fn test_get_is_idempotent() {
        let registry = sample_registry();
        let first = registry.get("vars.txt").unwrap().to_string();
        let second = registry.get("vars.txt").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_names_sorted() {
        let registry = sample_registry();
        assert_eq!(registry.names(), vec!["plain.txt", "vars.txt"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.contains("plain.txt"));
        assert!(!registry.contains("missing.txt"));
    }

    #[test]
    fn test_default_is_empty() {
        let registry = TemplateRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_render_empty_vars_matches_get() {
        let registry = sample_registry();
        let rendered = registry.render("vars.txt", &HashMap::new()).unwrap();
        assert_eq!(rendered, registry.get("vars.txt").unwrap());
    }

    #[test]
    fn test_render_with_vars() {
        let registry = sample_registry();
        let mut vars = HashMap::new();
        vars.insert("company".to_string(), "ACME Corp".to_string());
        assert_eq!(registry.render("vars.txt", &vars).unwrap(), "Research ACME Corp.");
    }

    #[test]
    fn test_render_unknown() {
        let registry = sample_registry();
        let result = registry.render("nope.txt", &HashMap::new());
        assert!(matches!(result, Err(PromptError::UnknownTemplate(_))));
    }

    #[test]
    fn test_compose() {
        let registry = sample_registry();
        let messages = registry.compose("plain.txt", &HashMap::new(), "What was Q2 revenue?").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "Answer briefly.");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What was Q2 revenue?");
    }

    fn filing_docs() -> Vec<Document> {
        crate::prompt::parse_documents(r#"[{"source": "acme-10q.pdf", "chunk": "Margins widened."}]"#).unwrap()
    }

    #[test]
    fn test_compose_with_documents_placeholder() {
        let registry = TemplateRegistry::from_templates([PromptTemplate::new(
            "rag.txt",
            "Answer using only:\n{{documents}}",
        )]);
        let messages = registry
            .compose_with_documents("rag.txt", &HashMap::new(), &filing_docs(), &FormatOptions::default(), "Why?")
            .unwrap();
        assert_eq!(
            messages[0].content,
            "Answer using only:\n- source: acme-10q.pdf\n\n\nMargins widened."
        );
        assert_eq!(messages[1].content, "Why?");
    }

    #[test]
    fn test_compose_with_documents_without_placeholder() {
        let registry = sample_registry();
        let messages = registry
            .compose_with_documents("plain.txt", &HashMap::new(), &filing_docs(), &FormatOptions::default(), "Why?")
            .unwrap();
        assert_eq!(messages[0].content, "Answer briefly.");
        assert_eq!(messages[1].content, "- source: acme-10q.pdf\n\n\nMargins widened.\n\nWhy?");
    }

    #[test]
    fn test_compose_with_no_documents() {
        let registry = sample_registry();
        let messages = registry
            .compose_with_documents("plain.txt", &HashMap::new(), &[], &FormatOptions::default(), "Why?")
            .unwrap();
        assert_eq!(messages[1].content, "Why?");
    }

    #[test]
    fn test_merged_with_overrides() {
        let base = sample_registry();
        let overlay = TemplateRegistry::from_templates([
            PromptTemplate::new("plain.txt", "Answer in detail."),
            PromptTemplate::new("extra.txt", "Extra."),
        ]);

        let merged = base.merged_with(overlay);
        assert_eq!(merged.names(), vec!["extra.txt", "plain.txt", "vars.txt"]);
        assert_eq!(merged.get("plain.txt").unwrap(), "Answer in detail.");
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateRegistry>();
    }
}
