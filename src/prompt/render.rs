//! Prompt Renderer - Optional variable substitution using Handlebars

use std::collections::HashMap;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{PromptError, Result};

/// Substitutes `{{variable}}` placeholders in template text
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Create a renderer that leaves missing variables empty and never escapes
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Prompt text is not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render `template` with string variables
    ///
    /// With no variables the text is returned untouched, so literal braces
    /// and backslashes in a prompt survive exactly as written.
    pub fn render(&self, template: &str, vars: &HashMap<String, String>) -> Result<String> {
        if vars.is_empty() {
            return Ok(template.to_string());
        }
        self.render_with(template, vars)
    }

    /// Render `template` with any serializable context
    pub fn render_with<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| PromptError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_simple() {
        let renderer = PromptRenderer::new();
        let result = renderer
            .render("Research {{company}} for {{quarter}}.", &vars(&[("company", "ACME"), ("quarter", "Q3 2024")]))
            .unwrap();
        assert_eq!(result, "Research ACME for Q3 2024.");
    }

    #[test]
    fn test_render_without_vars_is_verbatim() {
        let renderer = PromptRenderer::default();
        let template = "Keep {{this}} and \\{{that}} exactly\n";
        let result = renderer.render(template, &HashMap::new()).unwrap();
        assert_eq!(result, template);
    }

    #[test]
    fn test_render_missing_variable_empty_string() {
        let renderer = PromptRenderer::new();
        let result = renderer.render("Hello, {{name}}!", &vars(&[("other", "x")])).unwrap();
        assert_eq!(result, "Hello, !");
    }

    #[test]
    fn test_render_no_escape_html() {
        let renderer = PromptRenderer::new();
        let result = renderer.render("Filter: {{expr}}", &vars(&[("expr", "revenue > 1M & <growth>")])).unwrap();
        assert_eq!(result, "Filter: revenue > 1M & <growth>");
    }

    #[test]
    fn test_render_with_serializable() {
        #[derive(Serialize)]
        struct Context {
            ticker: String,
            count: u32,
        }

        let renderer = PromptRenderer::new();
        let context = Context {
            ticker: "ACME".to_string(),
            count: 5,
        };
        let result = renderer.render_with("{{count}} queries for {{ticker}}", &context).unwrap();
        assert_eq!(result, "5 queries for ACME");
    }

    #[test]
    fn test_render_syntax_error() {
        let renderer = PromptRenderer::new();
        let result = renderer.render("Broken {{#if ready}} never closed", &vars(&[("a", "b")]));
        assert!(matches!(result, Err(PromptError::Render(_))));
    }
}
