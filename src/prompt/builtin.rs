//! Templates compiled into the crate from the `prompts/` directory

use super::template::PromptTemplate;

/// Taxonomy for classifying financial questions about SEC filings
pub const CLASSIFICATION: &str = include_str!("../../prompts/classification.txt");

/// Directive for generating web search queries about quarterly reports
pub const SEARCH_QUERY: &str = include_str!("../../prompts/search_query.txt");

pub const CLASSIFICATION_NAME: &str = "classification.txt";
pub const SEARCH_QUERY_NAME: &str = "search_query.txt";

/// The bundled templates, keyed by their file names
pub fn templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate::new(CLASSIFICATION_NAME, CLASSIFICATION),
        PromptTemplate::new(SEARCH_QUERY_NAME, SEARCH_QUERY),
    ]
}
