//! promptreg - A registry of named LLM prompt templates
//!
//! Loads prompt templates (such as the bundled financial-question taxonomy and
//! quarterly-report search directive) and hands them out verbatim, or with
//! optional variable substitution, for use as system instructions.

pub mod error;
pub mod prompt;

pub use error::{PromptError, Result};
pub use prompt::{Document, FormatOptions, Message, PromptLoader, PromptTemplate, Role, TemplateRegistry};
