//! Prompt System - Template loading, lookup and rendering
//!
//! Templates are loaded once into an immutable [`TemplateRegistry`] and
//! looked up by name. Rendering is optional: without variables the literal
//! text is handed out unchanged.

pub mod builtin;
mod context;
mod loader;
mod message;
mod registry;
mod render;
mod template;

pub use context::{Document, FormatOptions, format_documents, load_documents, parse_documents};
pub use loader::{PromptLoader, load};
pub use message::{Message, Role};
pub use registry::{DOCUMENTS_VAR, TemplateRegistry};
pub use render::PromptRenderer;
pub use template::PromptTemplate;
