//! Prompt Loader - Load prompt templates from files
//!
//! A source is either a single file or a directory of template files. Every
//! template is keyed by its file name (extension included) and its text is
//! kept byte-for-byte.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, info, warn};

use super::registry::TemplateRegistry;
use super::template::PromptTemplate;
use crate::error::{PromptError, Result};

/// Loads prompt templates from a file or directory
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    /// Optional glob applied to file names inside a directory source
    filter: Option<Pattern>,
}

impl PromptLoader {
    /// Create a loader that takes every regular, non-hidden file
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict directory loads to file names matching `pattern` (e.g. `*.txt`)
    pub fn with_filter(mut self, pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| PromptError::InvalidFilter(format!("'{}': {}", pattern, e)))?;
        self.filter = Some(pattern);
        Ok(self)
    }

    /// The active file name filter, if any
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_ref().map(Pattern::as_str)
    }

    /// Load all templates from `source`
    ///
    /// # Arguments
    /// * `source` - A template file, or a directory whose files are templates
    ///
    /// # Returns
    /// An immutable registry of the loaded templates
    pub fn load(&self, source: impl AsRef<Path>) -> Result<TemplateRegistry> {
        let source = source.as_ref();
        let metadata = fs::metadata(source).map_err(|e| map_io_error(source, e))?;

        let templates = if metadata.is_dir() {
            self.load_dir(source)?
        } else {
            let template = load_file(source)?;
            if template.is_empty() {
                return Err(PromptError::Read {
                    path: source.to_path_buf(),
                    reason: "template is empty".to_string(),
                });
            }
            BTreeMap::from([(template.name().to_string(), template)])
        };

        info!("Loaded {} template(s) from {}", templates.len(), source.display());
        Ok(TemplateRegistry::from_map(templates))
    }

    fn load_dir(&self, dir: &Path) -> Result<BTreeMap<String, PromptTemplate>> {
        let entries = fs::read_dir(dir).map_err(|e| map_io_error(dir, e))?;

        let mut templates = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(dir, e))?;
            let path = entry.path();

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!("Skipping {:?}: file name is not valid UTF-8", path);
                continue;
            };
            if name.starts_with('.') || !path.is_file() {
                continue;
            }
            if let Some(filter) = &self.filter
                && !filter.matches(name)
            {
                debug!("Skipping {}: does not match filter {}", name, filter.as_str());
                continue;
            }

            let template = load_file(&path)?;
            if template.is_empty() {
                warn!("Skipping {}: template is empty", path.display());
                continue;
            }
            templates.insert(template.name().to_string(), template);
        }

        Ok(templates)
    }
}

/// Load templates from `source` with no file name filter
pub fn load(source: impl AsRef<Path>) -> Result<TemplateRegistry> {
    PromptLoader::new().load(source)
}

fn load_file(path: &Path) -> Result<PromptTemplate> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PromptError::Read {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?
        .to_string();

    let bytes = fs::read(path).map_err(|e| map_io_error(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| PromptError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!("Loaded template '{}' ({} bytes) from {}", name, content.len(), path.display());
    Ok(PromptTemplate::new(name, content))
}

fn map_io_error(path: &Path, e: std::io::Error) -> PromptError {
    match e.kind() {
        ErrorKind::NotFound => PromptError::NotFound {
            path: PathBuf::from(path),
        },
        _ => PromptError::Read {
            path: PathBuf::from(path),
            reason: e.to_string(),
        },
    }
}
