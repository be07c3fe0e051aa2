// Template Loader
//
// Loads template sources by logical path (`components/Button`).

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub const TEMPLATE_EXTENSION: &str = "ss";

/// Template load error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ResourceError {
    pub path: String,
    pub message: String,
}

impl ResourceError {
    pub fn not_found(path: &str) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Template not found: {}", path),
        }
    }

    pub fn load_failed(path: &str, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Failed to load {}: {}", path, reason),
        }
    }
}

/// Template loader trait.
pub trait TemplateLoader {
    fn exists(&self, path: &str) -> bool;
    fn load(&self, path: &str) -> Result<String, ResourceError>;
}

/// In-memory template loader.
#[derive(Debug, Default)]
pub struct InMemoryTemplateLoader {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str, source: &str) {
        self.templates.insert(path.to_string(), source.to_string());
    }

    pub fn with(mut self, path: &str, source: &str) -> Self {
        self.add(path, source);
        self
    }
}

impl TemplateLoader for InMemoryTemplateLoader {
    fn exists(&self, path: &str) -> bool {
        self.templates.contains_key(path)
    }

    fn load(&self, path: &str) -> Result<String, ResourceError> {
        self.templates
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::not_found(path))
    }
}

/// File-based template loader; `path` maps to `<root>/<path>.ss`.
#[derive(Debug, Clone)]
pub struct FileTemplateLoader {
    root_dir: PathBuf,
}

impl FileTemplateLoader {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn file_path(&self, path: &str) -> PathBuf {
        self.root_dir
            .join(format!("{}.{}", path, TEMPLATE_EXTENSION))
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn exists(&self, path: &str) -> bool {
        self.file_path(path).is_file()
    }

    fn load(&self, path: &str) -> Result<String, ResourceError> {
        std::fs::read_to_string(self.file_path(path))
            .map_err(|e| ResourceError::load_failed(path, &e.to_string()))
    }
}
