//! View Layer
//!
//! The host template renderer the component resolver delegates to: values,
//! scopes, template loading and compilation, and statement execution.

pub mod interpreter;
pub mod loader;
pub mod scope;
pub mod template_parser;
pub mod value;
pub mod viewer;

pub use interpreter::{ComponentHost, Interpreter, PropertyMap};
pub use loader::{FileTemplateLoader, InMemoryTemplateLoader, ResourceError, TemplateLoader};
pub use scope::Scope;
pub use template_parser::{parse_lookup, parse_template};
pub use value::{Method, Record, Value, ValueKind};
pub use viewer::{TemplateHandle, TemplateHost, Viewer};
