//! Compiler and Render Errors
//!
//! Compile-time usage errors abort the tag being compiled and carry the
//! source line when the grammar supplied one. Render-time errors carry a
//! message only.

use thiserror::Error;

use crate::view::loader::ResourceError;

pub type Result<T> = std::result::Result<T, CompileError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Missing < % end_if % > inside property \"{property}\" on component \"{component}\"")]
    MissingEndIf {
        property: String,
        component: String,
        line: Option<usize>,
    },

    #[error("Cannot use < % loop % > inside property \"{property}\" on component \"{component}\"")]
    LoopInProperty {
        property: String,
        component: String,
        line: Option<usize>,
    },

    #[error("Cannot use \"children\" as a property name and have inner HTML.")]
    ChildrenCollision {
        component: String,
        line: Option<usize>,
    },

    #[error("{message} on line {line}")]
    Syntax { message: String, line: usize },
}

impl CompileError {
    /// Source line of the offending construct, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::MissingEndIf { line, .. }
            | CompileError::LoopInProperty { line, .. }
            | CompileError::ChildrenCollision { line, .. } => *line,
            CompileError::Syntax { line, .. } => Some(*line),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("None of the following templates could be found: {}", .candidates.join(", "))]
    TemplateNotFound { candidates: Vec<String> },

    #[error("You cannot use the property \"{property}\" on \"{component}\" as it's already used by ViewableData.")]
    ReservedProperty { property: String, component: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Failed to compile template \"{path}\": {source}")]
    Template {
        path: String,
        #[source]
        source: CompileError,
    },

    #[error("Invalid generated code: {0}")]
    InvalidProgram(String),
}
