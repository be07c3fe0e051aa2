#![deny(clippy::all)]

/**
 * Component Compiler
 *
 * Compiles `<:Component>` tag productions into host statements and renders
 * components against their templates.
 */

// Compile side
pub mod compile;
pub mod component;
pub mod error;
pub mod output;
pub mod production;

// Host side
pub mod config;
pub mod view;

pub mod util;

// Re-exports
pub use compile::compile_all;
pub use component::{compile_component, CompiledInvocation, ComponentRenderer};
pub use config::ComponentConfig;
pub use error::{CompileError, RenderError};
pub use production::{
    AttributeProduction, CallExpr, CallMode, ChildrenProduction, TagProduction, ValueExpression,
};
pub use view::{FileTemplateLoader, InMemoryTemplateLoader, PropertyMap, Value, Viewer};
