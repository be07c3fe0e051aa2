//! Component Compilation
//!
//! `<:Component attr="...">...</:Component>` support: the per-attribute value
//! assembler, property normalization, the invocation compiler and the
//! runtime resolver/renderer.

pub mod invocation;
pub mod property;
pub mod resolver;
pub mod value_assembler;

pub use invocation::{compile_component, CompiledInvocation, CHILDREN_PROPERTY};
pub use property::{create_property, normalize_property, ComponentField};
pub use resolver::{search_paths, ComponentData, ComponentRenderer, RESERVED_PROPERTIES};
pub use value_assembler::assemble_property;
