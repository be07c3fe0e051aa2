#![deny(clippy::all)]

/**
 * Component Compiler CLI
 *
 * Command-line entry points for compiling tag productions and rendering
 * components from a template directory.
 */
pub use component_compiler as compiler;

pub mod logging;
pub mod perform_compile;
pub mod perform_render;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
