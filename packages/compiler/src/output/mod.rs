//! Output Module
//!
//! Host-dialect statements and their source printer.

pub mod abstract_emitter;
pub mod output_ast;

pub use abstract_emitter::{to_source, EmitterVisitorContext, StatementEmitter};
pub use output_ast::{retarget_all, Expr, IfBranch, Statement, Target};
