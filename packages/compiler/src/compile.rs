//! Batch Compilation
//!
//! Tags compile independently of each other, so a whole template's worth of
//! tags can be compiled across threads. Results keep input order.

use rayon::prelude::*;

use crate::component::invocation::{compile_component, CompiledInvocation};
use crate::error::Result;
use crate::production::TagProduction;

pub fn compile_all(tags: &[TagProduction]) -> Vec<Result<CompiledInvocation>> {
    tags.par_iter().map(compile_component).collect()
}
