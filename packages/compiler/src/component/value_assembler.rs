//! Property Value Assembler
//!
//! Turns one attribute's parsed value into the statements that append into
//! that property's accumulator. Branch order is preserved; conditions are
//! never evaluated here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CompileError, Result};
use crate::output::output_ast::{Expr, IfBranch, Statement, Target};
use crate::production::{AttributeProduction, BlockKind, CallExpr, CallMode, ValueExpression};

static IF_OPENER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<%\s*if\b").unwrap());
static LOOP_OPENER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<%\s*loop\b").unwrap());

/// Builds the append statements for `attribute`, stored as `property` on
/// `component`.
pub fn assemble_property(
    component: &str,
    property: &str,
    attribute: &AttributeProduction,
) -> Result<Vec<Statement>> {
    check_block_openers(component, property, attribute)?;

    let target = Target::Property(property.to_string());
    let mut appends = Vec::new();
    for segment in &attribute.value {
        assemble_fragment(segment, &target, false, &mut appends);
    }
    Ok(appends)
}

fn assemble_fragment(
    fragment: &ValueExpression,
    target: &Target,
    guarded: bool,
    out: &mut Vec<Statement>,
) {
    match fragment {
        ValueExpression::Literal(text) => {
            // Empty literals would coerce a lone structured value into text.
            if !text.is_empty() {
                out.push(Statement::append(target.clone(), Expr::Literal(text.clone())));
            }
        }
        ValueExpression::Call(call) => {
            let call = if guarded {
                side_effect_free(call)
            } else {
                call.clone()
            };
            out.push(Statement::append(target.clone(), Expr::Call(call)));
        }
        ValueExpression::Branch { guard: None, body } => {
            for inner in body {
                assemble_fragment(inner, target, guarded, out);
            }
        }
        ValueExpression::Branch {
            guard: Some(condition),
            body,
        } => {
            let mut inner_appends = Vec::new();
            for inner in body {
                assemble_fragment(inner, target, true, &mut inner_appends);
            }
            if !inner_appends.is_empty() {
                out.push(Statement::If {
                    branches: vec![IfBranch {
                        condition: condition.clone(),
                        body: inner_appends,
                    }],
                    otherwise: None,
                });
            }
        }
        // Rejected up front by `check_block_openers`.
        ValueExpression::Opener(_) => {}
    }
}

/// A call inside a guard renders into the page buffer by default. Inside a
/// property it is switched to the object form, which reads the value
/// without casting it.
fn side_effect_free(call: &CallExpr) -> CallExpr {
    match call.mode {
        CallMode::Render => call.clone().with_mode(CallMode::Object),
        CallMode::Object => call.clone(),
    }
}

fn check_block_openers(
    component: &str,
    property: &str,
    attribute: &AttributeProduction,
) -> Result<()> {
    if attribute.value.iter().any(|v| contains_opener(v, BlockKind::If)) {
        return Err(CompileError::MissingEndIf {
            property: property.to_string(),
            component: component.to_string(),
            line: attribute.line,
        });
    }
    if attribute.value.iter().any(|v| contains_opener(v, BlockKind::Loop)) {
        return Err(CompileError::LoopInProperty {
            property: property.to_string(),
            component: component.to_string(),
            line: attribute.line,
        });
    }
    Ok(())
}

fn contains_opener(value: &ValueExpression, kind: BlockKind) -> bool {
    match value {
        ValueExpression::Opener(k) => *k == kind,
        ValueExpression::Literal(text) => match kind {
            BlockKind::If => IF_OPENER_RE.is_match(text),
            BlockKind::Loop => LOOP_OPENER_RE.is_match(text),
        },
        ValueExpression::Branch { body, .. } => body.iter().any(|v| contains_opener(v, kind)),
        ValueExpression::Call(_) => false,
    }
}
