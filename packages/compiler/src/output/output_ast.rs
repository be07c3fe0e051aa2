//! Output AST
//!
//! Statements in the host renderer's code dialect. Component compilation
//! produces these; the interpreter in [`crate::view::interpreter`] executes
//! them and [`super::abstract_emitter`] prints them.

use serde::{Deserialize, Serialize};

use crate::production::CallExpr;

/// Where an append writes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum Target {
    /// The page buffer of the template being rendered.
    Page,
    /// The accumulator list of one property of the current property map.
    Property(String),
    /// The `children` buffer of the current property map.
    Children,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Expr {
    /// Template source text. Buffers receive it verbatim.
    Literal(String),
    Call(CallExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfBranch {
    pub condition: CallExpr,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Statement {
    Append {
        target: Target,
        value: Expr,
    },
    If {
        branches: Vec<IfBranch>,
        #[serde(default)]
        otherwise: Option<Vec<Statement>>,
    },
    Loop {
        over: CallExpr,
        body: Vec<Statement>,
    },
    With {
        scope: CallExpr,
        body: Vec<Statement>,
    },
    /// Binds a fresh, empty property map.
    BeginProps,
    /// Resets one property's accumulator to an empty list.
    InitProperty {
        name: String,
    },
    /// Replaces a property's accumulator with its normalized value.
    CreateProperty {
        name: String,
    },
    InitChildren,
    /// Wraps the children buffer as a pre-escaped HTML fragment.
    SealChildren,
    /// Renders `name` with the current property map, drops the map binding
    /// and appends the result to `target`.
    RenderComponent {
        name: String,
        target: Target,
    },
}

impl Statement {
    pub fn append(target: Target, value: Expr) -> Self {
        Statement::Append { target, value }
    }

    pub fn append_literal(target: Target, text: impl Into<String>) -> Self {
        Statement::Append {
            target,
            value: Expr::Literal(text.into()),
        }
    }

    /// Redirects every page-buffer write in this statement (recursively) to
    /// `target`. Writes that already go elsewhere are left alone.
    pub fn retarget_page(&mut self, target: &Target) {
        match self {
            Statement::Append { target: t, .. } | Statement::RenderComponent { target: t, .. } => {
                if *t == Target::Page {
                    *t = target.clone();
                }
            }
            Statement::If {
                branches,
                otherwise,
            } => {
                for branch in branches.iter_mut() {
                    retarget_all(&mut branch.body, target);
                }
                if let Some(otherwise) = otherwise {
                    retarget_all(otherwise, target);
                }
            }
            Statement::Loop { body, .. } | Statement::With { body, .. } => {
                retarget_all(body, target);
            }
            Statement::BeginProps
            | Statement::InitProperty { .. }
            | Statement::CreateProperty { .. }
            | Statement::InitChildren
            | Statement::SealChildren => {}
        }
    }
}

pub fn retarget_all(statements: &mut [Statement], target: &Target) {
    for stmt in statements.iter_mut() {
        stmt.retarget_page(target);
    }
}
