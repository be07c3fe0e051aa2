//! Grammar Productions
//!
//! Typed output of the upstream template grammar for one `<:Component>` tag.
//! The grammar resolves conditional arms and concatenated fragments into a
//! tree; the compiler in [`crate::component`] only ever consumes this shape.

use serde::{Deserialize, Serialize};

use crate::output::output_ast::Statement;

/// One `<:Name ...>...</:Name>` occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProduction {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeProduction>,
    #[serde(default)]
    pub children: Option<ChildrenProduction>,
    #[serde(default)]
    pub line: Option<usize>,
}

impl TagProduction {
    pub fn new(name: impl Into<String>) -> Self {
        TagProduction {
            name: name.into(),
            attributes: Vec::new(),
            children: None,
            line: None,
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeProduction) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_children(mut self, children: ChildrenProduction) -> Self {
        self.children = Some(children);
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A single `name="..."` attribute. Each element of `value` is one branch
/// segment in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeProduction {
    pub name: String,
    #[serde(default)]
    pub value: Vec<ValueExpression>,
    #[serde(default)]
    pub line: Option<usize>,
}

impl AttributeProduction {
    pub fn new(name: impl Into<String>, value: Vec<ValueExpression>) -> Self {
        AttributeProduction {
            name: name.into(),
            value,
            line: None,
        }
    }

    /// Attribute whose whole value is literal text.
    pub fn literal(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, vec![ValueExpression::Literal(text.into())])
    }

    /// Attribute whose whole value is one lookup, e.g. `Items="$MenuList"`.
    pub fn lookup(name: impl Into<String>, call: CallExpr) -> Self {
        Self::new(name, vec![ValueExpression::Call(call)])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ValueExpression {
    Literal(String),
    Call(CallExpr),
    Branch {
        #[serde(default)]
        guard: Option<CallExpr>,
        body: Vec<ValueExpression>,
    },
    /// A block opener the grammar could not pair with its closer.
    Opener(BlockKind),
}

impl ValueExpression {
    pub fn literal(text: impl Into<String>) -> Self {
        ValueExpression::Literal(text.into())
    }

    pub fn guarded(guard: CallExpr, body: Vec<ValueExpression>) -> Self {
        ValueExpression::Branch {
            guard: Some(guard),
            body,
        }
    }

    pub fn concat(body: Vec<ValueExpression>) -> Self {
        ValueExpression::Branch { guard: None, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    If,
    Loop,
}

/// How a looked-up value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallMode {
    /// Page-buffer form: the value is cast to escaped text.
    #[default]
    Render,
    /// The value itself, with no casting.
    Object,
}

/// `$Field.getAttributesHTML("class", "type")` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpr {
    pub steps: Vec<LookupStep>,
    #[serde(default)]
    pub mode: CallMode,
}

impl CallExpr {
    /// Parses a dotted path such as `Field.Message` into plain steps.
    pub fn path(path: &str) -> Self {
        CallExpr {
            steps: path
                .trim_start_matches('$')
                .split('.')
                .filter(|s| !s.is_empty())
                .map(LookupStep::field)
                .collect(),
            mode: CallMode::Render,
        }
    }

    pub fn object(path: &str) -> Self {
        Self::path(path).with_mode(CallMode::Object)
    }

    pub fn with_mode(mut self, mode: CallMode) -> Self {
        self.mode = mode;
        self
    }

    /// Appends a method call step with string arguments.
    pub fn method(mut self, name: &str, args: &[&str]) -> Self {
        self.steps.push(LookupStep {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupStep {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl LookupStep {
    pub fn field(name: &str) -> Self {
        LookupStep {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

/// Inner markup of a tag, already compiled by the host into statements
/// that append to the page buffer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildrenProduction {
    pub statements: Vec<Statement>,
}

impl ChildrenProduction {
    pub fn new(statements: Vec<Statement>) -> Self {
        ChildrenProduction { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
