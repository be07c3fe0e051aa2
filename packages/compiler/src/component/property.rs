//! Property Normalization
//!
//! Compile side: wraps a property's append statements in accumulator
//! initialization and a trailing `create_property` call.
//! Runtime side: [`create_property`] decides the final representation of an
//! accumulated list of values.

use std::rc::Rc;

use crate::output::output_ast::Statement;
use crate::production::LookupStep;
use crate::view::value::Value;

/// Emits the statements that build property `name` from `appends`.
///
/// The accumulator always starts as an empty list, whatever the number of
/// appends, so `create_property` sees the same shape for one value or many.
pub fn normalize_property(name: &str, appends: Vec<Statement>) -> Vec<Statement> {
    let mut statements = Vec::with_capacity(appends.len() + 2);
    statements.push(Statement::InitProperty {
        name: name.to_string(),
    });
    statements.extend(appends);
    statements.push(Statement::CreateProperty {
        name: name.to_string(),
    });
    statements
}

/// Turns an accumulated list into the value stored under the property.
///
/// Exactly one value that is not rich text passes through untouched, so a
/// record or list handed to a component stays a record or list. Anything
/// else becomes a [`ComponentField`].
pub fn create_property(name: &str, mut parts: Vec<Value>) -> Value {
    if parts.len() == 1 && !parts[0].is_rich_text() {
        return parts.remove(0);
    }
    Value::Field(Rc::new(ComponentField::new(name, parts)))
}

/// A property assembled from several parts (or from rich text). Reads as the
/// concatenation of its parts; forwards lookups to a lone part.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentField {
    name: String,
    parts: Vec<Value>,
}

impl ComponentField {
    pub fn new(name: impl Into<String>, parts: Vec<Value>) -> Self {
        ComponentField {
            name: name.into(),
            parts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    pub fn single_part(&self) -> Option<&Value> {
        match self.parts.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        self.parts.iter().map(Value::to_html).collect()
    }

    pub fn has_value(&self) -> bool {
        self.parts.iter().any(Value::has_value)
    }

    pub fn lookup(&self, step: &LookupStep) -> Value {
        match self.single_part() {
            Some(part) => part.lookup(step),
            None => Value::Null,
        }
    }
}
