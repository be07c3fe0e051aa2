//! View Values
//!
//! The data a template renders: plain scalars, pre-escaped rich text and
//! structured records and lists. Structured values and fields live behind
//! `Rc` so that handing a value to a component keeps its identity.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::component::property::ComponentField;
use crate::production::LookupStep;
use crate::util::escape_xml;

pub type MethodFn = dyn Fn(&[String]) -> Value;

/// A callable field on a record, such as `getAttributesHTML("class")`.
#[derive(Clone)]
pub struct Method(Rc<MethodFn>);

impl Method {
    pub fn new(f: impl Fn(&[String]) -> Value + 'static) -> Self {
        Method(Rc::new(f))
    }

    pub fn call(&self, args: &[String]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method(..)")
    }
}

/// Capability class of a value, used to decide property representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Structured,
    RichText,
}

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Plain text, escaped when written to markup.
    Text(String),
    /// Pre-escaped markup, written as-is.
    Html(String),
    /// Multi-part component property.
    Field(Rc<ComponentField>),
    Record(Rc<Record>),
    List(Rc<Vec<Value>>),
    Method(Method),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn html(s: impl Into<String>) -> Self {
        Value::Html(s.into())
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Rc::new(record))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null | Value::Bool(_) | Value::Text(_) | Value::Method(_) => ValueKind::Scalar,
            Value::Html(_) | Value::Field(_) => ValueKind::RichText,
            Value::Record(_) | Value::List(_) => ValueKind::Structured,
        }
    }

    pub fn is_rich_text(&self) -> bool {
        self.kind() == ValueKind::RichText
    }

    /// Truthiness used by `<% if %>` guards.
    pub fn has_value(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Text(s) | Value::Html(s) => !s.is_empty(),
            Value::Field(field) => field.has_value(),
            Value::Record(_) => true,
            Value::List(items) => !items.is_empty(),
            Value::Method(m) => m.call(&[]).has_value(),
        }
    }

    /// Markup form of the value. Plain text is escaped exactly once here.
    pub fn to_html(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            Value::Text(s) => escape_xml(s),
            Value::Html(s) => s.clone(),
            Value::Field(field) => field.to_html(),
            Value::Record(record) => record.to_html(),
            Value::List(_) => String::new(),
            Value::Method(m) => m.call(&[]).to_html(),
        }
    }

    /// Resolves one lookup step against this value.
    pub fn lookup(&self, step: &LookupStep) -> Value {
        match self {
            Value::Record(record) => record.lookup(step),
            Value::List(items) => match step.name.as_str() {
                "Count" => Value::Text(items.len().to_string()),
                "First" => items.first().cloned().unwrap_or_default(),
                "Last" => items.last().cloned().unwrap_or_default(),
                _ => Value::Null,
            },
            Value::Field(field) => field.lookup(step),
            Value::Method(m) => m.call(&[]).lookup(step),
            _ => Value::Null,
        }
    }

    /// Items iterated by `<% loop %>`. A single record loops once.
    pub fn items(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.as_ref().clone(),
            Value::Field(field) => match field.single_part() {
                Some(part) => part.items(),
                None => Vec::new(),
            },
            Value::Null => Vec::new(),
            other if other.has_value() => vec![other.clone()],
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) | (Value::Html(a), Value::Html(b)) => a == b,
            (Value::Field(a), Value::Field(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => Rc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::record(record)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Text(n.to_string()),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::list(items.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (key, value) in map {
                    record.insert(key.clone(), Value::from(value));
                }
                Value::record(record)
            }
        }
    }
}

/// An ordered bag of named fields, the host's generic view-model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[String]) -> Value + 'static,
    ) -> Self {
        self.insert(name.into(), Value::Method(Method::new(f)));
        self
    }

    pub fn insert(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn lookup(&self, step: &LookupStep) -> Value {
        match self.fields.get(&step.name) {
            Some(Value::Method(m)) => m.call(&step.args),
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }

    /// Records render through an optional `forTemplate` field.
    fn to_html(&self) -> String {
        self.lookup(&LookupStep::field("forTemplate")).to_html()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}
