//! Render Scope
//!
//! Stack of data contexts for one template render. `<% with %>` and
//! `<% loop %>` push a frame; the first step of a lookup searches frames
//! from the innermost outwards.

use crate::production::LookupStep;
use crate::view::value::Value;

#[derive(Debug, Clone, Copy)]
struct Iteration {
    pos: usize,
    total: usize,
}

#[derive(Debug, Clone)]
struct Frame {
    item: Value,
    iteration: Option<Iteration>,
}

#[derive(Debug, Clone)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Scope {
    pub fn new(root: Value) -> Self {
        Scope {
            frames: vec![Frame {
                item: root,
                iteration: None,
            }],
        }
    }

    pub fn push(&mut self, item: Value) {
        self.frames.push(Frame {
            item,
            iteration: None,
        });
    }

    /// Pushes loop item `index` (0-based) of `total`.
    pub fn push_iteration(&mut self, item: Value, index: usize, total: usize) {
        self.frames.push(Frame {
            item,
            iteration: Some(Iteration {
                pos: index + 1,
                total,
            }),
        });
    }

    pub fn pop(&mut self) {
        // The root frame stays for the whole render.
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn resolve(&self, steps: &[LookupStep]) -> Value {
        let Some((first, rest)) = steps.split_first() else {
            return self.current().clone();
        };
        let head = self.resolve_first(first);
        rest.iter().fold(head, |value, step| value.lookup(step))
    }

    fn current(&self) -> &Value {
        // `frames` is never empty: `pop` keeps the root.
        &self.frames[self.frames.len() - 1].item
    }

    fn resolve_first(&self, step: &LookupStep) -> Value {
        if let Some(value) = self.builtin(step) {
            return value;
        }
        self.frames
            .iter()
            .rev()
            .find(|frame| provides(&frame.item, &step.name))
            .map(|frame| frame.item.lookup(step))
            .unwrap_or_default()
    }

    fn builtin(&self, step: &LookupStep) -> Option<Value> {
        let innermost = &self.frames[self.frames.len() - 1];
        if provides(&innermost.item, &step.name) {
            return None;
        }
        match (step.name.as_str(), innermost.iteration) {
            ("Pos", Some(it)) => Some(Value::Text(it.pos.to_string())),
            ("First", Some(it)) => Some(Value::Bool(it.pos == 1)),
            ("Last", Some(it)) => Some(Value::Bool(it.pos == it.total)),
            ("Top", _) => Some(self.frames[0].item.clone()),
            _ => None,
        }
    }
}

fn provides(value: &Value, name: &str) -> bool {
    match value {
        Value::Record(record) => record.contains(name),
        Value::List(_) => matches!(name, "Count" | "First" | "Last"),
        Value::Field(field) => field.single_part().map_or(false, |p| provides(p, name)),
        _ => false,
    }
}
