//! Statement Interpreter
//!
//! Executes host statements against a [`Scope`], writing into the page
//! buffer. Component invocations keep a stack of property maps so a tag in
//! another tag's inner markup builds its own map.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::component::invocation::CHILDREN_PROPERTY;
use crate::component::property::create_property;
use crate::error::{RenderError, RenderResult};
use crate::output::output_ast::{Expr, IfBranch, Statement, Target};
use crate::production::{CallExpr, CallMode};
use crate::view::scope::Scope;
use crate::view::value::Value;

/// Property name to final value, in attribute order with `children` last.
pub type PropertyMap = IndexMap<String, Value>;

/// Renders components on behalf of `RenderComponent` statements.
pub trait ComponentHost {
    fn render_component(&self, name: &str, props: PropertyMap, scope: &Scope)
        -> RenderResult<Value>;
}

#[derive(Debug)]
enum Slot {
    Accumulator(Vec<Value>),
    Buffer(String),
    Value(Value),
}

#[derive(Debug, Default)]
struct PropsFrame {
    slots: IndexMap<String, Slot>,
}

impl PropsFrame {
    fn into_property_map(self) -> PropertyMap {
        self.slots
            .into_iter()
            .map(|(name, slot)| {
                let value = match slot {
                    Slot::Value(value) => value,
                    Slot::Accumulator(parts) => create_property(&name, parts),
                    Slot::Buffer(html) => Value::Html(html),
                };
                (name, value)
            })
            .collect()
    }
}

pub struct Interpreter<'h> {
    host: &'h dyn ComponentHost,
    scope: Scope,
    frames: SmallVec<[PropsFrame; 4]>,
    page: String,
}

impl<'h> Interpreter<'h> {
    pub fn new(host: &'h dyn ComponentHost, scope: Scope) -> Self {
        Interpreter {
            host,
            scope,
            frames: SmallVec::new(),
            page: String::new(),
        }
    }

    /// Executes `statements` and returns the page buffer.
    pub fn run(mut self, statements: &[Statement]) -> RenderResult<String> {
        self.execute_all(statements)?;
        Ok(self.page)
    }

    fn execute_all(&mut self, statements: &[Statement]) -> RenderResult<()> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Statement) -> RenderResult<()> {
        match stmt {
            Statement::Append { target, value } => self.append(target, value),
            Statement::If {
                branches,
                otherwise,
            } => self.execute_if(branches, otherwise.as_deref()),
            Statement::Loop { over, body } => {
                let items = self.eval_call(&object(over)).items();
                let total = items.len();
                for (index, item) in items.into_iter().enumerate() {
                    self.scope.push_iteration(item, index, total);
                    let result = self.execute_all(body);
                    self.scope.pop();
                    result?;
                }
                Ok(())
            }
            Statement::With { scope, body } => {
                let item = self.eval_call(&object(scope));
                self.scope.push(item);
                let result = self.execute_all(body);
                self.scope.pop();
                result
            }
            Statement::BeginProps => {
                self.frames.push(PropsFrame::default());
                Ok(())
            }
            Statement::InitProperty { name } => {
                self.frame_mut()?
                    .slots
                    .insert(name.clone(), Slot::Accumulator(Vec::new()));
                Ok(())
            }
            Statement::CreateProperty { name } => {
                let frame = self.frame_mut()?;
                let parts = match frame.slots.get_mut(name) {
                    Some(Slot::Accumulator(parts)) => std::mem::take(parts),
                    _ => return Err(invalid(format!("property \"{}\" was not initialized", name))),
                };
                frame
                    .slots
                    .insert(name.clone(), Slot::Value(create_property(name, parts)));
                Ok(())
            }
            Statement::InitChildren => {
                self.frame_mut()?
                    .slots
                    .insert(CHILDREN_PROPERTY.to_string(), Slot::Buffer(String::new()));
                Ok(())
            }
            Statement::SealChildren => {
                let frame = self.frame_mut()?;
                let html = match frame.slots.get_mut(CHILDREN_PROPERTY) {
                    Some(Slot::Buffer(html)) => std::mem::take(html),
                    _ => return Err(invalid("children buffer was not initialized".to_string())),
                };
                frame
                    .slots
                    .insert(CHILDREN_PROPERTY.to_string(), Slot::Value(Value::Html(html)));
                Ok(())
            }
            Statement::RenderComponent { name, target } => {
                let frame = self
                    .frames
                    .pop()
                    .ok_or_else(|| invalid(format!("no properties bound for \"{}\"", name)))?;
                let rendered = self
                    .host
                    .render_component(name, frame.into_property_map(), &self.scope)?;
                self.write(target, &rendered.to_html())
            }
        }
    }

    fn execute_if(
        &mut self,
        branches: &[IfBranch],
        otherwise: Option<&[Statement]>,
    ) -> RenderResult<()> {
        for branch in branches {
            if self.eval_call(&object(&branch.condition)).has_value() {
                return self.execute_all(&branch.body);
            }
        }
        match otherwise {
            Some(body) => self.execute_all(body),
            None => Ok(()),
        }
    }

    fn append(&mut self, target: &Target, value: &Expr) -> RenderResult<()> {
        match target {
            Target::Property(name) => {
                let value = self.eval_property_part(value);
                match self.frame_mut()?.slots.get_mut(name) {
                    Some(Slot::Accumulator(parts)) => {
                        parts.push(value);
                        Ok(())
                    }
                    _ => Err(invalid(format!("property \"{}\" was not initialized", name))),
                }
            }
            Target::Page | Target::Children => {
                let html = match value {
                    Expr::Literal(text) => text.clone(),
                    Expr::Call(call) => self.eval_call(call).to_html(),
                };
                self.write(target, &html)
            }
        }
    }

    fn write(&mut self, target: &Target, html: &str) -> RenderResult<()> {
        match target {
            Target::Page => {
                self.page.push_str(html);
                Ok(())
            }
            Target::Children => match self.frame_mut()?.slots.get_mut(CHILDREN_PROPERTY) {
                Some(Slot::Buffer(buffer)) => {
                    buffer.push_str(html);
                    Ok(())
                }
                _ => Err(invalid("children buffer was not initialized".to_string())),
            },
            Target::Property(name) => {
                // Rendered components only ever land in a text buffer.
                Err(invalid(format!("cannot render into property \"{}\"", name)))
            }
        }
    }

    /// Value pushed into a property accumulator. Calls yield the resolved
    /// value whatever their mode, so a lone lookup keeps its type and
    /// identity; casting only happens when writing to a string buffer.
    fn eval_property_part(&self, expr: &Expr) -> Value {
        match expr {
            Expr::Literal(text) => Value::Text(text.clone()),
            Expr::Call(call) => self.scope.resolve(&call.steps),
        }
    }

    fn eval_call(&self, call: &CallExpr) -> Value {
        let value = self.scope.resolve(&call.steps);
        match call.mode {
            CallMode::Render => Value::Html(value.to_html()),
            CallMode::Object => value,
        }
    }

    fn frame_mut(&mut self) -> RenderResult<&mut PropsFrame> {
        self.frames
            .last_mut()
            .ok_or_else(|| invalid("no property map is bound".to_string()))
    }
}

fn object(call: &CallExpr) -> CallExpr {
    call.clone().with_mode(CallMode::Object)
}

fn invalid(message: String) -> RenderError {
    RenderError::InvalidProgram(message)
}
