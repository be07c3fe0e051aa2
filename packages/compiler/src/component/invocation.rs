//! Component Invocation Compiler
//!
//! Compiles one `<:Component>` tag into statements that build a property
//! map, attach the inner markup as `children` and render the component into
//! the page buffer.

use indexmap::IndexMap;

use crate::component::property::normalize_property;
use crate::component::value_assembler::assemble_property;
use crate::error::{CompileError, Result};
use crate::output::abstract_emitter;
use crate::output::output_ast::{retarget_all, Statement, Target};
use crate::production::{ChildrenProduction, TagProduction};
use crate::util::strip_quotes;

pub const CHILDREN_PROPERTY: &str = "children";

/// Generated code for one tag occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledInvocation {
    pub component: String,
    pub statements: Vec<Statement>,
}

impl CompiledInvocation {
    pub fn to_source(&self) -> String {
        abstract_emitter::to_source(&self.statements)
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

pub fn compile_component(tag: &TagProduction) -> Result<CompiledInvocation> {
    let component = tag.name.as_str();

    // A repeated attribute keeps its first position and its last value.
    let mut properties: IndexMap<String, Vec<Statement>> = IndexMap::new();
    for attribute in &tag.attributes {
        let property = strip_quotes(&attribute.name);
        let appends = assemble_property(component, property, attribute)?;
        properties.insert(property.to_string(), normalize_property(property, appends));
    }

    if let Some(children) = tag.children.as_ref().filter(|c| !c.is_empty()) {
        if properties.contains_key(CHILDREN_PROPERTY) {
            return Err(CompileError::ChildrenCollision {
                component: component.to_string(),
                line: tag.line,
            });
        }
        properties.insert(CHILDREN_PROPERTY.to_string(), compile_children(children));
    }

    let mut statements = vec![Statement::BeginProps];
    for (_, property_statements) in properties {
        statements.extend(property_statements);
    }
    statements.push(Statement::RenderComponent {
        name: component.to_string(),
        target: Target::Page,
    });

    Ok(CompiledInvocation {
        component: component.to_string(),
        statements,
    })
}

fn compile_children(children: &ChildrenProduction) -> Vec<Statement> {
    let mut body = children.statements.clone();
    retarget_all(&mut body, &Target::Children);

    let mut statements = Vec::with_capacity(body.len() + 2);
    statements.push(Statement::InitChildren);
    statements.extend(body);
    statements.push(Statement::SealChildren);
    statements
}
