//! Viewer
//!
//! The host renderer seen from the component resolver: picks the first
//! candidate path that exists, compiles it and executes it against a data
//! context.

use std::rc::Rc;

use crate::error::{RenderError, RenderResult};
use crate::output::output_ast::Statement;
use crate::view::interpreter::{ComponentHost, Interpreter};
use crate::view::loader::TemplateLoader;
use crate::view::scope::Scope;
use crate::view::template_parser::parse_template;
use crate::view::value::Value;

/// A resolved, compiled template.
#[derive(Debug, Clone)]
pub struct TemplateHandle {
    pub path: String,
    pub statements: Rc<Vec<Statement>>,
}

pub trait TemplateHost {
    /// First candidate that names an existing template, compiled.
    fn resolve_template(&self, candidates: &[String]) -> RenderResult<Option<TemplateHandle>>;

    /// Runs `template` with `context` as the only data in scope.
    fn execute(
        &self,
        template: &TemplateHandle,
        context: Value,
        components: &dyn ComponentHost,
    ) -> RenderResult<String>;
}

#[derive(Debug)]
pub struct Viewer<L: TemplateLoader> {
    loader: L,
}

impl<L: TemplateLoader> Viewer<L> {
    pub fn new(loader: L) -> Self {
        Viewer { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: TemplateLoader> TemplateHost for Viewer<L> {
    fn resolve_template(&self, candidates: &[String]) -> RenderResult<Option<TemplateHandle>> {
        let Some(path) = candidates.iter().find(|c| self.loader.exists(c)) else {
            return Ok(None);
        };
        let source = self.loader.load(path)?;
        let statements = parse_template(&source).map_err(|err| RenderError::Template {
            path: path.clone(),
            source: err,
        })?;
        Ok(Some(TemplateHandle {
            path: path.clone(),
            statements: Rc::new(statements),
        }))
    }

    fn execute(
        &self,
        template: &TemplateHandle,
        context: Value,
        components: &dyn ComponentHost,
    ) -> RenderResult<String> {
        Interpreter::new(components, Scope::new(context)).run(&template.statements)
    }
}
