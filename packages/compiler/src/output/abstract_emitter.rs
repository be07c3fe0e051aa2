//! Abstract Emitter Module
//!
//! Prints [`Statement`] lists as source text in the host dialect. Output is a
//! pure function of the statements, so compiling the same tag twice yields
//! byte-identical code.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::output_ast::{Expr, IfBranch, Statement, Target};
use crate::production::{CallExpr, CallMode, LookupStep};

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap());
const INDENT_WITH: &str = "  ";

const PROPS_VAR: &str = "props";
const PAGE_VAR: &str = "page";

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map_or(true, |l| l.parts.is_empty())
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn to_source(&self) -> String {
        let mut lines: &[EmittedLine] = &self.lines;
        if let Some(last) = lines.last() {
            if last.parts.is_empty() {
                lines = &lines[..lines.len() - 1];
            }
        }
        lines
            .iter()
            .map(|l| {
                if l.parts.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", INDENT_WITH.repeat(l.indent), l.parts.join(""))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Quotes a string literal for the host dialect. Backslashes and quotes are
/// escaped exactly once, so re-emitting already compiled text never stacks
/// escapes.
pub fn escape_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escaped.push('\'');
    for ch in input.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped.push('\'');
    escaped
}

/// Escapes a name for use as a member access; illegal identifiers are quoted.
pub fn escape_identifier(input: &str) -> String {
    if LEGAL_IDENTIFIER_RE.is_match(input) {
        input.to_string()
    } else {
        escape_string(input)
    }
}

fn property_slot(name: &str) -> String {
    format!("{}[{}]", PROPS_VAR, escape_string(name))
}

fn target_ref(target: &Target) -> String {
    match target {
        Target::Page => PAGE_VAR.to_string(),
        Target::Property(name) => property_slot(name),
        Target::Children => property_slot("children"),
    }
}

fn lookup_path(steps: &[LookupStep]) -> String {
    steps
        .iter()
        .map(|step| {
            let name = escape_identifier(&step.name);
            if step.args.is_empty() {
                name
            } else {
                let args: Vec<String> = step.args.iter().map(|a| escape_string(a)).collect();
                format!("{}({})", name, args.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

pub fn call_source(call: &CallExpr) -> String {
    let accessor = match call.mode {
        CallMode::Render => "val",
        CallMode::Object => "obj",
    };
    format!("scope.{}({})", accessor, lookup_path(&call.steps))
}

fn condition_source(call: &CallExpr) -> String {
    format!("scope.has({})", lookup_path(&call.steps))
}

pub fn expr_source(expr: &Expr) -> String {
    match expr {
        Expr::Literal(text) => escape_string(text),
        Expr::Call(call) => call_source(call),
    }
}

pub struct StatementEmitter;

impl StatementEmitter {
    pub fn emit_all(statements: &[Statement], ctx: &mut EmitterVisitorContext) {
        for stmt in statements {
            Self::emit(stmt, ctx);
        }
    }

    pub fn emit(stmt: &Statement, ctx: &mut EmitterVisitorContext) {
        match stmt {
            Statement::Append { target, value } => {
                let op = match target {
                    Target::Property(_) => "[] =",
                    Target::Page | Target::Children => " .=",
                };
                ctx.println(&format!(
                    "{}{} {};",
                    target_ref(target),
                    op,
                    expr_source(value)
                ));
            }
            Statement::If {
                branches,
                otherwise,
            } => Self::emit_if(branches, otherwise.as_deref(), ctx),
            Statement::Loop { over, body } => {
                ctx.println(&format!("loop ({}) {{", call_source(over)));
                Self::emit_block(body, ctx);
            }
            Statement::With { scope, body } => {
                ctx.println(&format!("with ({}) {{", call_source(scope)));
                Self::emit_block(body, ctx);
            }
            Statement::BeginProps => ctx.println(&format!("{} = [];", PROPS_VAR)),
            Statement::InitProperty { name } => {
                ctx.println(&format!("{} = [];", property_slot(name)))
            }
            Statement::CreateProperty { name } => {
                let slot = property_slot(name);
                ctx.println(&format!(
                    "{} = component.create_property({}, {});",
                    slot,
                    escape_string(name),
                    slot
                ));
            }
            Statement::InitChildren => ctx.println(&format!("{} = '';", property_slot("children"))),
            Statement::SealChildren => {
                let slot = property_slot("children");
                ctx.println(&format!("{} = html_fragment({});", slot, slot));
            }
            Statement::RenderComponent { name, target } => {
                ctx.println(&format!(
                    "{} .= component.render({}, {}, scope);",
                    target_ref(target),
                    escape_string(name),
                    PROPS_VAR
                ));
                ctx.println(&format!("unset({});", PROPS_VAR));
            }
        }
    }

    fn emit_if(
        branches: &[IfBranch],
        otherwise: Option<&[Statement]>,
        ctx: &mut EmitterVisitorContext,
    ) {
        for (i, branch) in branches.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "} else if" };
            if i > 0 {
                ctx.dec_indent();
            }
            ctx.println(&format!(
                "{} ({}) {{",
                keyword,
                condition_source(&branch.condition)
            ));
            ctx.inc_indent();
            Self::emit_all(&branch.body, ctx);
        }
        if let Some(otherwise) = otherwise {
            ctx.dec_indent();
            ctx.println("} else {");
            ctx.inc_indent();
            Self::emit_all(otherwise, ctx);
        }
        ctx.dec_indent();
        ctx.println("}");
    }

    fn emit_block(body: &[Statement], ctx: &mut EmitterVisitorContext) {
        ctx.inc_indent();
        Self::emit_all(body, ctx);
        ctx.dec_indent();
        ctx.println("}");
    }
}

/// Prints statements as standalone host source.
pub fn to_source(statements: &[Statement]) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    StatementEmitter::emit_all(statements, &mut ctx);
    ctx.to_source()
}
