//! Template Parser
//!
//! Compiles component template source into host statements. Recognizes
//! markup text, `$Name.Path` / `{$Name}` interpolation, method calls with
//! quoted arguments, and the `if` / `loop` / `with` blocks. Component tags
//! are not part of this syntax.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CompileError, Result};
use crate::output::output_ast::{Expr, IfBranch, Statement, Target};
use crate::production::{CallExpr, CallMode, LookupStep};

const PATH: &str = r"[A-Za-z_][A-Za-z0-9_]*(?:\([^)]*\))?(?:\.[A-Za-z_][A-Za-z0-9_]*(?:\([^)]*\))?)*";

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)(?P<comment><%--.*?--%>)|<%\s*(?P<kw>[a-z_]+)\s*(?P<arg>.*?)\s*%>|\{{\$(?P<braced>{path})\}}|\$(?P<bare>{path})",
        path = PATH
    ))
    .unwrap()
});

static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:\((?P<args>[^)]*)\))?$").unwrap()
});

static ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^,\s]+)"#).unwrap());

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Variable(CallExpr),
    Block {
        keyword: String,
        arg: String,
        line: usize,
    },
}

/// Compiles template source into statements appending to the page buffer.
pub fn parse_template(source: &str) -> Result<Vec<Statement>> {
    let tokens = tokenize(source)?;
    let mut parser = TemplateParser { tokens, pos: 0 };
    let (statements, _) = parser.parse_until(&[], None)?;
    Ok(statements)
}

/// Parses `$Field.method("a", "b")` (with or without `$`) into a lookup.
pub fn parse_lookup(path: &str, mode: CallMode) -> Option<CallExpr> {
    let path = path.trim().trim_start_matches('$');
    let path = path
        .strip_prefix('{')
        .and_then(|p| p.strip_suffix('}'))
        .map(|p| p.trim_start_matches('$'))
        .unwrap_or(path);
    let steps = split_segments(path)
        .into_iter()
        .map(parse_segment)
        .collect::<Option<Vec<_>>>()?;
    if steps.is_empty() {
        return None;
    }
    Some(CallExpr { steps, mode })
}

fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in path.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}

fn parse_segment(segment: &str) -> Option<LookupStep> {
    let caps = SEGMENT_RE.captures(segment.trim())?;
    let args = caps
        .name("args")
        .map(|a| {
            ARG_RE
                .captures_iter(a.as_str())
                .filter_map(|c| {
                    c.name("dq")
                        .or_else(|| c.name("sq"))
                        .or_else(|| c.name("bare"))
                        .map(|m| m.as_str().to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    Some(LookupStep {
        name: caps["name"].to_string(),
        args,
    })
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in TOKEN_RE.captures_iter(source) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        if whole.start > last {
            tokens.push(Token::Text(source[last..whole.start].to_string()));
        }
        last = whole.end;

        if caps.name("comment").is_some() {
            continue;
        }
        let line = line_at(source, whole.start);
        if let Some(kw) = caps.name("kw") {
            tokens.push(Token::Block {
                keyword: kw.as_str().to_string(),
                arg: caps.name("arg").map_or("", |m| m.as_str()).to_string(),
                line,
            });
            continue;
        }
        let path = caps
            .name("braced")
            .or_else(|| caps.name("bare"))
            .map_or("", |m| m.as_str());
        let call = parse_lookup(path, CallMode::Render).ok_or_else(|| CompileError::Syntax {
            message: format!("Malformed variable \"${}\"", path),
            line,
        })?;
        tokens.push(Token::Variable(call));
    }
    if last < source.len() {
        tokens.push(Token::Text(source[last..].to_string()));
    }
    Ok(tokens)
}

struct TemplateParser {
    tokens: Vec<Token>,
    pos: usize,
}

/// The block tag that ended a nested parse.
struct Terminator {
    keyword: String,
    arg: String,
    line: usize,
}

impl TemplateParser {
    fn parse_until(
        &mut self,
        terminators: &[&str],
        opener: Option<(&str, usize)>,
    ) -> Result<(Vec<Statement>, Option<Terminator>)> {
        let mut statements = Vec::new();
        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;
            match token {
                Token::Text(text) => {
                    statements.push(Statement::append_literal(Target::Page, text));
                }
                Token::Variable(call) => {
                    statements.push(Statement::append(Target::Page, Expr::Call(call)));
                }
                Token::Block { keyword, arg, line } => {
                    if terminators.contains(&keyword.as_str()) {
                        return Ok((statements, Some(Terminator { keyword, arg, line })));
                    }
                    statements.push(self.parse_block(&keyword, &arg, line)?);
                }
            }
        }
        match opener {
            Some((name, line)) => Err(CompileError::Syntax {
                message: format!("Missing <% end_{} %> for <% {} %>", name, name),
                line,
            }),
            None => Ok((statements, None)),
        }
    }

    fn parse_block(&mut self, keyword: &str, arg: &str, line: usize) -> Result<Statement> {
        match keyword {
            "if" => self.parse_if(arg, line),
            "loop" => {
                let over = subject(arg, keyword, line)?;
                let (body, _) = self.parse_until(&["end_loop"], Some(("loop", line)))?;
                Ok(Statement::Loop { over, body })
            }
            "with" => {
                let scope = subject(arg, keyword, line)?;
                let (body, _) = self.parse_until(&["end_with"], Some(("with", line)))?;
                Ok(Statement::With { scope, body })
            }
            other => Err(CompileError::Syntax {
                message: format!("Unexpected <% {} %>", other),
                line,
            }),
        }
    }

    fn parse_if(&mut self, arg: &str, line: usize) -> Result<Statement> {
        let mut branches = Vec::new();
        let mut condition = subject(arg, "if", line)?;
        loop {
            let (body, terminator) =
                self.parse_until(&["else_if", "else", "end_if"], Some(("if", line)))?;
            branches.push(IfBranch { condition, body });
            // `parse_until` with an opener only returns Ok with a terminator.
            let Some(terminator) = terminator else {
                return Ok(Statement::If {
                    branches,
                    otherwise: None,
                });
            };
            match terminator.keyword.as_str() {
                "else_if" => {
                    condition = subject(&terminator.arg, "else_if", terminator.line)?;
                }
                "else" => {
                    let (otherwise, _) = self.parse_until(&["end_if"], Some(("if", line)))?;
                    return Ok(Statement::If {
                        branches,
                        otherwise: Some(otherwise),
                    });
                }
                _ => {
                    return Ok(Statement::If {
                        branches,
                        otherwise: None,
                    })
                }
            }
        }
    }
}

fn subject(arg: &str, keyword: &str, line: usize) -> Result<CallExpr> {
    parse_lookup(arg, CallMode::Object).ok_or_else(|| CompileError::Syntax {
        message: format!("Malformed <% {} %> argument \"{}\"", keyword, arg),
        line,
    })
}
