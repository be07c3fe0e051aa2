//! Perform Compile
//!
//! `compc compile`: discovers tag-production files, compiles every tag and
//! collects generated code and diagnostics per file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use serde::Deserialize;

use component_compiler::{compile_all, TagProduction};

use crate::logging::Logger;

/// A productions file holds one tag or a list of tags.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductionFile {
    Many(Vec<TagProduction>),
    One(TagProduction),
}

/// Generated code for one productions file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFile {
    pub path: PathBuf,
    pub source: String,
}

#[derive(Debug, Default)]
pub struct CompileReport {
    pub files: Vec<CompiledFile>,
    pub diagnostics: Vec<String>,
}

impl CompileReport {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Expands glob patterns into a sorted, de-duplicated file list.
pub fn discover_files(patterns: &[String], logger: &dyn Logger) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        match glob::glob(pattern) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    if entry.is_file() {
                        files.push(entry);
                    }
                }
            }
            Err(e) => logger.warn(&format!("Invalid glob pattern '{}': {}", pattern, e)),
        }
    }
    files.sort();
    files.dedup();
    files
}

pub fn load_productions(path: &Path) -> anyhow::Result<Vec<TagProduction>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: ProductionFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(match parsed {
        ProductionFile::Many(tags) => tags,
        ProductionFile::One(tag) => vec![tag],
    })
}

pub fn perform_compile(patterns: &[String], logger: &dyn Logger) -> CompileReport {
    let files = discover_files(patterns, logger);
    logger.debug(&format!("Compiling {} file(s)", files.len()));

    let loaded: Vec<(PathBuf, anyhow::Result<Vec<TagProduction>>)> = files
        .into_par_iter()
        .map(|path| {
            let productions = load_productions(&path);
            (path, productions)
        })
        .collect();

    let mut report = CompileReport::default();
    for (path, productions) in loaded {
        let tags = match productions {
            Ok(tags) => tags,
            Err(e) => {
                report.diagnostics.push(format!("{:#}", e));
                continue;
            }
        };

        let mut sources = Vec::with_capacity(tags.len());
        for (tag, result) in tags.iter().zip(compile_all(&tags)) {
            match result {
                Ok(compiled) => sources.push(compiled.to_source()),
                Err(e) => {
                    let line = e.line().or(tag.line);
                    report.diagnostics.push(match line {
                        Some(line) => format!("{}:{}: {}", path.display(), line, e),
                        None => format!("{}: {}", path.display(), e),
                    });
                }
            }
        }
        logger.debug(&format!(
            "{}: {} tag(s) compiled",
            path.display(),
            sources.len()
        ));
        report.files.push(CompiledFile {
            path,
            source: sources.join("\n"),
        });
    }
    report
}
