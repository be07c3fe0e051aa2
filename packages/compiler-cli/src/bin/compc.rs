/**
 * Component Compiler CLI - compc
 *
 * Compiles `<:Component>` tag productions and renders components.
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process;

use component_compiler_cli::logging::{ConsoleLogger, LogLevel, Logger};
use component_compiler_cli::perform_compile::perform_compile;
use component_compiler_cli::perform_render::{perform_render, read_props_arg, RenderOptions};

fn cli() -> Command {
    Command::new("compc")
        .version(component_compiler_cli::version())
        .about("Component tag compiler and renderer")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print debug output"),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile tag-production JSON files and print the generated code")
                .arg(
                    Arg::new("files")
                        .value_name("GLOB")
                        .required(true)
                        .num_args(1..)
                        .help("Files or glob patterns of tag productions"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a component from a template directory")
                .arg(
                    Arg::new("component")
                        .value_name("NAME")
                        .required(true)
                        .help("Component name"),
                )
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .value_name("DIR")
                        .default_value(".")
                        .help("Template directory"),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("PATH")
                        .help("JSON file with componentPaths"),
                )
                .arg(
                    Arg::new("props")
                        .short('p')
                        .long("props")
                        .value_name("JSON")
                        .help("Properties as a JSON object, or @file.json"),
                ),
        )
}

fn run_compile(matches: &ArgMatches, logger: &dyn Logger) -> i32 {
    let patterns: Vec<String> = matches
        .get_many::<String>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let report = perform_compile(&patterns, logger);
    for file in &report.files {
        logger.debug(&format!("// {}", file.path.display()));
        println!("{}", file.source);
    }
    for diag in &report.diagnostics {
        logger.error(diag);
    }
    if report.has_errors() {
        1
    } else {
        0
    }
}

fn run_render(matches: &ArgMatches, logger: &dyn Logger) -> anyhow::Result<()> {
    let component = matches
        .get_one::<String>("component")
        .map(String::as_str)
        .unwrap_or_default();
    let props = match matches.get_one::<String>("props") {
        Some(arg) => Some(read_props_arg(arg)?),
        None => None,
    };
    let options = RenderOptions {
        root: matches
            .get_one::<String>("root")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        config: matches.get_one::<String>("config").map(PathBuf::from),
        props,
    };
    let html = perform_render(component, &options, logger)?;
    println!("{}", html);
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    let logger = ConsoleLogger::new(LogLevel::from_verbose(matches.get_flag("verbose")));

    let code = match matches.subcommand() {
        Some(("compile", sub)) => run_compile(sub, &logger),
        Some(("render", sub)) => match run_render(sub, &logger) {
            Ok(()) => 0,
            Err(e) => {
                logger.error(&format!("{:#}", e));
                1
            }
        },
        _ => 2,
    };
    process::exit(code);
}
