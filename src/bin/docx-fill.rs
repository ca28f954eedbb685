//! docx-fill CLI - fill WordprocessingML templates from JSON or YAML content

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use docx_template::{
    diagnostics::{check_template, format_diagnostics, report},
    fill_document,
    loading::load_content_file,
    Document, FillOptions, TemplateError, TemplateResult,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "docx-fill")]
#[command(version)]
#[command(about = "Fill content controls and repeating tables in word/document.xml", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Template XML part (reads from stdin if not provided)
    template: Option<String>,

    /// Content file (.json, .yaml or .yml) holding the list of items
    #[arg(short, long)]
    content: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Replace filled content controls with their content
    #[arg(long)]
    remove_wrappers: bool,

    /// Strict mode: exit with error if any item could not be filled
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress diagnostics on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Lint a template for controls that cannot be filled
    Check {
        /// Template XML part to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let _ = env_logger::builder()
        .filter_module("docx_template", log::LevelFilter::Error)
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            2
        }
    };
    std::process::exit(code);
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> TemplateResult<i32> {
    if let Some(Commands::Check { input, no_color }) = cli.command {
        let doc = Document::parse(&read_input(input.as_deref())?)?;
        let result = check_template(&doc);
        println!("{}", format_diagnostics(&result, !no_color));
        return Ok(if result.has_errors() { 1 } else { 0 });
    }

    let Some(content) = cli.content.as_deref() else {
        return Err(TemplateError::invalid_content(
            "no content file given, pass --content FILE",
        ));
    };
    let items = load_content_file(content)?;
    let mut doc = Document::parse(&read_input(cli.template.as_deref())?)?;

    let options = FillOptions::new().with_remove_wrapper(cli.remove_wrappers);
    let result = fill_document(&mut doc, &items, options);
    let xml = doc.to_xml()?;

    let check = report(&result);
    if !cli.quiet && !check.is_empty() {
        eprintln!("{}", format_diagnostics(&check, !cli.no_color));
    }

    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            file.write_all(xml.as_bytes())?;
            if result.success() {
                eprintln!("✓ Output written to: {}", path);
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} error(s))",
                    path,
                    result.errors().len()
                );
            }
        }
        None => {
            print!("{}", xml);
        }
    }

    if cli.strict && !result.success() {
        eprintln!(
            "Error: {} item error(s) in strict mode",
            result.errors().len()
        );
        return Ok(1);
    }

    Ok(0)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install docx-template --features cli");
    eprintln!("  docx-fill [OPTIONS] --content FILE [TEMPLATE_XML]");
}
