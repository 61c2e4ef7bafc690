use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use sharpscan::ClassDecl;
use sharpscan::lexer::Lexer;
use sharpscan::lexer::token::Token;

#[derive(Parser)]
#[command(name = "sharpscan", version, about = "List the classes declared in C# scripts")]
struct Cli {
    /// Log skipped generic classes (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files or directories for class declarations
    Scan {
        /// Source files, or directories to search recursively
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Extension of the files collected from directories
        #[arg(long, default_value = "cs")]
        extension: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the token stream of a source file, one token per line
    Tokens {
        /// Source file path
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    classes: Vec<ClassDecl>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(1);
}

fn read_or_exit(path: &std::path::Path) -> String {
    sharpscan::read_source(path).unwrap_or_else(|err| {
        eprintln!("error [{}]: {err}", err.path().display());
        std::process::exit(1);
    })
}

fn scan_paths(paths: &[PathBuf], extension: &str) -> Vec<FileReport> {
    let mut reports = Vec::new();
    for root in paths {
        let files = sharpscan::collect_sources(root, extension).unwrap_or_else(|err| {
            eprintln!("error [{}]: {err}", err.path().display());
            std::process::exit(1);
        });

        for file in files {
            let source = read_or_exit(&file);
            let filename = file.to_string_lossy().to_string();
            match sharpscan::scan_source(&source) {
                Ok(classes) => reports.push(FileReport { path: filename, classes }),
                Err(err) => {
                    if sharpscan::diagnostics::render_error(&source, &filename, &err).is_err() {
                        eprintln!("error [{filename}]: {err}");
                    }
                    std::process::exit(1);
                }
            }
        }
    }
    reports
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        for class in &report.classes {
            let mut line = format!("{}: {}", report.path, class.full_name());
            if !class.base.is_empty() {
                line.push_str(" : ");
                line.push_str(&class.base.join(", "));
            }
            if class.nested {
                line.push_str(" (nested)");
            }
            println!("{line}");
        }
    }
}

fn main() {
    let cli = Cli::parse();
    sharpscan::init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan { paths, extension, format } => {
            let reports = scan_paths(&paths, &extension);
            match format {
                Format::Text => print_text(&reports),
                Format::Json => match serde_json::to_string_pretty(&reports) {
                    Ok(json) => println!("{json}"),
                    Err(e) => fail(format!("failed to encode report: {e}")),
                },
            }
        }
        Commands::Tokens { file } => {
            let source = read_or_exit(&file);
            let mut lexer = Lexer::new(&source);
            loop {
                match lexer.next_token() {
                    Ok(Token::Eof) => break,
                    Ok(token) => println!("{}: {token}", lexer.line()),
                    Err(err) => fail(err),
                }
            }
        }
    }
}
