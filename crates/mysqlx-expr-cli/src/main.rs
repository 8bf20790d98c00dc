//! mysqlx-expr CLI - Command line front end for the expression parser

use std::fmt::Display;
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand, ValueEnum};

use mysqlx_expr_ast::{Diagnostic, Unparse};
use mysqlx_expr_lexer::tokenize;
use mysqlx_expr_parser::{
    parse_expression, parse_expression_with, parse_order_by, parse_projection, ParseMode,
    ParseOptions, PlaceholderRegistry,
};

const SOURCE_ID: &str = "<expr>";

#[derive(Parser)]
#[command(name = "mysqlx-expr")]
#[command(about = "X DevAPI expression parser and unparser", long_about = None)]
struct Cli {
    /// Print errors as plain caret diagnostics instead of labelled reports
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and output the tree as JSON
    Parse {
        expr: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Parse an expression and print its canonical text
    Unparse {
        expr: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,
    },
    /// Show the token stream of an expression
    Tokens { expr: String },
    /// Parse a projection list (`expr [AS alias], ...`)
    Projection {
        expr: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,
    },
    /// Parse a sort list (`expr [ASC|DESC], ...`)
    OrderBy {
        expr: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,
    },
    /// Interactive REPL
    Repl {
        #[arg(short, long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Identifiers are document paths
    Document,
    /// Identifiers are schema.table.column references
    Table,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Document => ParseMode::Document,
            Mode::Table => ParseMode::Table,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let plain = cli.plain;

    match cli.command {
        Commands::Parse { expr, mode, pretty } => cmd_parse(&expr, mode, pretty, plain),
        Commands::Unparse { expr, mode } => cmd_unparse(&expr, mode, plain),
        Commands::Tokens { expr } => cmd_tokens(&expr, plain),
        Commands::Projection { expr, mode } => cmd_projection(&expr, mode, plain),
        Commands::OrderBy { expr, mode } => cmd_order_by(&expr, mode, plain),
        Commands::Repl { mode } => cmd_repl(mode),
    }
}

fn cmd_parse(source: &str, mode: Mode, pretty: bool, plain: bool) {
    let expr = match parse_expression(source, mode.into()) {
        Ok(expr) => expr,
        Err(e) => fail(source, &e, plain),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&expr)
    } else {
        serde_json::to_string(&expr)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing tree: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_unparse(source: &str, mode: Mode, plain: bool) {
    match parse_expression(source, mode.into()) {
        Ok(expr) => print_canonical(&expr),
        Err(e) => fail(source, &e, plain),
    }
}

fn cmd_tokens(source: &str, plain: bool) {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => fail(source, &e, plain),
    };

    for token in tokens {
        println!("{:>4}  {:<14} {}", token.offset(), format!("{:?}", token.kind), token.text);
    }
}

fn cmd_projection(source: &str, mode: Mode, plain: bool) {
    let mut registry = PlaceholderRegistry::new();
    match parse_projection(source, mode.into(), &mut registry) {
        Ok(items) => print_canonical(items.as_slice()),
        Err(e) => fail(source, &e, plain),
    }
}

fn cmd_order_by(source: &str, mode: Mode, plain: bool) {
    let mut registry = PlaceholderRegistry::new();
    match parse_order_by(source, mode.into(), &mut registry) {
        Ok(items) => print_canonical(items.as_slice()),
        Err(e) => fail(source, &e, plain),
    }
}

fn cmd_repl(mode: Mode) {
    use rustyline::DefaultEditor;

    println!("mysqlx-expr REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create REPL: {}", e);
            process::exit(1);
        }
    };
    let mut mode: ParseMode = mode.into();
    let mut registry = PlaceholderRegistry::new();

    loop {
        let line = match rl.readline("mysqlx> ") {
            Ok(line) => line,
            Err(_) => break,
        };
        let _ = rl.add_history_entry(&line);
        let trimmed = line.trim();

        if trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" => break,
                ":help" | ":h" => {
                    println!("Commands:");
                    println!("  :mode document|table  - Switch identifier dialect");
                    println!("  :placeholders         - Show placeholder names by position");
                    println!("  :reset                - Forget placeholder names");
                    println!("  :quit                 - Exit REPL");
                    println!("Any other line is parsed and printed in canonical form.");
                }
                ":mode document" => {
                    mode = ParseMode::Document;
                    println!("Document mode");
                }
                ":mode table" => {
                    mode = ParseMode::Table;
                    println!("Table mode");
                }
                ":placeholders" => {
                    if registry.is_empty() {
                        println!("No placeholders");
                    }
                    for (position, name) in registry.names().iter().enumerate() {
                        println!("  :{} = {}", position, name);
                    }
                }
                ":reset" => {
                    registry = PlaceholderRegistry::new();
                    println!("Cleared");
                }
                _ => println!("Unknown command. Type :help for help."),
            }
        } else if !trimmed.is_empty() {
            match parse_expression_with(trimmed, ParseOptions::new(mode), &mut registry) {
                Ok(expr) => match expr.unparse() {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("Unparse error: {}", e),
                },
                Err(e) => eprintln!("{}", e.format(trimmed)),
            }
        }
    }

    println!("Goodbye!");
}

fn print_canonical<T: Unparse + ?Sized>(node: &T) {
    match node.unparse() {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Unparse error: {}", e);
            process::exit(1);
        }
    }
}

fn fail<E: Diagnostic + Display>(source: &str, error: &E, plain: bool) -> ! {
    if plain {
        eprintln!("{}", error.format(source));
    } else {
        report_error(source, error);
    }
    process::exit(1);
}

fn report_error<E: Diagnostic + Display>(source: &str, error: &E) {
    // ariadne counts characters, spans count bytes
    let to_char = |offset: usize| source.get(..offset).map_or(offset, |s| s.chars().count());
    let span = error.span();
    let start = to_char(span.start);
    let end = to_char(span.end).max(start + 1);

    let printed = Report::build(ReportKind::Error, SOURCE_ID, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((SOURCE_ID, start..end))
                .with_message(error.message())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((SOURCE_ID, Source::from(source)));

    if printed.is_err() {
        eprintln!("{}", error.format(source));
    }
}
