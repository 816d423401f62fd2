//! Nimini CLI
//!
//! Runs and inspects Nimini scripts.

use niminic::commands::{lex_file, parse_file, run_file};
use niminic::Problem;

fn main() {
    niminic::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: nimini run <file.nim>");
                std::process::exit(1);
            };
            exit_on_problem(path, run_file(path, nimini_eval::stdout_handler()));
        }
        "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: nimini parse <file.nim>");
                std::process::exit(1);
            };
            print!("{}", exit_on_problem(path, parse_file(path)));
        }
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: nimini lex <file.nim>");
                std::process::exit(1);
            };
            print!("{}", exit_on_problem(path, lex_file(path)));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("nimini {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare script path runs it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("nim"))
            {
                exit_on_problem(command, run_file(command, nimini_eval::stdout_handler()));
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

/// Unwrap a command result, or report the problem and exit with status 1.
fn exit_on_problem<T>(path: &str, result: Result<T, Problem>) -> T {
    match result {
        Ok(value) => value,
        Err(problem) => {
            eprintln!("{}", problem.render(path));
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Nimini scripting language");
    println!();
    println!("Usage: nimini <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.nim>       Run a script");
    println!("  parse <file.nim>     Parse and display the syntax tree");
    println!("  lex <file.nim>       Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable interpreter tracing (e.g. RUST_LOG=nimini_eval=debug)");
    println!("  NIMINI_LOG_TREE      Render traced calls as an indented tree");
    println!();
    println!("Examples:");
    println!("  nimini run hello.nim");
    println!("  nimini hello.nim                # same as `run`");
    println!("  nimini parse hello.nim");
}
