//! Quill CLI

use quillc::commands::{complete_file, lex_file, parse_file, parse_position, signature_file};

fn main() {
    quillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: quill lex <file.py>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: quill parse <file.py>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "complete" => {
            if args.len() < 5 {
                eprintln!("Usage: quill complete <file.py> <line> <column>");
                std::process::exit(1);
            }
            let position = position_or_exit(&args[3], &args[4]);
            complete_file(&args[2], position);
        }
        "signature" => {
            let mut cached = true;
            let mut positional = Vec::new();
            for arg in args.iter().skip(2) {
                if arg == "--no-cache" {
                    cached = false;
                } else {
                    positional.push(arg.as_str());
                }
            }
            let [path, line, column] = positional[..] else {
                eprintln!("Usage: quill signature <file.py> <line> <column> [--no-cache]");
                std::process::exit(1);
            };
            let position = position_or_exit(line, column);
            signature_file(path, position, cached);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Quill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn position_or_exit(line: &str, column: &str) -> quill_ir::Position {
    match parse_position(line, column) {
        Ok(position) => position,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Quill cursor-context engine");
    println!();
    println!("Usage: quill <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.py>                        Tokenize and display tokens");
    println!("  parse <file.py>                      Parse and display the syntax tree");
    println!("  complete <file.py> <line> <col>      Keywords and tokens allowed at a cursor");
    println!("  signature <file.py> <line> <col>     The open call around a cursor");
    println!("  help                                 Show this help message");
    println!("  version                              Show version information");
    println!();
    println!("Lines start at 1, columns at 0.");
    println!();
    println!("Signature options:");
    println!("  --no-cache          Compute the signature without the cache");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=quill_context=debug) to trace a request.");
}
