//! Fixer token inspector CLI
//!
//! Loads a source file into a token collection and prints what fixer rules
//! would see: the slot dump, the found-kind counts, or the matched blocks.

mod commands;

use commands::{check_round_trip, dump_file, list_blocks, list_kinds};

fn main() {
    commands::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "dump" | "kinds" | "blocks" | "roundtrip" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: fixc {command} <file.php>");
                std::process::exit(1);
            };
            let ok = match command.as_str() {
                "dump" => dump_file(path),
                "kinds" => list_kinds(path),
                "blocks" => list_blocks(path),
                _ => check_round_trip(path),
            };
            if !ok {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("fixc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Fixer token inspector");
    println!();
    println!("Usage: fixc <command> <file.php>");
    println!();
    println!("Commands:");
    println!("  dump <file>       Print every slot as JSON");
    println!("  kinds <file>      Count tokens per kind");
    println!("  blocks <file>     List matched block edges");
    println!("  roundtrip <file>  Check that rendering reproduces the file");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=<filter>    Enable tracing output (e.g. RUST_LOG=fix_tokens=trace)");
    println!("  FIXC_LOG_TREE=1      Render spans as an indented tree");
}
