//! cxpc — parse a single expression file and print its tree.
//!
//! Usage: `cxpc <file>`. On success the tree is pretty-printed to stdout;
//! on failure the rendered error goes to stderr, with a line/column
//! location when the parser recorded a byte offset.

use std::path::Path;
use std::process::ExitCode;

use cxp_parse::{parse_expression, ParseError};
use cxp_scan::{FileSource, ScanBuffer, Scanner};

mod tracing_setup;

fn main() -> ExitCode {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: cxpc <file>");
        return ExitCode::from(2);
    }
    run(Path::new(&args[1]))
}

fn run(path: &Path) -> ExitCode {
    let source = match FileSource::open(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let buffer = match ScanBuffer::new(Box::new(source)) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut scanner = Scanner::new(buffer);

    match parse_expression(&mut scanner) {
        Ok(tree) => {
            println!("{:#?}", tree.root());
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let ParseError::Syntax { pos: Some(pos), .. } = err {
                let (line, col) = scanner.linecol(pos);
                eprintln!("{err} (line {line}, col {col})");
            } else {
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}
