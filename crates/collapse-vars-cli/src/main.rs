mod args;
mod driver;
mod error;

use std::fs;
use std::io::{self, Read, Write};

use clap::Parser;
use collapse_vars_ast::Node;

use args::Args;
use error::Error;

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("collapse-vars: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let text = read_input(args.input.as_deref())?;
    let mut root: Node = serde_json::from_str(&text)?;

    driver::optimize_document(&mut root, args.stats);

    let rendered = serde_json::to_string_pretty(&root).expect("Node always serializes");
    write_output(args.output.as_deref(), &rendered)
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, Error> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| Error::Read {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&std::path::Path>, contents: &str) -> Result<(), Error> {
    match path {
        Some(path) => fs::write(path, contents).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            io::stdout()
                .write_all(contents.as_bytes())
                .and_then(|_| io::stdout().write_all(b"\n"))
                .map_err(|source| Error::Write {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}
