use std::path::PathBuf;

use clap::Parser;

/// Run the optimizer over a JSON-encoded AST, reading the document from a
/// file or standard input and writing the rewritten tree back out.
#[derive(Debug, Parser)]
#[command(name = "collapse-vars", version, about)]
pub struct Args {
    /// Input AST document (JSON). Reads standard input when omitted.
    pub input: Option<PathBuf>,

    /// Where to write the rewritten AST document. Writes to standard
    /// output when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print per-function elimination counts to standard error.
    #[arg(long)]
    pub stats: bool,
}
