use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vatcheck", version, about = "NIP verification against the White List VAT registry")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file; defaults to ~/.vatcheck/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web form (default when no subcommand is given).
    Serve(ServeArgs),
    /// Check identifiers given on the command line.
    Check(CheckArgs),
    /// Verify a spreadsheet and write the results workbook.
    Batch(BatchArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Run submissions as background tasks polled via /status/{id}.
    #[arg(long)]
    pub background: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub nips: Vec<String>,

    /// Print one JSON object per line instead of tab-separated columns.
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BatchArgs {
    /// Input .xlsx: identifiers in the first column of the first sheet, from row 2.
    #[arg(long, short)]
    pub input: PathBuf,

    #[arg(long, short, default_value = "wyniki_nip.xlsx")]
    pub output: PathBuf,

    /// Hide the progress bar.
    #[arg(long)]
    pub quiet: bool,
}
