use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dk", about = concat!("[#] docket v", env!("CARGO_PKG_VERSION"), " - track your applications from the keyboard"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one tracker command non-interactively
    Run(RunArgs),
    /// Print the tracked applications
    List,
    /// Print counts by completion, status and priority
    Stats,
}

#[derive(Args)]
pub struct RunArgs {
    /// The command line to execute, e.g. `add c/Stripe p/Backend d/2026-03-01`
    #[arg(required = true, trailing_var_arg = true)]
    pub line: Vec<String>,
}
