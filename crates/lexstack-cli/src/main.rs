mod commands;
mod input_output;
mod logging;
mod table_selector;

use clap::Parser;
use commands::Commands;

/// lexstack: stateful regex lexer.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
