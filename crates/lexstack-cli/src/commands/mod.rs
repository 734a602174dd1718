mod check;
mod tokens;

/// Subcommands for the CLI.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Tokenize text files with a rule table.
    Tokens(tokens::TokensArgs),

    /// Build a rule table and report its shape.
    Check(check::CheckArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Tokens(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}
