use std::io::Write;

use lexstack::{
    LSResult,
    SessionConfig,
    SessionSplicer,
    TextLexer,
    rayon::ParallelRayonLexer,
    tokens::{Token, check_coverage},
};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    table_selector::TableSelectorArgs,
};

/// Args for the tokens command.
#[derive(clap::Args, Debug)]
pub struct TokensArgs {
    #[command(flatten)]
    table: TableSelectorArgs,

    /// Treat the input as an interactive session transcript.
    #[arg(long)]
    session: bool,

    /// Prompt pattern for session transcripts; implies `--session`.
    #[arg(long, value_name = "RE")]
    prompt: Option<String>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl TokensArgs {
    fn is_session(&self) -> bool {
        self.session || self.prompt.is_some()
    }

    /// Run the tokens command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let table = self.table.load_table()?;
        let inputs = self.input.read_all()?;
        let texts: Vec<&str> = inputs.iter().map(|input| input.text.as_str()).collect();

        let results = if self.is_session() {
            let config = match &self.prompt {
                Some(prompt) => SessionConfig::from_prompt(prompt.as_str()),
                None => SessionConfig::default(),
            };
            let splicer = SessionSplicer::with_config(table, config)?;
            ParallelRayonLexer::new(splicer).lex_batch(&texts)
        } else {
            ParallelRayonLexer::new(table).lex_batch(&texts)
        };

        let mut writer = self.output.open_writer()?;
        let headers = inputs.len() > 1;
        for (idx, (input, result)) in inputs.iter().zip(results).enumerate() {
            if headers {
                if idx > 0 {
                    writeln!(writer)?;
                }
                writeln!(writer, "==> {} <==", input.name)?;
            }
            write_tokens(&mut writer, &input.name, &input.text, result)?;
        }
        writer.flush()?;

        Ok(())
    }
}

fn write_tokens(
    writer: &mut dyn Write,
    name: &str,
    text: &str,
    result: LSResult<Vec<Token<'_>>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = result.map_err(|err| format!("{name}: {err}"))?;
    log::info!("{name}: {} tokens", tokens.len());

    if let Err(offset) = check_coverage(text, &tokens) {
        return Err(format!("{name}: token stream breaks at byte {offset}").into());
    }

    for token in &tokens {
        writeln!(writer, "{}\t{}\t{:?}", token.offset(), token.kind(), token.text())?;
    }
    Ok(())
}
