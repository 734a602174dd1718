use std::io::Write;

use crate::{input_output::OutputArgs, logging::LogArgs, table_selector::TableSelectorArgs};

/// Args for the check command.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    table: TableSelectorArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl CheckArgs {
    /// Run the check command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let table = self.table.load_table()?;
        let mut writer = self.output.open_writer()?;

        writeln!(
            writer,
            "{}: {} states, {} rules (root {:?})",
            self.table.table_path(),
            table.state_count(),
            table.rule_count(),
            table.state_name(table.root()),
        )?;
        for name in table.state_names() {
            if let Some(rules) = table.state_id(name).and_then(|id| table.get_rules(id)) {
                writeln!(writer, "  {name}: {}", rules.len())?;
            }
        }
        writer.flush()?;

        Ok(())
    }
}
