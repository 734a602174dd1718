use lexstack::{StateTable, rules::TableDef};

/// Rule table arg group.
#[derive(clap::Args, Debug)]
pub struct TableSelectorArgs {
    /// JSON rule table definition.
    #[arg(long, value_name = "JSON")]
    table: String,

    /// Override the table's root state.
    #[arg(long)]
    root: Option<String>,
}

impl TableSelectorArgs {
    /// Get the table path.
    pub fn table_path(&self) -> &str {
        &self.table
    }

    /// Load the table definition.
    pub fn load_def(&self) -> Result<TableDef, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(self.table_path())?;
        let mut def = TableDef::from_json_str(&json)?;
        if let Some(root) = &self.root {
            def.root = root.clone();
        }
        Ok(def)
    }

    /// Load and build the table.
    pub fn load_table(&self) -> Result<StateTable, Box<dyn std::error::Error>> {
        let table = self.load_def()?.build()?;
        log::info!(
            "loaded {:?}: {} states, {} rules",
            self.table_path(),
            table.state_count(),
            table.rule_count()
        );
        Ok(table)
    }
}
