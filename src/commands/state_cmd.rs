use clap::Args;
use ffa_core::{bootstrap, ChangeRouter, Snapshot, StateReader, StateStore};
use std::sync::Arc;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct StateCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl StateCommand {
    /// Loads the data directory once and prints what a consumer would see.
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = Arc::new(StateStore::new());
        let router = ChangeRouter::new(config.routes.value.clone(), store.clone());
        bootstrap(&config.data_dir.value, &router)?;

        let snapshot = store.current_state();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            OutputFormat::Text => print!("{}", render_text(&snapshot)),
        }

        Ok(())
    }
}

fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("Foods ({})\n", snapshot.foods.len()));
    for food in snapshot.foods.iter() {
        out.push_str(&format!("  - {}\n", food));
    }

    out.push_str(&format!("\nMacro days ({})\n", snapshot.targets.len()));
    for day in snapshot.targets.iter() {
        out.push_str(&format!("{}\n", day));
    }

    out
}
