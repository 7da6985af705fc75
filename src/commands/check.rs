use clap::Args;
use ffa_core::{parse_foods, parse_macro_days, Category};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct CheckCommand {
    /// Data file to validate
    pub file: PathBuf,

    /// Parse as this category instead of routing by parent directory (foods, targets)
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| format!("unknown category '{}', expected foods or targets", s))
}

impl CheckCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let category = match self.category {
            Some(category) => category,
            None => config.routes.value.resolve(&self.file).ok_or_else(|| {
                format!(
                    "No route for '{}'. Move it under a routed directory or pass --category",
                    self.file.display()
                )
            })?,
        };

        match category {
            Category::Foods => {
                let foods = parse_foods(&self.file)?;
                println!("{}: valid foods file, {} foods", self.file.display(), foods.len());
                for food in &foods {
                    println!("  - {}", food);
                }
            }
            Category::Targets => {
                let days = parse_macro_days(&self.file)?;
                println!("{}: valid targets file, {} days", self.file.display(), days.len());
                if let (Some(first), Some(last)) = (days.first(), days.last()) {
                    println!("  first row: {}", first.date);
                    println!("  last row: {}", last.date);
                }
            }
        }

        Ok(())
    }
}
