use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("port: {}", config.port.value);
                        println!("  source: {}", config.port.source);
                        println!();

                        println!("extension: {}", config.extension.value);
                        println!("  source: {}", config.extension.source);
                        println!();

                        println!("routes:");
                        for (dir_name, category) in config.routes.value.iter() {
                            println!("  {} -> {}", dir_name, category);
                        }
                        println!("  source: {}", config.routes.source);
                        println!();

                        println!("watch_dirs:");
                        for dir in &config.watch_dirs.value {
                            println!("  {}", dir.display());
                        }
                        println!("  source: {}", config.watch_dirs.source);
                    }
                }
                Ok(())
            }
        }
    }
}
