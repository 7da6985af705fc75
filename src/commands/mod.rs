mod check;
mod config_cmd;
mod serve;
mod state_cmd;

pub use check::CheckCommand;
pub use config_cmd::ConfigCommand;
pub use serve::ServeCommand;
pub use state_cmd::StateCommand;

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
