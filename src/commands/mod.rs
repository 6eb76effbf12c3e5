mod config;
mod run;

pub use config::cmd_config_show;
pub use run::{cmd_commands, cmd_console, cmd_run};
