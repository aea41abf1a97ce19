use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dispatch::{ActionId, FieldKind, FieldValues, Platform};

/// Yoova: generate scripts, posts, tweets and emails from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "yoova")]
#[command(version)]
#[command(about = "Terminal client for a social-media content generation service", long_about = None)]
pub struct Cli {
    /// Origin of the generation service. Overrides config.toml.
    #[arg(long, env = "YOOVA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Read configuration from this file instead of the user config directory
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config.toml.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Platform tab to show on startup (video, microblog, photo, email)
    #[arg(long)]
    pub platform: Option<Platform>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Dispatch a single action and print the result
    Run(RunArgs),

    /// List every action with its endpoint and payload keys
    Actions,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Action name, e.g. youtube-generate-script (see `yoova actions`)
    pub action: ActionId,

    /// Topic field (also used as "interests" by the niche actions)
    #[arg(long, default_value = "")]
    pub topic: String,

    /// Keywords field
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Style field
    #[arg(long, default_value = "")]
    pub style: String,
}

impl RunArgs {
    /// Field values as they would appear on the action's platform panel
    pub fn fields(&self) -> FieldValues {
        let platform = self.action.platform();
        FieldValues::new()
            .with(platform, FieldKind::Topic, self.topic.clone())
            .with(platform, FieldKind::Keywords, self.keywords.clone())
            .with(platform, FieldKind::Style, self.style.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Write default config.toml and theme.toml if they do not exist
    Init,
    /// Print the config file location
    Path,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
