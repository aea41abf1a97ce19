mod action;
mod app;
mod cli;
mod components;
mod config;
mod dispatch;
mod error;
mod input;
mod logging;
mod tabs;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use color_eyre::eyre::Result;

use cli::{Cli, Command, ConfigCommand, RunArgs};
use config::{validate_base_url, ConfigManager};
use dispatch::{ActionRegistry, ActionTable, HttpTransport, MemorySink, RenderStatus};
use logging::LogTarget;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    let mut config = ConfigManager::new(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    match cli.command {
        Some(Command::Config { command }) => config_command(&config, command)?,
        Some(Command::Actions) => list_actions()?,
        Some(Command::Run(args)) => return run_once(&config, args).await,
        None => run_tui(&config).await?,
    }
    Ok(ExitCode::SUCCESS)
}

/// CLI flags and environment take precedence over config.toml
fn apply_overrides(config: &mut ConfigManager, cli: &Cli) -> Result<()> {
    let app_config = config.app_config_mut();

    let base_url = cli.base_url.as_deref().unwrap_or(&app_config.api.base_url);
    app_config.api.base_url = validate_base_url(base_url)?;

    if let Some(level) = &cli.log_level {
        app_config.general.log_level = level.clone();
    }
    if let Some(platform) = cli.platform {
        app_config.general.initial_platform = platform;
    }
    Ok(())
}

fn report_config_warnings(config: &ConfigManager) {
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }
}

fn build_registry(config: &ConfigManager) -> Result<Arc<ActionRegistry>> {
    let transport = HttpTransport::new(config.app_config().api.base_url.clone());
    let registry = ActionRegistry::standard(Arc::new(transport))?;
    Ok(Arc::new(registry))
}

async fn run_tui(config: &ConfigManager) -> Result<()> {
    let log_file = config.log_file();
    let _guard = logging::init(LogTarget::File(&log_file), &config.app_config().general.log_level)?;
    report_config_warnings(config);

    let registry = build_registry(config)?;
    let mut app = app::App::new(config, registry)?;
    app.run().await?;

    Ok(())
}

/// Dispatch one action and print its output area. Fails the exit code when
/// the action's error text was rendered.
async fn run_once(config: &ConfigManager, args: RunArgs) -> Result<ExitCode> {
    let _guard = logging::init(LogTarget::Stderr, &config.app_config().general.log_level)?;
    report_config_warnings(config);

    let registry = build_registry(config)?;
    let sink = MemorySink::new();
    registry.dispatch(args.action, &args.fields(), &sink).await;

    let area = &registry.config(args.action).output_area;
    let Some(output) = sink.get(area) else {
        return Ok(ExitCode::SUCCESS);
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.text)?;
    stdout.flush()?;

    Ok(exit_code(output.status))
}

fn exit_code(status: RenderStatus) -> ExitCode {
    match status {
        RenderStatus::Success => ExitCode::SUCCESS,
        RenderStatus::Failed => ExitCode::FAILURE,
    }
}

fn list_actions() -> Result<()> {
    let table = ActionTable::standard();
    let mut stdout = io::stdout().lock();

    writeln!(
        stdout,
        "{:<32} {:<10} {:<34} {:<26} {}",
        "ACTION", "PLATFORM", "PATH", "REQUEST KEYS", "RESPONSE FIELD"
    )?;
    for config in table.iter() {
        writeln!(
            stdout,
            "{:<32} {:<10} {:<34} {:<26} {}",
            config.action.name(),
            config.platform.to_string(),
            config.endpoint_path,
            config.payload_keys().join(","),
            config.response_field
        )?;
    }
    Ok(())
}

fn config_command(config: &ConfigManager, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            println!("{}", config.config_path().display());
        }
        ConfigCommand::Init => {
            let written = config.write_default_configs()?;
            if written.is_empty() {
                println!("Config already present in {}", config.config_dir().display());
            }
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_render_fails_exit_code() {
        assert_eq!(exit_code(RenderStatus::Success), ExitCode::SUCCESS);
        assert_eq!(exit_code(RenderStatus::Failed), ExitCode::FAILURE);
    }
}
