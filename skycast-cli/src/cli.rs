use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skycast_core::{Config, OpenWeatherProvider, Orchestrator};

use crate::{locate::ConfiguredLocator, render::Renderer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup for your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and lookup defaults.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "London" or "Rio de Janeiro".
        city: String,
    },

    /// Show weather for the configured device position.
    Locate,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => {
                let orchestrator = build_orchestrator()?;
                Renderer::attach(&orchestrator.view_state());
                orchestrator.lookup_by_name(&city).await;
                Ok(())
            }
            Some(Command::Locate) => {
                let orchestrator = build_orchestrator()?;
                Renderer::attach(&orchestrator.view_state());
                orchestrator.request_device_location().await;
                Ok(())
            }
            None => {
                // Default invocation: probe the credential once, then show
                // the configured default city.
                let config = Config::load()?;
                let orchestrator = build_orchestrator_from(&config)?;
                Renderer::attach(&orchestrator.view_state());
                orchestrator.start_with_default(config.default_city()).await;
                Ok(())
            }
        }
    }
}

fn build_orchestrator() -> Result<Orchestrator> {
    let config = Config::load()?;
    build_orchestrator_from(&config)
}

fn build_orchestrator_from(config: &Config) -> Result<Orchestrator> {
    let api_key = config.require_api_key()?.to_string();
    let provider = OpenWeatherProvider::new(api_key);
    let locator = ConfiguredLocator::new(config.home);

    Ok(Orchestrator::new(Box::new(provider), Box::new(locator)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let default_city = inquire::Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(default_city.trim().to_string());

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
