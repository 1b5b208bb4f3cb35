use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use freefly::app::App;
use freefly::cli::Cli;
use freefly::config::Settings;
use freefly::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default());

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);
    settings.validate().context("Invalid settings")?;

    if cli.print_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
