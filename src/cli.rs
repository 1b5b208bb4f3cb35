// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "freefly")]
#[command(about = "Fly through a field of boxes", long_about = None)]
pub struct Cli {
    /// JSON settings file; missing fields use defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of boxes to scatter
    #[arg(long)]
    pub boxes: Option<usize>,

    /// Seed for box placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Leave the cursor visible and unlocked
    #[arg(long = "free-cursor", default_value = "false")]
    pub free_cursor: bool,

    /// Window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Print the effective settings as JSON and exit
    #[arg(long = "print-config", default_value = "false")]
    pub print_config: bool,
}

impl Cli {
    /// Command-line flags win over the settings file
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(boxes) = self.boxes {
            settings.scene.box_count = boxes;
        }
        if let Some(seed) = self.seed {
            settings.scene.seed = seed;
        }
        if self.free_cursor {
            settings.window.lock_cursor = false;
        }
        if let Some(width) = self.width {
            settings.window.width = width;
        }
        if let Some(height) = self.height {
            settings.window.height = height;
        }
    }
}
