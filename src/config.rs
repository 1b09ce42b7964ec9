// Startup options. Everything else about the game is fixed.
use clap::Parser;
use std::time::Duration;

/// Move the mouse to paint the window white, one random pixel per unit traveled.
#[derive(Parser, Debug, Clone)]
#[command(name = "pixel-reveal")]
#[command(version)]
pub struct Config {
    /// Window width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Borderless window kept above all others
    #[arg(long)]
    pub fullscreen: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Length of each leg (fade to white, fade back in) of a scene change, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub fade_ms: u64,
}

impl Config {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}
