// cli.rs - Command-line interface configuration

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewpoint")]
#[command(about = "Interactive camera flight demo", long_about = None)]
pub struct Cli {
    /// Navigation mode: examine, fly, or walk
    #[arg(short, long, default_value = "examine")]
    pub mode: String,

    /// Frames per second of the simulated clock
    #[arg(short, long, default_value_t = 60)]
    pub fps: u32,

    /// Transition duration in seconds
    #[arg(short, long, default_value_t = 0.5)]
    pub duration: f64,

    /// Starting pose in the camera text format
    #[arg(short, long)]
    pub pose: Option<String>,

    /// Print poses as JSON instead of the text format
    #[arg(short, long, default_value = "false")]
    pub json: bool,
}
