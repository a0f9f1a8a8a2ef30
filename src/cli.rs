// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "gaze-fade")]
#[command(about = "Headless gaze fade simulation", long_about = None)]
pub struct Cli {
    /// JSON scene file; a ring of labels is generated when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Number of labels in the generated ring
    #[arg(long, default_value_t = 6)]
    pub labels: u32,

    /// Radius of the generated ring
    #[arg(long, default_value_t = 10.0)]
    pub radius: f32,

    /// Frames to simulate before giving up
    #[arg(long, default_value_t = 3600)]
    pub frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Camera yaw rate in degrees per second
    #[arg(long = "turn-rate", default_value_t = 8.0)]
    pub turn_rate: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["gaze-fade"]);
        assert!(cli.scene.is_none());
        assert_eq!(cli.labels, 6);
        assert_eq!(cli.frames, 3600);
        assert_eq!(cli.turn_rate, 8.0);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "gaze-fade",
            "--scene",
            "scenes/gallery.json",
            "--frames",
            "10",
            "--turn-rate",
            "12",
        ]);
        assert_eq!(cli.scene, Some(PathBuf::from("scenes/gallery.json")));
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.turn_rate, 12.0);
    }
}
