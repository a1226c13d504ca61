// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::grid::SpacingPreset;
use crate::math::Color;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dog-grid")]
#[command(about = "Nested grids of procedurally built dogs", long_about = None)]
pub struct Cli {
    /// Hide the control panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial scale slider value
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub scale: Option<u8>,

    /// Initial rotation speed slider value
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rotation_speed: Option<u8>,

    /// Coat color as #rrggbb, #rgb or a color name
    #[arg(long)]
    pub color: Option<Color>,

    /// Start with disco mode on
    #[arg(long)]
    pub disco: bool,

    /// Start with rotation paused
    #[arg(long)]
    pub paused: bool,

    /// Placement rule of the outer grid
    #[arg(long, value_enum)]
    pub outer_spacing: Option<SpacingPreset>,

    /// Render at 1/N of the window resolution
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
    pub render_scale: Option<u32>,

    /// Write the composed scene as JSON to this path and exit
    #[arg(long, value_name = "PATH")]
    pub dump_scene: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "dog-grid",
            "--no-ui",
            "--scale",
            "5",
            "--rotation-speed",
            "2",
            "--color",
            "#ff0000",
            "--disco",
            "--outer-spacing",
            "lattice",
            "--render-scale",
            "3",
            "--dump-scene",
            "scene.json",
        ])
        .unwrap();

        assert!(cli.no_ui);
        assert_eq!(cli.scale, Some(5));
        assert_eq!(cli.rotation_speed, Some(2));
        assert_eq!(cli.color, Some(Color::from_rgb8(255, 0, 0)));
        assert!(cli.disco);
        assert!(!cli.paused);
        assert_eq!(cli.outer_spacing, Some(SpacingPreset::Lattice));
        assert_eq!(cli.render_scale, Some(3));
        assert_eq!(cli.dump_scene, Some(PathBuf::from("scene.json")));
    }

    #[test]
    fn test_rejects_out_of_range_scale() {
        assert!(Cli::try_parse_from(["dog-grid", "--scale", "9"]).is_err());
        assert!(Cli::try_parse_from(["dog-grid", "--color", "#zzzzzz"]).is_err());
    }
}
