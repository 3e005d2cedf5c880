//! Command-line flags
//!
//! Flags override the loaded configuration; anything left unset keeps the
//! value from the config files or environment.

use std::path::PathBuf;
use clap::Parser;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse a directory as markers orbiting on a sphere")]
pub struct Cli {
    /// Start with orbits running
    #[arg(short = 'o', long)]
    pub orbit: bool,

    /// Start with labels shown
    #[arg(short = 't', long = "text")]
    pub labels: bool,

    /// Sphere radius
    #[arg(short = 'r', long)]
    pub radius: Option<f32>,

    /// Orbit speed in turns per tick
    #[arg(short = 's', long)]
    pub speed: Option<f32>,

    /// Directory to show
    #[arg(short = 'p', long)]
    pub path: Option<PathBuf>,

    /// Scene offset along x (the camera moves by the opposite amount)
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    pub x: Option<f32>,

    /// Scene offset along y (the camera moves by the opposite amount)
    #[arg(short = 'y', long, allow_negative_numbers = true)]
    pub y: Option<f32>,

    /// Scene offset along z (the camera moves by the opposite amount)
    #[arg(short = 'z', long, allow_negative_numbers = true)]
    pub z: Option<f32>,

    /// Fixed seed for orbit axes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

impl Cli {
    /// Override `config` with every flag that was given
    pub fn apply(&self, config: &mut AppConfig) {
        let scene = &mut config.scene;
        if self.orbit {
            scene.orbit = true;
        }
        if self.labels {
            scene.labels = true;
        }
        if let Some(radius) = self.radius {
            scene.radius = radius;
        }
        if let Some(speed) = self.speed {
            scene.speed = speed;
        }
        if let Some(path) = &self.path {
            scene.start_dir = Some(path.clone());
        }
        // Flags give the scene offset; the camera translation is its negation
        if let Some(x) = self.x {
            scene.translation[0] = -x;
        }
        if let Some(y) = self.y {
            scene.translation[1] = -y;
        }
        if let Some(z) = self.z {
            scene.translation[2] = -z;
        }
        if let Some(seed) = self.seed {
            scene.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fileorbit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig::default();
        parse(&[]).apply(&mut config);
        assert!(!config.scene.orbit);
        assert_eq!(config.scene.radius, 1.0);
        assert_eq!(config.scene.translation, [0.0, 0.0, -4.0]);
        assert!(config.scene.start_dir.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-o", "-t", "-r", "2.5", "-s", "0.01", "-p", "/tmp"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(config.scene.orbit);
        assert!(config.scene.labels);
        assert_eq!(config.scene.radius, 2.5);
        assert_eq!(config.scene.speed, 0.01);
        assert_eq!(config.scene.start_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_translation_flags_are_negated() {
        let cli = parse(&["-x", "1.5", "-y", "-2", "-z", "8"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.scene.translation, [-1.5, 2.0, -8.0]);
    }

    #[test]
    fn test_distance_flag_keeps_scene_in_front() {
        let cli = parse(&["-z", "4", "-x", "1"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.scene.translation, [-1.0, 0.0, -4.0]);
    }

    #[test]
    fn test_config_dir_default() {
        assert_eq!(parse(&[]).config_dir, PathBuf::from("config"));
        assert_eq!(parse(&["--config-dir", "etc"]).config_dir, PathBuf::from("etc"));
    }

    #[test]
    fn test_invalid_number_rejected() {
        assert!(Cli::try_parse_from(["fileorbit", "-r", "wide"]).is_err());
    }
}
