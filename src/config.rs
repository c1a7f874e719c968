//! Game settings, read from command-line flags or environment variables.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use structopt::StructOpt;

/// Default number of rows.
pub const ROWS: usize = 14;
/// Default number of columns.
pub const COLS: usize = 20;
/// Default probability for each cell to hold a bomb.
pub const BOMB_CHANCE: f64 = 0.15;
/// Default frame rate cap.
pub const FPS: u32 = 120;

/// Width and height of a cell, in pixels.
pub const CELL_SIZE: u32 = 20;
/// Gap between cells and around the board, in pixels.
pub const PADDING: u32 = 1;
/// Height of the bar above the board holding the timer and buttons.
pub const HEADER_HEIGHT: u32 = 50;

/// Largest accepted number of rows or columns.
const MAX_DIMENSION: usize = 100;
/// Largest accepted frame rate cap.
const MAX_FPS: u32 = 1000;

/// Runtime settings.
///
/// Every setting can be given as a flag or through its `MINES_*` environment
/// variable. Flags take precedence.
#[derive(Debug, Copy, Clone, PartialEq, StructOpt)]
#[structopt(name = "minesweeper", about = "Classic Minesweeper.")]
pub struct Config {
    /// Number of rows in the grid.
    #[structopt(
        short,
        long,
        env = "MINES_ROWS",
        default_value = "14",
        parse(try_from_str = parse_dimension)
    )]
    pub rows: usize,

    /// Number of columns in the grid.
    #[structopt(
        short,
        long,
        env = "MINES_COLS",
        default_value = "20",
        parse(try_from_str = parse_dimension)
    )]
    pub cols: usize,

    /// Probability for each cell to hold a bomb.
    #[structopt(
        short,
        long,
        env = "MINES_BOMB_CHANCE",
        default_value = "0.15",
        parse(try_from_str = parse_probability)
    )]
    pub bomb_chance: f64,

    /// Seed for bomb placement. A random seed is used if not given.
    #[structopt(short, long, env = "MINES_SEED", parse(try_from_str = parse_seed))]
    pub seed: Option<u64>,

    /// Frame rate cap.
    #[structopt(
        short,
        long,
        env = "MINES_FPS",
        default_value = "120",
        parse(try_from_str = parse_fps)
    )]
    pub fps: u32,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            bomb_chance: BOMB_CHANCE,
            seed: None,
            fps: FPS,
        }
    }
}
impl Config {
    /// Reads settings from the process arguments and environment, using
    /// defaults for anything unset.
    ///
    /// Prints usage and exits on `--help` or an invalid value.
    pub fn from_env() -> Self {
        Self::from_args()
    }
}

fn parse_dimension(src: &str) -> Result<usize, ConfigError> {
    let value = src
        .parse::<usize>()
        .map_err(|e| ConfigError::ParseInt(e, src.to_owned()))?;
    if !(1..=MAX_DIMENSION).contains(&value) {
        return Err(ConfigError::OutOfRange(src.to_owned(), "1-100"));
    }
    Ok(value)
}

fn parse_probability(src: &str) -> Result<f64, ConfigError> {
    let value = src
        .parse::<f64>()
        .map_err(|e| ConfigError::ParseFloat(e, src.to_owned()))?;
    // NaN fails this check too.
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange(src.to_owned(), "0-1"));
    }
    Ok(value)
}

fn parse_seed(src: &str) -> Result<u64, ConfigError> {
    src.parse::<u64>()
        .map_err(|e| ConfigError::ParseInt(e, src.to_owned()))
}

fn parse_fps(src: &str) -> Result<u32, ConfigError> {
    let value = src
        .parse::<u32>()
        .map_err(|e| ConfigError::ParseInt(e, src.to_owned()))?;
    if !(1..=MAX_FPS).contains(&value) {
        return Err(ConfigError::OutOfRange(src.to_owned(), "1-1000"));
    }
    Ok(value)
}

/// Setting with an unusable value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is not an integer.
    ParseInt(ParseIntError, String),
    /// Value is not a number.
    ParseFloat(ParseFloatError, String),
    /// Value parsed, but lies outside the accepted range.
    OutOfRange(String, &'static str),
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseInt(e, src) => write!(f, "invalid integer {:?}: {}", src, e),
            ConfigError::ParseFloat(e, src) => write!(f, "invalid number {:?}: {}", src, e),
            ConfigError::OutOfRange(src, range) => {
                write!(f, "value {:?} must be in range {}", src, range)
            }
        }
    }
}
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "MINES_ROWS",
        "MINES_COLS",
        "MINES_BOMB_CHANCE",
        "MINES_SEED",
        "MINES_FPS",
    ];

    fn config_from(args: &[&str]) -> Result<Config, structopt::clap::Error> {
        Config::from_iter_safe(std::iter::once("minesweeper").chain(args.iter().copied()))
    }

    // The only test that touches the process environment, so that tests
    // running in parallel never see each other's variables.
    #[test]
    fn test_defaults_and_env() {
        for key in &VARS {
            std::env::remove_var(key);
        }
        assert_eq!(config_from(&[]).unwrap(), Config::default());
        let c = Config::default();
        assert_eq!((c.rows, c.cols, c.fps), (14, 20, 120));
        assert_eq!(c.seed, None);

        std::env::set_var("MINES_ROWS", "9");
        std::env::set_var("MINES_SEED", "77");
        std::env::set_var("MINES_FPS", "60");
        let c = config_from(&[]).unwrap();
        assert_eq!((c.rows, c.cols, c.seed, c.fps), (9, 20, Some(77), 60));

        // Flags win over the environment.
        let c = config_from(&["--rows", "5"]).unwrap();
        assert_eq!(c.rows, 5);

        std::env::set_var("MINES_BOMB_CHANCE", "lots");
        assert!(config_from(&[]).is_err());

        for key in &VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_flags() {
        let c = config_from(&[
            "--rows",
            "9",
            "--cols",
            "8",
            "--bomb-chance",
            "0.2",
            "--seed",
            "1234",
            "--fps",
            "60",
        ])
        .unwrap();
        assert_eq!(
            c,
            Config {
                rows: 9,
                cols: 8,
                bomb_chance: 0.2,
                seed: Some(1234),
                fps: 60,
            },
        );
    }

    #[test]
    fn test_validators() {
        assert_eq!(parse_dimension("100"), Ok(100));
        assert!(matches!(parse_dimension("lots"), Err(ConfigError::ParseInt(_, _))));
        assert!(matches!(parse_dimension("0"), Err(ConfigError::OutOfRange(_, _))));
        assert!(parse_dimension("101").is_err());
        assert_eq!(parse_probability("1"), Ok(1.0));
        assert!(parse_probability("1.5").is_err());
        assert!(matches!(parse_probability("NaN"), Err(ConfigError::OutOfRange(_, _))));
        assert!(parse_seed("-1").is_err());
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("1001").is_err());
    }

    #[test]
    fn test_rejects_bad_flags() {
        assert!(config_from(&["--cols", "0"]).is_err());
        assert!(config_from(&["--bomb-chance", "1.5"]).is_err());
        assert!(config_from(&["--seed=-1"]).is_err());
        let err = config_from(&["--rows", "lots"]).unwrap_err();
        assert!(err.to_string().contains("lots"));
    }
}
