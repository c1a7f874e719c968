//! Classic Minesweeper in a single window.

#![allow(dead_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

use anyhow::{Context, Result};

mod config;
mod game;
mod gui;
mod input;
mod render;

use config::Config;
use game::Game;

const TITLE: &str = "Minesweeper";

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .context("Failed to initialize logger")?;

    let config = Config::from_env();
    let game = Game::new(&config).context("Unable to start game")?;
    gui::show_gui(&config, game)
}
