mod config;
mod error;
mod food;
mod game;
mod grid;
mod render;
mod scores;
mod snake;
mod state;
mod term;

use std::fs::File;

use log::{info, warn};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use crate::config::Config;
use crate::error::GameError;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<(), GameError> {
    let config = Config::default();

    // The terminal belongs to the game, so diagnostics go to a file
    match File::create(&config.log_path) {
        Ok(file) => {
            if WriteLogger::init(LevelFilter::Info, LogConfig::default(), file).is_err() {
                eprintln!("Logger was already initialized");
            }
        }
        Err(e) => eprintln!("Could not create {}: {}", config.log_path.display(), e),
    }

    info!("Starting snake on a {}x{} board", config.grid.width, config.grid.height);

    let mut game = game::SnakeGame::new(config);
    let res = game.run();
    if let Err(e) = &res {
        warn!("Exiting with error: {}", e);
    }
    res
}
