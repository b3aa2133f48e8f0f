use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::Rng;
use sweeper_core::{Difficulty, GameConfig};

use crate::command::{Command, USAGE};
use crate::game::{Driver, Flow};

mod command;
mod game;
mod render;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Play Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Preset board
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = Preset::Beginner,
        conflicts_with_all = ["rows", "cols", "mines"]
    )]
    difficulty: Preset,

    /// Rows of a custom board
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<u8>,

    /// Columns of a custom board
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<u8>,

    /// Mines on a custom board, must leave at least one safe cell
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn resolve_difficulty(&self) -> Result<Difficulty> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                let config = GameConfig::new((rows, cols), mines)
                    .with_context(|| format!("invalid board {rows}x{cols} with {mines} mines"))?;
                Ok(Difficulty::from_config(config))
            }
            _ => Ok(self.difficulty.into()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let difficulty = args.resolve_difficulty()?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);
    log::info!("Starting {} game", difficulty.name());

    let mut driver = Driver::new(difficulty.config(), seed)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{USAGE}")?;
    writeln!(stdout, "{}", driver.render())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("could not read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}\n{USAGE}")?;
                continue;
            }
        };

        match driver.apply(command)? {
            Flow::Redraw => writeln!(stdout, "{}", driver.render())?,
            Flow::Unchanged => {}
            Flow::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_beginner() {
        let args = Args::try_parse_from(["sweeper"]).unwrap();

        assert_eq!(args.resolve_difficulty().unwrap(), Difficulty::Beginner);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn preset_flag_selects_expert() {
        let args = Args::try_parse_from(["sweeper", "-d", "expert", "--seed", "4"]).unwrap();

        assert_eq!(args.resolve_difficulty().unwrap().config(), GameConfig::EXPERT);
        assert_eq!(args.seed, Some(4));
    }

    #[test]
    fn custom_board_needs_all_three_values() {
        assert!(Args::try_parse_from(["sweeper", "--rows", "5"]).is_err());

        let args =
            Args::try_parse_from(["sweeper", "--rows", "5", "--cols", "7", "--mines", "6"]).unwrap();
        let config = args.resolve_difficulty().unwrap().config();
        assert_eq!(config, GameConfig::new((5, 7), 6).unwrap());
    }

    #[test]
    fn custom_board_conflicts_with_preset() {
        let parsed = Args::try_parse_from([
            "sweeper", "-d", "expert", "--rows", "5", "--cols", "7", "--mines", "6",
        ]);

        assert!(parsed.is_err());
    }

    #[test]
    fn overfull_custom_board_is_rejected() {
        let args =
            Args::try_parse_from(["sweeper", "--rows", "2", "--cols", "2", "--mines", "4"]).unwrap();

        assert!(args.resolve_difficulty().is_err());
    }
}
