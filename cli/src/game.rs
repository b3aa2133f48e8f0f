use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sweeper_core::{GameConfig, GameSession};

use crate::command::Command;
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// The board changed and should be drawn again.
    Redraw,
    Unchanged,
    Quit,
}

/// Feeds parsed commands into a [`GameSession`] and keeps the seeds for new games.
pub struct Driver {
    session: GameSession,
    seeds: SmallRng,
}

impl Driver {
    /// The first board is generated from `seed` itself, later boards from seeds derived from it.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let session = GameSession::new(config, seed).context("could not place mines")?;
        Ok(Self {
            session,
            seeds: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        let changed = match command {
            Command::Reveal(coords) => {
                let delta = self.session.reveal(coords);
                log::debug!("reveal {:?}: {:?}, {} cells", coords, delta.outcome, delta.cells.len());
                if let Some(mine) = delta.mine {
                    log::info!("Mine at {:?} went off", mine);
                    self.session.reveal_all_mines();
                }
                delta.has_update()
            }
            Command::Flag(coords) => {
                let outcome = self.session.toggle_flag(coords);
                log::debug!("flag {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
            Command::NewGame => {
                let seed = self.seeds.next_u64();
                log::debug!("new game with seed {}", seed);
                self.session.restart(seed).context("could not start a new game")?;
                true
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        Ok(if changed { Flow::Redraw } else { Flow::Unchanged })
    }

    pub fn render(&self) -> String {
        render::render(&self.session.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{CellView, EngineState};

    fn first_mine(driver: &Driver) -> (u8, u8) {
        driver
            .session()
            .board()
            .mine_layout()
            .mine_coords()
            .next()
            .unwrap()
    }

    #[test]
    fn seed_reproduces_the_first_board() {
        let a = Driver::new(GameConfig::BEGINNER, 7).unwrap();
        let b = Driver::new(GameConfig::BEGINNER, 7).unwrap();

        assert_eq!(a.session().board(), b.session().board());
        assert_eq!(
            a.session().board().mine_layout(),
            &sweeper_core::place_mines(GameConfig::BEGINNER, 7).unwrap()
        );
    }

    #[test]
    fn losing_shows_the_mines() {
        let mut driver = Driver::new(GameConfig::BEGINNER, 3).unwrap();
        let mine = first_mine(&driver);

        assert_eq!(driver.apply(Command::Reveal(mine)).unwrap(), Flow::Redraw);

        let snapshot = driver.session().snapshot();
        assert_eq!(snapshot.state, EngineState::Lost);
        assert_eq!(snapshot.view_at(mine), CellView::RevealedMine);
        let exploded = snapshot
            .cells
            .iter()
            .filter(|&&view| view == CellView::ExplodedMine)
            .count();
        assert_eq!(exploded, 9);
    }

    #[test]
    fn new_game_resets_and_quit_stops() {
        let mut driver = Driver::new(GameConfig::INTERMEDIATE, 5).unwrap();
        assert_eq!(driver.apply(Command::Flag((0, 0))).unwrap(), Flow::Redraw);
        assert_eq!(driver.session().flags_placed(), 1);

        assert_eq!(driver.apply(Command::NewGame).unwrap(), Flow::Redraw);
        assert_eq!(driver.session().flags_placed(), 0);
        assert_eq!(driver.session().config(), GameConfig::INTERMEDIATE);

        assert_eq!(driver.apply(Command::Quit).unwrap(), Flow::Quit);
    }

    #[test]
    fn ignored_gestures_skip_the_redraw() {
        let mut driver = Driver::new(GameConfig::BEGINNER, 8).unwrap();

        assert_eq!(driver.apply(Command::Reveal((9, 0))).unwrap(), Flow::Unchanged);
        assert_eq!(driver.apply(Command::Flag((0, 42))).unwrap(), Flow::Unchanged);

        let mine = first_mine(&driver);
        assert_eq!(driver.apply(Command::Flag(mine)).unwrap(), Flow::Redraw);
        assert_eq!(driver.apply(Command::Reveal(mine)).unwrap(), Flow::Unchanged);
    }

    #[test]
    fn invalid_config_is_reported() {
        assert!(Driver::new(GameConfig::new_unchecked((2, 2), 4), 1).is_err());
    }
}
