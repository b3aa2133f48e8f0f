use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// `Won` and `Lost` are final, only [`GameSession::restart`] leaves them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game from the first gesture to a win or a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    mines_shown: bool,
}

impl GameSession {
    /// Starts a game on a freshly generated board.
    ///
    /// Fails when `config` leaves no safe cell or has an empty side.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let session = Self::from_layout(generator.generate(config)?);
        log::debug!(
            "New {} game, {}x{} with {} mines",
            Difficulty::from_config(config).name(),
            config.size.0,
            config.size.1,
            config.mines
        );
        Ok(session)
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        Self {
            config: mine_layout.game_config(),
            board: Board::new(mine_layout),
            state: EngineState::default(),
            triggered_mine: None,
            mines_shown: false,
        }
    }

    /// Replaces the whole board with a new one for the same config.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        *self = Self::new(self.config, seed)?;
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_layout().mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.board.flagged_count()
    }

    /// Mine counter as shown to the player, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flags_placed() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board.cell_at(coords)
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.board.view_at(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn check_win(&self) -> bool {
        self.board.check_win()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealDelta {
        if self.state.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game is {:?}", coords, self.state);
            return RevealDelta::no_change();
        }

        let delta = self.board.reveal(coords);
        match delta.outcome {
            RevealOutcome::HitMine => {
                log::debug!("Stepped on a mine at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.state = EngineState::Lost;
            }
            RevealOutcome::Won => {
                log::debug!("Game won, last reveal at {:?}", coords);
                self.state = EngineState::Won;
            }
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
        delta
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_finished() {
            log::trace!("Ignoring flag at {:?}, game is {:?}", coords, self.state);
            return MarkOutcome::NoChange;
        }

        self.board.toggle_flag(coords)
    }

    /// Annotates a lost board, see [`Board::reveal_all_mines`].
    ///
    /// Only the first call after a loss does anything, every other call returns
    /// an empty list.
    pub fn reveal_all_mines(&mut self) -> Vec<AnnotatedCell> {
        if self.state != EngineState::Lost || self.mines_shown {
            return Vec::new();
        }

        self.mines_shown = true;
        let annotated = self.board.reveal_all_mines();
        log::debug!("Showing mines, {} cells annotated", annotated.len());
        annotated
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_session(self)
    }
}
