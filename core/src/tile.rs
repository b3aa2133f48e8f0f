use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
///
/// `Exploded` and `Misflagged` only appear after a lost game has been
/// annotated with [`GameSession::reveal_all_mines`](crate::GameSession::reveal_all_mines).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Flagged,
    Revealed,
    Exploded,
    Misflagged,
}

impl EngineCell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged | Self::Misflagged)
    }
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What the presentation layer should draw for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Empty,
    Count(u8),
    /// The mine the player stepped on.
    RevealedMine,
    /// A mine shown after the game was lost.
    ExplodedMine,
    /// A flag that turned out to sit on a safe cell.
    MisflaggedMine,
}

impl CellView {
    pub(crate) const fn revealed(adjacent_mines: u8) -> Self {
        match adjacent_mines {
            0 => Self::Empty,
            count => Self::Count(count),
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
