use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned, read-only copy of what the player can currently see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub state: EngineState,
    pub total_mines: CellCount,
    pub flags_placed: CellCount,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let size = session.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            session.view_at((row as Coord, col as Coord))
        });

        Self {
            size,
            state: session.state(),
            total_mines: session.total_mines(),
            flags_placed: session.flags_placed(),
            cells,
        }
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    pub fn mines_left(&self) -> isize {
        (self.total_mines as isize) - (self.flags_placed as isize)
    }

    /// Rows of cell views, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, CellView>> {
        self.cells.rows().into_iter()
    }
}
