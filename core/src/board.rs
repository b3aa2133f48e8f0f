use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A cell opened by a reveal, with the number the player should see.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub coords: Coord2,
    pub adjacent_mines: u8,
}

/// Everything a single reveal changed, in the order cells were opened.
///
/// `cells` only lists safe cells. A mine that went off is reported in `mine`
/// instead, and is the only cell a [`RevealOutcome::HitMine`] reveal touches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealDelta {
    pub outcome: RevealOutcome,
    pub cells: Vec<RevealedCell>,
    pub mine: Option<Coord2>,
}

impl RevealDelta {
    pub const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            cells: Vec::new(),
            mine: None,
        }
    }

    pub const fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

/// A cell whose view changed when the mines were shown after a loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCell {
    pub coords: Coord2,
    pub view: CellView,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<EngineCell>,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_safe_count: 0,
            flagged_count: 0,
        }
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        self.mine_layout.in_bounds(coords)
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        match self.cell_at(coords) {
            EngineCell::Hidden => CellView::Hidden,
            EngineCell::Flagged => CellView::Flagged,
            EngineCell::Revealed if self.mine_layout[coords] => CellView::RevealedMine,
            EngineCell::Revealed => {
                CellView::revealed(self.mine_layout.adjacent_mine_count(coords))
            }
            EngineCell::Exploded => CellView::ExplodedMine,
            EngineCell::Misflagged => CellView::MisflaggedMine,
        }
    }

    /// Opens `coords`, flooding outwards through zero cells.
    ///
    /// Out-of-bounds, flagged and already revealed cells are left alone. A mine is
    /// marked revealed and reported as [`RevealOutcome::HitMine`] in
    /// [`RevealDelta::mine`] without touching any other cell. The outcome is [`RevealOutcome::Won`] once every safe cell
    /// is open.
    pub fn reveal(&mut self, coords: Coord2) -> RevealDelta {
        if !self.in_bounds(coords) {
            log::trace!("Ignoring reveal outside the board at {:?}", coords);
            return RevealDelta::no_change();
        }

        if !matches!(self.cell_at(coords), EngineCell::Hidden) {
            log::trace!("Ignoring reveal of {:?} at {:?}", self.cell_at(coords), coords);
            return RevealDelta::no_change();
        }

        if self.mine_layout[coords] {
            self.cells[coords.to_nd_index()] = EngineCell::Revealed;
            return RevealDelta {
                outcome: RevealOutcome::HitMine,
                cells: Vec::new(),
                mine: Some(coords),
            };
        }

        let adjacent_mines = self.open_safe_cell(coords);
        let mut cells = vec![RevealedCell {
            coords,
            adjacent_mines,
        }];

        if adjacent_mines == 0 {
            // cells are marked before they are pushed, so nothing is visited twice
            let mut to_visit = vec![coords];
            while let Some(visit_coords) = to_visit.pop() {
                for neighbor in self.mine_layout.iter_neighbors(visit_coords) {
                    if !matches!(self.cells[neighbor.to_nd_index()], EngineCell::Hidden) {
                        continue;
                    }

                    let neighbor_mines = self.open_safe_cell(neighbor);
                    log::trace!(
                        "Flood opened cell at {:?}, mine count: {}",
                        neighbor,
                        neighbor_mines
                    );
                    cells.push(RevealedCell {
                        coords: neighbor,
                        adjacent_mines: neighbor_mines,
                    });

                    if neighbor_mines == 0 {
                        to_visit.push(neighbor);
                    }
                }
            }
        }

        let outcome = if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };
        RevealDelta {
            outcome,
            cells,
            mine: None,
        }
    }

    fn open_safe_cell(&mut self, coords: Coord2) -> u8 {
        debug_assert!(!self.mine_layout[coords]);
        self.cells[coords.to_nd_index()] = EngineCell::Revealed;
        self.revealed_safe_count += 1;
        self.mine_layout.adjacent_mine_count(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.in_bounds(coords) {
            log::trace!("Ignoring flag outside the board at {:?}", coords);
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        match *cell {
            EngineCell::Hidden => {
                *cell = EngineCell::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Flagged
            }
            EngineCell::Flagged => {
                *cell = EngineCell::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Unflagged
            }
            EngineCell::Revealed | EngineCell::Exploded | EngineCell::Misflagged => {
                MarkOutcome::NoChange
            }
        }
    }

    /// Every safe cell is open; flags play no part.
    pub fn check_win(&self) -> bool {
        self.revealed_safe_count == self.mine_layout.safe_cell_count()
    }

    /// Shows hidden mines and marks wrong flags, returning the cells that changed.
    ///
    /// Flagged mines stay flagged and revealed cells, including a mine that was
    /// stepped on, keep their state.
    pub fn reveal_all_mines(&mut self) -> Vec<AnnotatedCell> {
        let mut annotated = Vec::new();

        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            let view = match (*cell, self.mine_layout[coords]) {
                (EngineCell::Hidden, true) => {
                    *cell = EngineCell::Exploded;
                    CellView::ExplodedMine
                }
                (EngineCell::Flagged, false) => {
                    *cell = EngineCell::Misflagged;
                    CellView::MisflaggedMine
                }
                _ => continue,
            };
            annotated.push(AnnotatedCell { coords, view });
        }

        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn revealed_coords(delta: &RevealDelta) -> Vec<Coord2> {
        let mut coords: Vec<_> = delta.cells.iter().map(|cell| cell.coords).collect();
        coords.sort();
        coords
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // mines down column 3 split the board into a zero region on the left
        let mut board = board((4, 6), &[(0, 3), (1, 3), (2, 3), (3, 3)]);

        let delta = board.reveal((0, 0));

        assert_eq!(delta.outcome, RevealOutcome::Revealed);
        let mut expected = Vec::new();
        for row in 0..4 {
            for col in 0..3 {
                expected.push((row, col));
            }
        }
        assert_eq!(revealed_coords(&delta), expected);
        for row in 0..4 {
            assert_eq!(board.view_at((row, 1)), CellView::Empty);
            assert!(matches!(board.view_at((row, 2)), CellView::Count(_)));
            assert_eq!(board.view_at((row, 4)), CellView::Hidden);
        }
        assert_eq!(board.revealed_safe_count(), 12);
    }

    #[test]
    fn delta_reports_counts_in_reveal_order() {
        let mut board = board((1, 4), &[(0, 3)]);

        let delta = board.reveal((0, 0));

        assert_eq!(delta.cells[0], RevealedCell {
            coords: (0, 0),
            adjacent_mines: 0,
        });
        assert_eq!(delta.cells.len(), 3);
        assert!(delta.cells.contains(&RevealedCell {
            coords: (0, 2),
            adjacent_mines: 1,
        }));
        assert_eq!(delta.outcome, RevealOutcome::Won);
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut board = board((3, 3), &[(0, 0)]);

        let delta = board.reveal((1, 1));

        assert_eq!(delta.cells, [RevealedCell {
            coords: (1, 1),
            adjacent_mines: 1,
        }]);
        assert_eq!(delta.mine, None);
        assert!(delta.has_update());
        assert_eq!(board.view_at((0, 1)), CellView::Hidden);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board((3, 3), &[(2, 2)]);
        assert_eq!(board.toggle_flag((0, 2)), MarkOutcome::Flagged);

        let delta = board.reveal((0, 0));

        assert_eq!(delta.cells.len(), 7);
        assert_eq!(board.cell_at((0, 2)), EngineCell::Flagged);
        assert_eq!(delta.outcome, RevealOutcome::Revealed);
        assert!(!board.check_win());
    }

    #[test]
    fn reveal_ignores_out_of_bounds_and_flagged_cells() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.toggle_flag((1, 1));

        assert_eq!(board.reveal((2, 0)), RevealDelta::no_change());
        assert_eq!(board.reveal((0, 9)), RevealDelta::no_change());
        assert_eq!(board.reveal((1, 1)), RevealDelta::no_change());
        assert!(!board.reveal((1, 1)).has_update());
        assert_eq!(board.cell_at((1, 1)), EngineCell::Flagged);
        assert_eq!(board.toggle_flag((5, 5)), MarkOutcome::NoChange);
    }

    #[test]
    fn hitting_a_mine_touches_only_that_cell() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);

        let delta = board.reveal((0, 0));

        assert_eq!(delta.outcome, RevealOutcome::HitMine);
        assert!(delta.cells.is_empty());
        assert_eq!(delta.mine, Some((0, 0)));
        assert!(delta.has_update());
        assert_eq!(board.view_at((0, 0)), CellView::RevealedMine);
        assert_eq!(board.view_at((1, 1)), CellView::Hidden);
        assert_eq!(board.revealed_safe_count(), 0);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 1));

        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::NoChange);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn reveal_all_mines_annotates_only_mines_and_wrong_flags() {
        let mut board = board((3, 3), &[(0, 0), (0, 2), (2, 2)]);
        board.toggle_flag((0, 2));
        board.toggle_flag((1, 0));
        board.reveal((1, 1));
        board.reveal((2, 2));

        let mut annotated = board.reveal_all_mines();
        annotated.sort_by_key(|cell| cell.coords);

        assert_eq!(annotated, [
            AnnotatedCell {
                coords: (0, 0),
                view: CellView::ExplodedMine,
            },
            AnnotatedCell {
                coords: (1, 0),
                view: CellView::MisflaggedMine,
            },
        ]);
        assert_eq!(board.view_at((0, 2)), CellView::Flagged);
        assert_eq!(board.view_at((2, 2)), CellView::RevealedMine);
        assert_eq!(board.view_at((1, 1)), CellView::Count(3));
        assert!(board.cell_at((1, 0)).is_flagged());
        assert!(!board.cell_at((1, 0)).is_revealed());
        assert_eq!(board.view_at((2, 0)), CellView::Hidden);
    }

    #[test]
    fn check_win_ignores_flags() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((0, 1));
        board.reveal((1, 0));
        assert!(!board.check_win());

        assert_eq!(board.reveal((1, 1)).outcome, RevealOutcome::Won);
        assert!(board.check_win());
        assert_eq!(board.view_at((0, 0)), CellView::Hidden);
    }
}
