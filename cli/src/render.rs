use sweeper_core::{BoardSnapshot, CellView, EngineState};

pub fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Empty => '.',
        CellView::Count(count) => char::from(b'0' + count),
        CellView::RevealedMine => '*',
        CellView::ExplodedMine => 'X',
        CellView::MisflaggedMine => 'x',
    }
}

pub fn status_line(snapshot: &BoardSnapshot) -> String {
    let status = match snapshot.state {
        EngineState::InProgress => "in progress",
        EngineState::Won => "cleared, you win!",
        EngineState::Lost => "boom, you lose",
    };
    format!("{status} | mines left: {}", snapshot.mines_left())
}

/// Draws the board with row and column indices (columns modulo 10).
pub fn render(snapshot: &BoardSnapshot) -> String {
    let (rows, cols) = snapshot.size;
    let label_width = rows.saturating_sub(1).to_string().len().max(2);

    let mut out = " ".repeat(label_width + 1);
    for col in 0..cols {
        out.push(char::from(b'0' + col % 10));
    }
    out.push('\n');

    for (row, cells) in snapshot.rows().enumerate() {
        out.push_str(&format!("{row:>label_width$} "));
        out.extend(cells.iter().map(|&view| glyph(view)));
        out.push('\n');
    }

    out.push_str(&status_line(snapshot));
    out
}
