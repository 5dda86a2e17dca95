use crate::state::Position;

/// Cells strictly between `from` and `to` on the Bresenham line, ordered
/// from `from` towards `to`. Both endpoints are excluded.
///
/// The error term starts at `dx - dy` and both step tests are strict, so a
/// tie between two candidate cells resolves along the x axis first.
pub fn cells_between(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::new();
    let mut err = dx - dy;
    let (mut x, mut y) = (from.x, from.y);

    while (x, y) != (to.x, to.y) {
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
        if (x, y) != (to.x, to.y) {
            cells.push(Position::new(x, y));
        }
    }

    cells
}
