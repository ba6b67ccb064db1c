//! Moore-neighbourhood adjacency used by placement, validation and statistics.

use crate::CellCoord;

const OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Enumerates the up to eight cells surrounding `cell`, clipped to the grid bounds.
///
/// Offsets are visited row by row, so the result is ordered row-major across the
/// 3x3 window. Corner cells yield three neighbours, edge cells five, interior
/// cells eight, and a 1x1 grid none at all.
pub fn neighbors(cell: CellCoord, width: u32, height: u32) -> impl Iterator<Item = CellCoord> {
    let column = i64::from(cell.column());
    let row = i64::from(cell.row());
    let width = i64::from(width);
    let height = i64::from(height);

    OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let x = column + dx;
        let y = row + dy;
        if (0..width).contains(&x) && (0..height).contains(&y) {
            Some(CellCoord::new(x as u32, y as u32))
        } else {
            None
        }
    })
}
