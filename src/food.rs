use crate::error::GameError;
use crate::grid::{Cell, GridSize};
use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

/// Random draws tried before falling back to scanning the free cells.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Picks a uniformly random cell that `is_occupied` rejects.
///
/// Cheap rejection sampling covers the usual sparse board. Once that runs out
/// of attempts the free cells are enumerated and one is chosen directly, so
/// the call always terminates. A completely full grid is reported as
/// [`GameError::BoardFull`].
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    is_occupied: &dyn Fn(Cell) -> bool,
) -> Result<Cell, GameError> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        if !is_occupied(cell) {
            debug!("Food placed at ({}, {})", cell.col, cell.row);
            return Ok(cell);
        }
    }

    debug!(
        "Food sampling missed {} times, choosing from free cells",
        MAX_SAMPLE_ATTEMPTS
    );

    let cell = grid
        .cells()
        .filter(|cell| !is_occupied(*cell))
        .choose(rng)
        .ok_or(GameError::BoardFull {
            width: grid.width,
            height: grid.height,
        })?;

    debug!("Food placed at ({}, {})", cell.col, cell.row);
    Ok(cell)
}
