use log::warn;
use rand::Rng;

use crate::config::PLACEMENT_ATTEMPTS;
use crate::grid::{Board, Position, Rect};

/// Picks a random lattice position (spacing `step`) for which `is_blocked`
/// returns false.
///
/// Samples uniformly up to [`PLACEMENT_ATTEMPTS`] times, then scans every
/// lattice position and picks uniformly among the free ones. Returns `None`
/// only when no free position exists.
pub fn place_random<R, F>(
    rng: &mut R,
    board: Board,
    step: i32,
    is_blocked: F,
) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let columns = board.width / step;
    let rows = board.height / step;
    if columns <= 0 || rows <= 0 {
        return None;
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Position::new(
            rng.gen_range(0..columns) * step,
            rng.gen_range(0..rows) * step,
        );
        if !is_blocked(candidate) {
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = board
        .lattice(step)
        .filter(|cell| !is_blocked(*cell))
        .collect();
    warn!(
        "random placement gave up after {PLACEMENT_ATTEMPTS} samples; {} free positions remain",
        candidates.len()
    );

    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Drops `count` square obstacles of side `side` on the coarse lattice.
///
/// An obstacle never covers a cell for which `is_reserved` holds and never
/// overlaps another obstacle. Fewer than `count` are returned only when the
/// board has no room left.
pub fn generate_obstacles<R, F>(
    rng: &mut R,
    board: Board,
    side: i32,
    count: usize,
    is_reserved: F,
) -> Vec<Rect>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let mut obstacles: Vec<Rect> = Vec::with_capacity(count);

    for _ in 0..count {
        let placed = place_random(rng, board, side, |origin| {
            let candidate = Rect::square(origin, side);
            candidate.cells(board.cell_size).any(&is_reserved)
                || obstacles.iter().any(|existing| existing.intersects(candidate))
        });

        match placed {
            Some(origin) => obstacles.push(Rect::square(origin, side)),
            None => {
                warn!("no room for obstacle {} of {count}", obstacles.len() + 1);
                break;
            }
        }
    }

    obstacles
}
