use crate::env::CaveOracle;
use crate::state::Position;

/// Division rounding half away from zero. `denominator` must be positive.
fn round_div(numerator: i32, denominator: i32) -> i32 {
    if numerator >= 0 {
        (2 * numerator + denominator) / (2 * denominator)
    } else {
        -((-2 * numerator + denominator) / (2 * denominator))
    }
}

/// Grids a projection from `start` toward `target` passes through.
///
/// The path excludes `start`, ends at `target`, at the first grid that blocks
/// projections (which is included), at the first grid farther than `range`
/// from `start`, or after `max_path` grids, whichever comes first.
pub fn project_path<C>(
    cave: &C,
    start: Position,
    target: Position,
    range: i32,
    max_path: usize,
) -> Vec<Position>
where
    C: CaveOracle + ?Sized,
{
    let dx = target.x - start.x;
    let dy = target.y - start.y;
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        return Vec::new();
    }

    let max_steps = i32::try_from(max_path).unwrap_or(i32::MAX);
    let mut path = Vec::new();
    for step in 1..=max_steps {
        let grid = if ax >= ay {
            Position::new(start.x + step * dx.signum(), start.y + round_div(step * dy, ax))
        } else {
            Position::new(start.x + round_div(step * dx, ay), start.y + step * dy.signum())
        };
        if start.distance(grid) > range {
            break;
        }

        path.push(grid);
        if grid == target || !cave.is_projectable(grid) {
            break;
        }
    }
    path
}
