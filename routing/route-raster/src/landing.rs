//! Clearing transition landings.

use atrium_spatial::{CellBounds, CellState, OccupancyGrid};
use route_types::Transition;

/// Frees a square of cells around every landing of `transitions` on `floor`.
///
/// The square is centered on the cell containing the landing and reaches
/// `clearance` cells in each direction. Returns the number of landings cleared.
pub fn clear_landings<'a>(
    grid: &mut OccupancyGrid,
    transitions: impl IntoIterator<Item = &'a Transition>,
    floor: i32,
    clearance: u32,
) -> usize {
    let mut cleared = 0;
    for transition in transitions {
        for landing in transition.landings_on(floor) {
            let cell = grid.world_to_cell(&landing);
            grid.fill(&CellBounds::around(cell, clearance), CellState::Free);
            cleared += 1;
        }
    }
    cleared
}
