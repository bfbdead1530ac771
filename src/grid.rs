// Uniform bucket grid for finding nearby particle pairs without testing every
// pair. Cells are `cell_size` wide, so any pair closer than `cell_size` sits in
// the same or an adjacent cell.

use std::collections::HashMap;

pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    pub fn build<'a, I>(positions: I, cell_size: f64) -> SpatialGrid
    where
        I: IntoIterator<Item = &'a [f64; 2]>,
    {
        let mut grid = SpatialGrid {
            cell_size,
            cells: HashMap::new(),
        };
        for (i, pos) in positions.into_iter().enumerate() {
            let key = grid.cell_of(*pos);
            grid.cells.entry(key).or_insert_with(Vec::new).push(i);
        }
        grid
    }

    fn cell_of(&self, pos: [f64; 2]) -> (i64, i64) {
        (
            (pos[0] / self.cell_size).floor() as i64,
            (pos[1] / self.cell_size).floor() as i64,
        )
    }

    // Every (a, b) with a < b whose cells touch, sorted
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (&(cx, cy), members) in &self.cells {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    // Keys saturate for far-out positions, so stay in range here too
                    let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                    if let Some(neighbours) = self.cells.get(&key) {
                        for &a in members {
                            for &b in neighbours {
                                if a < b {
                                    pairs.push((a, b));
                                }
                            }
                        }
                    }
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
