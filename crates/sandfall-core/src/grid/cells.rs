//! Flat cell storage with bounds-checked access

use sandfall_simulation::Cell;

/// Row-major `width * height` slots, `None` meaning empty
#[derive(Clone, Debug)]
pub struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl CellBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).and_then(|i| self.cells[i].as_mut())
    }

    pub fn material_at(&self, x: i32, y: i32) -> Option<u16> {
        self.get(x, y).map(|cell| cell.material_id)
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.get(x, y).is_none()
    }

    /// Write a slot; out of range is a no-op
    pub fn set(&mut self, x: i32, y: i32, cell: Option<Cell>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Empty a slot, returning what was there
    pub fn take(&mut self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).and_then(|i| self.cells[i].take())
    }

    /// Exchange two slots (either may be empty)
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        match (self.index(x1, y1), self.index(x2, y2)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Start of a tick: nothing has been processed or moved yet
    pub fn reset_tick_flags(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.updated = false;
            cell.moved = false;
        }
    }

    /// Occupied by a cell that was already relocated this tick
    pub fn has_moved(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.moved)
    }

    /// Occupied cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref()
                .map(|cell| ((i % width) as i32, (i / width) as i32, cell))
        })
    }

    /// New buffer of the given size holding the overlapping region of this one
    pub fn resized(&self, width: usize, height: usize) -> Self {
        let mut out = Self::new(width, height);
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                out.cells[y * width + x] = self.cells[y * self.width + x];
            }
        }
        out
    }
}
