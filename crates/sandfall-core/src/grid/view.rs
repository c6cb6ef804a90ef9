//! Read-only access to the grid for renderers and creature controllers

use sandfall_simulation::{Cell, MaterialId, MaterialType, Materials};

use super::cells::CellBuffer;

/// Orthogonal neighbor offsets: left, right, up, down
pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All 8 neighbor offsets, orthogonal first
pub const SURROUNDING: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Borrowed snapshot of the cells and material table
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    cells: &'a CellBuffer,
    materials: &'a Materials,
}

impl<'a> GridView<'a> {
    pub(crate) fn new(cells: &'a CellBuffer, materials: &'a Materials) -> Self {
        Self { cells, materials }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn materials(&self) -> &'a Materials {
        self.materials
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.cells.in_bounds(x, y)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&'a Cell> {
        self.cells.get(x, y)
    }

    pub fn material_at(&self, x: i32, y: i32) -> Option<u16> {
        self.cells.material_at(x, y)
    }

    /// In bounds and empty or gaseous, i.e. passable for a creature
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        match self.material_at(x, y) {
            None | Some(MaterialId::EMPTY) => true,
            Some(id) => self
                .materials
                .get(id)
                .is_some_and(|def| def.material_type == MaterialType::Gas),
        }
    }

    /// Whether any of the given neighbor offsets holds `material_id`
    pub fn any_neighbor(&self, x: i32, y: i32, offsets: &[(i32, i32)], material_id: u16) -> bool {
        offsets
            .iter()
            .any(|&(dx, dy)| self.material_at(x + dx, y + dy) == Some(material_id))
    }

    /// Occupied cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &'a Cell)> + use<'a> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(buffer: &mut CellBuffer, materials: &Materials, x: i32, y: i32, id: u16) {
        let def = materials.get(id).unwrap();
        buffer.set(x, y, Some(Cell::new(def, def.colors[0], 1)));
    }

    #[test]
    fn test_is_open() {
        let materials = Materials::new();
        let mut buffer = CellBuffer::new(5, 5);
        place(&mut buffer, &materials, 1, 1, MaterialId::STEAM);
        place(&mut buffer, &materials, 2, 2, MaterialId::WATER);
        place(&mut buffer, &materials, 3, 3, MaterialId::STONE);

        let view = GridView::new(&buffer, &materials);
        assert!(view.is_open(0, 0));
        assert!(view.is_open(1, 1));
        assert!(!view.is_open(2, 2));
        assert!(!view.is_open(3, 3));
        assert!(!view.is_open(-1, 0));
        assert!(!view.is_open(0, 5));
    }

    #[test]
    fn test_any_neighbor() {
        let materials = Materials::new();
        let mut buffer = CellBuffer::new(5, 5);
        place(&mut buffer, &materials, 3, 3, MaterialId::WATER);

        let view = GridView::new(&buffer, &materials);
        assert!(view.any_neighbor(2, 2, &SURROUNDING, MaterialId::WATER));
        assert!(!view.any_neighbor(2, 2, &ORTHOGONAL, MaterialId::WATER));
        assert!(view.any_neighbor(3, 2, &ORTHOGONAL, MaterialId::WATER));
        assert!(!view.any_neighbor(0, 0, &SURROUNDING, MaterialId::WATER));
    }
}
