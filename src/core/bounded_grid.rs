use crate::core::bounds::BoundsOriginRoot;
use crate::core::models::Vec2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area().max(0) as usize];
        BoundedGrid { bounds, cells }
    }

    /// Builds a grid from rows which all have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map(|row| row.len()).unwrap_or(0) as i32;
        debug_assert!(rows.iter().all(|row| row.len() as i32 == width));
        BoundedGrid {
            bounds: BoundsOriginRoot::new(height, width),
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + use<T> {
        let BoundsOriginRoot { height, width } = self.bounds;
        (0..height).flat_map(move |i| (0..width).map(move |j| Vec2 { i, j }))
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[(index.i * self.bounds.width + index.j) as usize]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        &mut self.cells[(index.i * self.bounds.width + index.j) as usize]
    }
}
