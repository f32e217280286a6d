//! Per-vertex visitation state of a depth-first traversal.
//!
//! The traversal reads and writes colors through the [`ColorMap`] trait, so
//! the caller decides how the state is stored. A vertex that has no entry in
//! the map is [white](Color::White).

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use fixedbitset::FixedBitSet;

use crate::core::Vertex;

/// Visitation state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Not discovered yet.
    White,
    /// Discovered, but some of its descendants are still being processed. The
    /// gray vertices form the path from the root to the current vertex.
    Gray,
    /// Finished, all its descendants were processed.
    Black,
}

/// A keyed container of vertex colors.
pub trait ColorMap {
    /// Returns the color of the vertex, or `None` if the map has no entry for
    /// it.
    fn color(&self, vertex: Vertex) -> Option<Color>;

    fn set_color(&mut self, vertex: Vertex, color: Color);

    /// Returns `true` if the vertex has no entry or is explicitly white.
    fn is_white(&self, vertex: Vertex) -> bool {
        matches!(self.color(vertex), None | Some(Color::White))
    }
}

impl<S: BuildHasher> ColorMap for HashMap<Vertex, Color, S> {
    fn color(&self, vertex: Vertex) -> Option<Color> {
        self.get(&vertex).copied()
    }

    fn set_color(&mut self, vertex: Vertex, color: Color) {
        self.insert(vertex, color);
    }
}

impl ColorMap for BTreeMap<Vertex, Color> {
    fn color(&self, vertex: Vertex) -> Option<Color> {
        self.get(&vertex).copied()
    }

    fn set_color(&mut self, vertex: Vertex, color: Color) {
        self.insert(vertex, color);
    }
}

impl<M: ColorMap + ?Sized> ColorMap for &mut M {
    fn color(&self, vertex: Vertex) -> Option<Color> {
        (**self).color(vertex)
    }

    fn set_color(&mut self, vertex: Vertex, color: Color) {
        (**self).set_color(vertex, color)
    }

    fn is_white(&self, vertex: Vertex) -> bool {
        (**self).is_white(vertex)
    }
}

/// Dense color map storing one byte per vertex.
///
/// The storage grows on demand when a color is set for a vertex beyond the
/// current length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorArray {
    colors: Vec<u8>,
}

const ABSENT: u8 = 0;
const WHITE: u8 = 1;
const GRAY: u8 = 2;
const BLACK: u8 = 3;

impl ColorArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the map with room for vertices `0..vertex_count`.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            colors: vec![ABSENT; vertex_count],
        }
    }

    /// Returns the number of vertices the map has room for.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Removes all entries while keeping the allocation.
    pub fn clear(&mut self) {
        self.colors.fill(ABSENT);
    }
}

impl ColorMap for ColorArray {
    fn color(&self, vertex: Vertex) -> Option<Color> {
        if vertex < 0 {
            return None;
        }

        match self.colors.get(vertex as usize).copied()? {
            WHITE => Some(Color::White),
            GRAY => Some(Color::Gray),
            BLACK => Some(Color::Black),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// Panics if the vertex is negative.
    fn set_color(&mut self, vertex: Vertex, color: Color) {
        assert!(vertex >= 0, "negative vertex {vertex} has no color");

        let index = vertex as usize;
        if index >= self.colors.len() {
            self.colors.resize(index + 1, ABSENT);
        }

        self.colors[index] = match color {
            Color::White => WHITE,
            Color::Gray => GRAY,
            Color::Black => BLACK,
        };
    }
}

/// Bit-packed color map using two bits per vertex.
///
/// A white vertex is indistinguishable from an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitColorMap {
    discovered: FixedBitSet,
    finished: FixedBitSet,
}

impl BitColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            discovered: FixedBitSet::with_capacity(vertex_count),
            finished: FixedBitSet::with_capacity(vertex_count),
        }
    }

    /// Returns the number of discovered vertices, including the finished ones.
    pub fn discovered_count(&self) -> usize {
        self.discovered.count_ones(..)
    }

    pub fn clear(&mut self) {
        self.discovered.clear();
        self.finished.clear();
    }
}

impl ColorMap for BitColorMap {
    fn color(&self, vertex: Vertex) -> Option<Color> {
        if vertex < 0 {
            return None;
        }

        let index = vertex as usize;
        if self.finished.contains(index) {
            Some(Color::Black)
        } else if self.discovered.contains(index) {
            Some(Color::Gray)
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics if the vertex is negative.
    fn set_color(&mut self, vertex: Vertex, color: Color) {
        assert!(vertex >= 0, "negative vertex {vertex} has no color");

        let index = vertex as usize;
        if index >= self.discovered.len() {
            self.discovered.grow(index + 1);
            self.finished.grow(index + 1);
        }

        let (discovered, finished) = match color {
            Color::White => (false, false),
            Color::Gray => (true, false),
            Color::Black => (true, true),
        };

        self.discovered.set(index, discovered);
        self.finished.set(index, finished);
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    fn test_color_map<M: ColorMap + Default>() {
        let mut colors = M::default();

        assert_eq!(colors.color(3), None);
        assert!(colors.is_white(3));

        colors.set_color(3, Color::Gray);
        assert_eq!(colors.color(3), Some(Color::Gray));
        assert!(!colors.is_white(3));

        colors.set_color(3, Color::Black);
        assert_eq!(colors.color(3), Some(Color::Black));

        colors.set_color(0, Color::White);
        assert!(colors.is_white(0));

        assert_eq!(colors.color(-1), None);
        assert_eq!(colors.color(100), None);
    }

    #[test]
    fn hash_map() {
        test_color_map::<HashMap<Vertex, Color>>();
        test_color_map::<FxHashMap<Vertex, Color>>();
    }

    #[test]
    fn btree_map() {
        test_color_map::<BTreeMap<Vertex, Color>>();
    }

    #[test]
    fn color_array() {
        test_color_map::<ColorArray>();

        let mut colors = ColorArray::with_capacity(2);
        colors.set_color(5, Color::Gray);
        assert_eq!(colors.len(), 6);

        colors.clear();
        assert_eq!(colors.color(5), None);
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn bit_color_map() {
        test_color_map::<BitColorMap>();

        let mut colors = BitColorMap::new();
        colors.set_color(1, Color::Gray);
        colors.set_color(2, Color::Black);
        assert_eq!(colors.discovered_count(), 2);

        colors.set_color(2, Color::White);
        assert_eq!(colors.color(2), None);
    }

    #[test]
    fn mut_ref() {
        fn paint<M: ColorMap>(mut colors: M) {
            colors.set_color(1, Color::Gray);
        }

        let mut colors = ColorArray::new();
        paint(&mut colors);

        assert_eq!(colors.color(1), Some(Color::Gray));
    }

    #[test]
    #[should_panic(expected = "negative vertex")]
    fn color_array_negative() {
        ColorArray::new().set_color(-1, Color::Gray);
    }
}
