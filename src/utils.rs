use bit_set::BitSet;
use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash},
};

use crate::cells::GridCoordinate;
use crate::grid::Grid;

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash set using fnv hashing, much faster than the default on small keys such as grid
/// coordinates.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Set of grid cells stored as bits at each cell's row major index.
#[derive(Debug, Clone)]
pub struct CellBitSet {
    bits: BitSet,
    columns: usize,
}

impl CellBitSet {
    pub fn for_grid(grid: &Grid) -> CellBitSet {
        CellBitSet {
            bits: BitSet::with_capacity(grid.size()),
            columns: grid.columns().0,
        }
    }

    #[inline]
    fn index(&self, coord: GridCoordinate) -> usize {
        coord.y as usize * self.columns + coord.x as usize
    }

    /// Returns true if the coordinate was not already present.
    pub fn insert(&mut self, coord: GridCoordinate) -> bool {
        let index = self.index(coord);
        self.bits.insert(index)
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.bits.contains(self.index(coord))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = GridCoordinate> + 'a {
        let columns = self.columns;
        self.bits.iter().map(move |index| {
            GridCoordinate::new((index % columns) as u32, (index / columns) as u32)
        })
    }
}
