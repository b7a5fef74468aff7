//! Decode-side index from code paths back to symbols.
//!
//! Paths up to [`DENSE_DEPTH`] bits are addressed directly in an implicit
//! binary heap: starting from the root at index 0, a `0` bit moves to
//! `index * 2 + 1` and a `1` bit to `index * 2 + 2`. The root itself is never
//! a code, so slot `index - 1` holds the symbol and a heap of depth `d` needs
//! `2^(d+1) - 2` slots. Longer paths live in a hash map.

use std::collections::{BTreeMap, HashMap};

use bitvec::{order::Msb0, slice::BitSlice};

use crate::{
    error::{HuffError, Result},
    tree::{Code, CodeTable},
};

/// Longest path kept in the dense array.
pub const DENSE_DEPTH: usize = 13;

/// Path to symbol mapping, the inverse of a [`CodeTable`].
pub type InverseTable = BTreeMap<Code, u8>;

pub fn invert(table: &CodeTable) -> InverseTable {
    table
        .iter()
        .map(|(symbol, code)| (code.clone(), *symbol))
        .collect()
}

fn heap_index(path: &BitSlice<u8, Msb0>) -> usize {
    path.iter()
        .fold(0, |index, bit| index * 2 + if *bit { 2 } else { 1 })
}

#[derive(Debug, Clone)]
pub struct CharHeap {
    depth: usize,
    max_path_len: usize,
    keys: Vec<Option<u8>>,
    overflow: HashMap<Code, u8>,
}

impl CharHeap {
    pub fn new(map: &InverseTable) -> Result<Self> {
        let max_path_len = map.keys().map(|path| path.len()).max().unwrap_or(0);
        let depth = max_path_len.min(DENSE_DEPTH);
        let len = (1usize << (depth + 1)) - 2;

        let mut heap = CharHeap {
            depth,
            max_path_len,
            keys: vec![None; len],
            overflow: HashMap::new(),
        };

        for (path, symbol) in map {
            if path.is_empty() {
                return Err(HuffError::invalid_input("code paths must not be empty"));
            }
            if path.len() > DENSE_DEPTH {
                heap.overflow.insert(path.clone(), *symbol);
                continue;
            }

            let index = heap_index(path);
            let slot = heap
                .keys
                .get_mut(index - 1)
                .ok_or(HuffError::IndexOutOfRange { index, len })?;
            *slot = Some(*symbol);
        }

        log::debug!(
            "Char heap: depth {}, {} slots, {} overflow paths",
            heap.depth,
            heap.keys.len(),
            heap.overflow.len()
        );
        Ok(heap)
    }

    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        Self::new(&invert(table))
    }

    /// Returns the symbol whose code is exactly `path`.
    ///
    /// A path that is only a prefix of some code yields `None`, the same as a
    /// path that matches nothing.
    pub fn get(&self, path: &BitSlice<u8, Msb0>) -> Option<u8> {
        if path.is_empty() {
            return None;
        }
        if path.len() > DENSE_DEPTH {
            return self.overflow.get(path).copied();
        }
        self.keys.get(heap_index(path) - 1).copied().flatten()
    }

    /// Length of the longest code, dense or overflow.
    pub fn max_path_len(&self) -> usize {
        self.max_path_len
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
