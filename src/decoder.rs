use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::{
    char_heap::CharHeap,
    error::{HuffError, Result},
    tree::CodeTable,
};

/// Turns a payload bit stream back into symbols.
#[derive(Debug, Clone)]
pub struct Decoder {
    heap: CharHeap,
}

impl Decoder {
    pub fn new(table: &CodeTable) -> Result<Self> {
        Ok(Decoder {
            heap: CharHeap::from_code_table(table)?,
        })
    }

    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(bits.len() / self.heap.max_path_len().max(1));
        self.decode_into(bits, &mut out)?;
        Ok(out)
    }

    /// Appends the symbols in `bits` to `out`.
    ///
    /// `bits` must end on a code boundary. On error `out` may hold the symbols
    /// decoded before the failure; callers discard it.
    pub fn decode_into(&self, bits: &BitSlice<u8, Msb0>, out: &mut Vec<u8>) -> Result<()> {
        let max_len = self.heap.max_path_len();
        let mut candidate: BitVec<u8, Msb0> = BitVec::with_capacity(max_len);

        for (position, bit) in bits.iter().by_vals().enumerate() {
            candidate.push(bit);
            if let Some(symbol) = self.heap.get(&candidate) {
                out.push(symbol);
                candidate.clear();
            } else if candidate.len() >= max_len {
                // No code is longer, nothing further can match.
                return Err(HuffError::truncated(position + 1 - candidate.len(), candidate.len()));
            }
        }

        if !candidate.is_empty() {
            return Err(HuffError::truncated(bits.len() - candidate.len(), candidate.len()));
        }
        Ok(())
    }
}
