//! Chunked framing of the compressed body.
//!
//! The body is a run of fixed-size chunks, the last one possibly shorter. Each
//! chunk is `(trailing: u8, payload)`, where `trailing` counts the filler bits
//! at the end of the payload. A code never straddles two chunks, so every chunk
//! starts on a symbol boundary and can be decoded on its own.

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView};

use crate::error::{HuffError, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// One header byte plus room for the longest possible code (255 bits).
pub const MIN_CHUNK_SIZE: usize = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    size: usize,
}

impl ChunkLayout {
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_CHUNK_SIZE {
            return Err(HuffError::InvalidChunkSize {
                size,
                minimum: MIN_CHUNK_SIZE,
            });
        }
        Ok(ChunkLayout { size })
    }

    /// Chunk size in bytes, header included.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn payload_bits(&self) -> usize {
        (self.size - 1) * u8::BITS as usize
    }
}

impl Default for ChunkLayout {
    fn default() -> Self {
        ChunkLayout {
            size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Packs codes into chunks.
///
/// Codes are staged in `pending`; a code is only appended once it is known to
/// fit the current chunk; otherwise the chunk is sealed first.
#[derive(Debug)]
pub struct ChunkWriter {
    layout: ChunkLayout,
    out: Vec<u8>,
    pending: BitVec<u8, Msb0>,
    sealed: usize,
}

impl ChunkWriter {
    pub fn new(layout: ChunkLayout) -> Self {
        ChunkWriter {
            layout,
            out: Vec::new(),
            pending: BitVec::with_capacity(layout.payload_bits()),
            sealed: 0,
        }
    }

    pub fn push(&mut self, code: &BitSlice<u8, Msb0>) {
        debug_assert!(code.len() <= self.layout.payload_bits());
        let capacity = self.layout.payload_bits();
        if !self.pending.is_empty() && self.pending.len() + code.len() > capacity {
            self.seal(capacity);
        }
        self.pending.extend_from_bitslice(code);
    }

    /// Number of chunks emitted so far.
    pub fn sealed(&self) -> usize {
        self.sealed
    }

    /// Flushes the last partial chunk, padded to a byte boundary.
    pub fn finish(mut self) -> Vec<u8> {
        if !self.pending.is_empty() {
            let target = self.pending.len().next_multiple_of(u8::BITS as usize);
            self.seal(target);
        }
        log::debug!("Wrote {} chunks ({} bytes)", self.sealed, self.out.len());
        self.out
    }

    fn seal(&mut self, target_bits: usize) {
        let trailing = target_bits - self.pending.len();
        debug_assert!(trailing <= u8::MAX as usize);

        self.out.push(trailing as u8);
        self.pending.resize(target_bits, false);
        self.out.extend_from_slice(self.pending.as_raw_slice());
        self.pending.clear();
        self.sealed += 1;
    }
}

/// Byte length of the body that [`ChunkWriter`] produces for codes of the
/// given lengths, without packing any bits.
pub fn packed_body_len(code_lengths: impl IntoIterator<Item = usize>, layout: ChunkLayout) -> usize {
    let capacity = layout.payload_bits();
    let mut full_chunks = 0;
    let mut pending = 0;
    for length in code_lengths {
        if pending > 0 && pending + length > capacity {
            full_chunks += 1;
            pending = 0;
        }
        pending += length;
    }

    let tail = if pending > 0 { 1 + pending.div_ceil(8) } else { 0 };
    full_chunks * layout.size() + tail
}

fn chunk_bits(index: usize, offset: usize, chunk: &[u8]) -> Result<&BitSlice<u8, Msb0>> {
    let (&trailing, payload) = chunk
        .split_first()
        .ok_or(HuffError::unexpected_end(offset))?;
    let bits = payload.view_bits::<Msb0>();
    let keep = bits
        .len()
        .checked_sub(trailing as usize)
        .ok_or(HuffError::MalformedChunk {
            chunk: index,
            trailing,
            available: bits.len(),
        })?;
    Ok(&bits[..keep])
}

/// Iterates the payload bits of every chunk, filler bits removed.
pub fn chunks(
    body: &[u8],
    layout: ChunkLayout,
) -> impl Iterator<Item = Result<&BitSlice<u8, Msb0>>> + '_ {
    body.chunks(layout.size())
        .enumerate()
        .map(move |(index, chunk)| chunk_bits(index, index * layout.size(), chunk))
}

/// Concatenates the payload bits of every chunk into one stream.
pub fn read_body(body: &[u8], layout: ChunkLayout) -> Result<BitVec<u8, Msb0>> {
    let mut bits = BitVec::with_capacity(body.len() * u8::BITS as usize);
    for chunk in chunks(body, layout) {
        bits.extend_from_bitslice(chunk?);
    }
    Ok(bits)
}
