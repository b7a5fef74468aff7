//! # huffchunk
//!
//! Single-file Huffman compression with a self-describing container: a code
//! dictionary followed by a body split into fixed-size chunks.
//!
//! ```
//! let original = b"so much depends upon a red wheel barrow".to_vec();
//! let container = huffchunk::compress(&original)?;
//! assert_eq!(huffchunk::decompress(&container)?, original);
//! # Ok::<(), huffchunk::HuffError>(())
//! ```

use bitvec::{order::Msb0, slice::BitSlice};

pub mod char_heap;
pub mod chunk;
pub mod cli;
pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod frequency;
pub mod fs;
pub mod report;
pub mod tree;

pub use chunk::{ChunkLayout, DEFAULT_CHUNK_SIZE};
pub use decoder::Decoder;
pub use error::{HuffError, Result};
pub use frequency::{tally_frequency, FrequencyTable};
pub use tree::{Code, CodeTable, HuffmanTree};

use chunk::{packed_body_len, read_body, ChunkWriter};
use dictionary::{decode_dictionary, encode_dictionary, encoded_dictionary_len};

/// Codec settings shared by the encode and decode side.
///
/// Both sides must agree on the chunk size; it is not stored in the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub chunk_layout: ChunkLayout,
}

impl Options {
    pub fn with_chunk_size(size: usize) -> Result<Self> {
        Ok(Options {
            chunk_layout: ChunkLayout::new(size)?,
        })
    }
}

/// The two sections of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedParts {
    pub dictionary: Vec<u8>,
    pub body: Vec<u8>,
}

impl EncodedParts {
    /// Total container size in bytes.
    pub fn len(&self) -> usize {
        self.dictionary.len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_container(self) -> Vec<u8> {
        let mut container = self.dictionary;
        container.extend(self.body);
        container
    }
}

/// Everything needed to decode bodies written with one dictionary.
#[derive(Debug, Clone)]
pub struct DecodeContext {
    decoder: Decoder,
    table: CodeTable,
    dictionary_len: usize,
    layout: ChunkLayout,
}

impl DecodeContext {
    /// Bytes taken by the dictionary section, terminator included.
    pub fn dictionary_len(&self) -> usize {
        self.dictionary_len
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }
}

fn code_table_for(raw: &[u8]) -> Result<CodeTable> {
    if raw.is_empty() {
        return Err(HuffError::invalid_input("input is empty"));
    }
    let frequencies = tally_frequency(raw);
    log::trace!("Byte frequency: {:?}", frequencies);
    Ok(HuffmanTree::build(&frequencies)?.code_table())
}

pub fn build_encoder(raw: &[u8]) -> Result<EncodedParts> {
    build_encoder_with(raw, Options::default())
}

pub fn build_encoder_with(raw: &[u8], options: Options) -> Result<EncodedParts> {
    let table = code_table_for(raw)?;
    let dictionary = encode_dictionary(&table)?;

    let mut lookup = [BitSlice::<u8, Msb0>::empty(); 256];
    for (symbol, code) in &table {
        lookup[*symbol as usize] = code.as_bitslice();
    }

    let mut writer = ChunkWriter::new(options.chunk_layout);
    for byte in raw {
        writer.push(lookup[*byte as usize]);
    }
    let body = writer.finish();

    log::debug!(
        "Encoded {} bytes: {} symbols, dictionary {} bytes, body {} bytes",
        raw.len(),
        table.len(),
        dictionary.len(),
        body.len()
    );
    Ok(EncodedParts { dictionary, body })
}

/// Reads the dictionary at the start of `dictionary` and prepares a decoder.
///
/// The slice may continue past the dictionary, e.g. a whole container; see
/// [`DecodeContext::dictionary_len`].
pub fn build_decoder(dictionary: &[u8]) -> Result<DecodeContext> {
    build_decoder_with(dictionary, Options::default())
}

pub fn build_decoder_with(dictionary: &[u8], options: Options) -> Result<DecodeContext> {
    let (table, dictionary_len) = decode_dictionary(dictionary)?;
    Ok(DecodeContext {
        decoder: Decoder::new(&table)?,
        table,
        dictionary_len,
        layout: options.chunk_layout,
    })
}

pub fn decode_body(context: &DecodeContext, body: &[u8]) -> Result<Vec<u8>> {
    let bits = read_body(body, context.layout)?;
    context.decoder.decode(&bits)
}

/// Exact container size [`compress`] would produce, computed from code lengths
/// without packing the body.
pub fn estimate_compressed_size(raw: &[u8]) -> Result<usize> {
    estimate_compressed_size_with(raw, Options::default())
}

pub fn estimate_compressed_size_with(raw: &[u8], options: Options) -> Result<usize> {
    let table = code_table_for(raw)?;
    let mut lengths = [0usize; 256];
    for (symbol, code) in &table {
        lengths[*symbol as usize] = code.len();
    }

    let body = packed_body_len(raw.iter().map(|byte| lengths[*byte as usize]), options.chunk_layout);
    Ok(encoded_dictionary_len(&table) + body)
}

pub fn compress(raw: &[u8]) -> Result<Vec<u8>> {
    compress_with(raw, Options::default())
}

pub fn compress_with(raw: &[u8], options: Options) -> Result<Vec<u8>> {
    Ok(build_encoder_with(raw, options)?.into_container())
}

pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    decompress_with(container, Options::default())
}

pub fn decompress_with(container: &[u8], options: Options) -> Result<Vec<u8>> {
    let context = build_decoder_with(container, options)?;
    decode_body(&context, &container[context.dictionary_len()..])
}
