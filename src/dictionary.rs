//! Serialized form of a [`CodeTable`].
//!
//! Each entry is `(length: u8, path: ceil(length / 8) bytes, symbol: u8)` with
//! the path packed MSB-first. A zero length byte terminates the section.

use bitvec::{field::BitField, order::Msb0, view::BitView};

use crate::{
    error::{HuffError, Result},
    tree::{Code, CodeTable},
};

const TERMINATOR: u8 = 0;

pub fn encode_dictionary(table: &CodeTable) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_dictionary_len(table));
    for (symbol, code) in table {
        if code.is_empty() {
            return Err(HuffError::invalid_input(format!(
                "symbol {:#04x} has an empty code",
                symbol
            )));
        }
        let length = u8::try_from(code.len()).map_err(|_| HuffError::PathTooLong {
            symbol: *symbol,
            length: code.len(),
        })?;

        out.push(length);
        for chunk in code.chunks(8) {
            // Padding bits in the last byte are zero, readers ignore them.
            out.push(chunk.load_be::<u8>() << (8 - chunk.len()));
        }
        out.push(*symbol);
    }
    out.push(TERMINATOR);
    Ok(out)
}

/// Reads a dictionary from the start of `bytes`.
///
/// Returns the table and the number of bytes it occupied, terminator
/// included. Anything after the terminator is left untouched.
pub fn decode_dictionary(bytes: &[u8]) -> Result<(CodeTable, usize)> {
    let mut table = CodeTable::new();
    let mut pos = 0;
    loop {
        let length = *bytes.get(pos).ok_or(HuffError::unexpected_end(pos))? as usize;
        pos += 1;
        if length == TERMINATOR as usize {
            break;
        }

        let path_end = pos + length.div_ceil(8);
        let raw = bytes
            .get(pos..path_end)
            .ok_or(HuffError::unexpected_end(bytes.len()))?;
        let code: Code = raw.view_bits::<Msb0>()[..length].to_bitvec();
        pos = path_end;

        let symbol = *bytes.get(pos).ok_or(HuffError::unexpected_end(pos))?;
        pos += 1;

        if table.insert(symbol, code).is_some() {
            return Err(HuffError::DuplicateSymbol { symbol });
        }
    }

    log::debug!("Read dictionary of {} entries ({} bytes)", table.len(), pos);
    Ok((table, pos))
}

/// Size in bytes that [`encode_dictionary`] produces for `table`.
pub fn encoded_dictionary_len(table: &CodeTable) -> usize {
    table
        .values()
        .map(|code| 2 + code.len().div_ceil(8))
        .sum::<usize>()
        + 1
}
