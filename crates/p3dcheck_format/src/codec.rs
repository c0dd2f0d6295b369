//! Block decompression for the compiled container variant.
//!
//! Compressed blocks use a byte-oriented LZSS scheme: a 4096-byte sliding
//! window pre-filled with spaces, flag bytes whose bits select literal vs.
//! back-reference LSB-first, and a trailing 4-byte additive checksum. The
//! expected output size is always known to the caller; decompression stops
//! exactly there. The checksum is consumed but not verified, so the only
//! failure mode of this module is a truncated stream.

use crate::cursor::Cursor;
use crate::error::FormatResult;

/// Sliding window size.
const WINDOW: usize = 4096;
/// Longest match a back-reference can encode.
const MATCH_MAX: usize = 18;
/// Minimum encoded match length minus one.
const THRESHOLD: usize = 2;
/// Blocks below this size are stored raw unless a marker forces compression.
const RAW_LIMIT: usize = 1024;

/// Decompresses an LZSS block to exactly `expected` bytes, then consumes the
/// trailing checksum.
pub fn decompress_lzss(cursor: &mut Cursor<'_>, expected: usize) -> FormatResult<Vec<u8>> {
    let mut window = [0x20u8; WINDOW];
    let mut r = WINDOW - MATCH_MAX;
    let mut flags: u32 = 0;
    // One input byte never expands past MATCH_MAX output bytes, so a lying
    // size field cannot make us pre-allocate past that bound.
    let mut out = Vec::with_capacity(expected.min(cursor.remaining().saturating_mul(MATCH_MAX)));

    while out.len() < expected {
        flags >>= 1;
        if flags & 0x100 == 0 {
            flags = u32::from(cursor.read_u8()?) | 0xFF00;
        }
        if flags & 1 != 0 {
            let c = cursor.read_u8()?;
            out.push(c);
            window[r] = c;
            r = (r + 1) & (WINDOW - 1);
        } else {
            let i = usize::from(cursor.read_u8()?);
            let j = usize::from(cursor.read_u8()?);
            let pos = i | ((j & 0xF0) << 4);
            let len = (j & 0x0F) + THRESHOLD;
            for k in 0..=len {
                if out.len() >= expected {
                    break;
                }
                let c = window[(pos + k) & (WINDOW - 1)];
                out.push(c);
                window[r] = c;
                r = (r + 1) & (WINDOW - 1);
            }
        }
    }

    cursor.skip(4)?;
    Ok(out)
}

/// Consumes a length-known, optionally-compressed block, discarding its
/// content.
///
/// `expected == 0` consumes nothing. Small blocks are stored raw unless
/// `force` says the writer compressed them anyway; everything else is LZSS.
/// Callers only need the cursor to land exactly past the block.
pub fn read_compressed(cursor: &mut Cursor<'_>, expected: usize, force: bool) -> FormatResult<()> {
    if expected == 0 {
        return Ok(());
    }
    if expected < RAW_LIMIT && !force {
        cursor.skip(expected)
    } else {
        decompress_lzss(cursor, expected).map(|_| ())
    }
}

/// Consumes a compressed integer array (count-prefixed, element size 4,
/// no marker byte).
pub fn skip_compressed_index_array(cursor: &mut Cursor<'_>) -> FormatResult<()> {
    let count = cursor.read_u32()? as usize;
    read_compressed(cursor, count * 4, false)
}
