//! Editable-variant decoder.
//!
//! An MLOD stream is a LOD count followed by that many LOD blocks. Each
//! block carries its geometry arrays up front (skipped by size) and then a
//! tag stream; only the `#Property#` tags are materialized. A trailing float
//! after the end-of-file tag gives the LOD's resolution.

use crate::cursor::Cursor;
use crate::error::{FormatError, FormatResult};
use crate::model::{Lod, Model};
use crate::resolution::LodResolution;

/// Tag carrying one key/value property pair.
const PROPERTY_TAG: &str = "#Property#";
/// Tag terminating a LOD's tag stream.
const END_TAG: &str = "#EndOfFile#";
/// Size of each of the two fixed property fields.
const PROPERTY_FIELD: usize = 64;

pub(super) fn decode(cursor: &mut Cursor<'_>, model: &mut Model) -> FormatResult<()> {
    cursor.read_u32()?; // format version
    let lod_count = cursor.read_u32()?;
    for _ in 0..lod_count {
        let (resolution, lod) = decode_lod(cursor)?;
        model.insert_lod(resolution, lod);
    }
    Ok(())
}

fn decode_lod(cursor: &mut Cursor<'_>) -> FormatResult<(LodResolution, Lod)> {
    cursor.read_u32()?; // sub-header magic, not validated
    cursor.read_i32()?;
    cursor.read_i32()?;
    let point_count = cursor.read_u32()? as usize;
    let normal_count = cursor.read_u32()? as usize;
    let face_count = cursor.read_u32()?;
    cursor.read_u32()?; // flags
    cursor.skip(point_count * 16)?;
    cursor.skip(normal_count * 12)?;
    for _ in 0..face_count {
        cursor.skip(72)?;
        cursor.skip_asciiz()?; // texture
        cursor.skip_asciiz()?; // material
    }

    if cursor.read_exact(4)? != b"TAGG" {
        return Err(FormatError::UnsupportedFeature {
            what: "LOD without TAGG block",
        });
    }

    let mut lod = Lod::new();
    loop {
        cursor.read_u8()?;
        let name = cursor.read_asciiz()?;
        let payload_len = cursor.read_u32()? as usize;
        if name == PROPERTY_TAG {
            let position = cursor.position();
            let key = cursor.read_fixed_str(PROPERTY_FIELD)?;
            let value = cursor.read_fixed_str(PROPERTY_FIELD)?;
            lod.insert_property(&key, value, position);
        } else {
            cursor.skip(payload_len)?;
        }
        if name.is_empty() || name == END_TAG {
            break;
        }
    }

    let resolution = LodResolution::new(cursor.read_f32()?);
    Ok((resolution, lod))
}
