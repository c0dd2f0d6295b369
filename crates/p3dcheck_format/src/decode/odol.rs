//! Compiled-variant decoder.
//!
//! An ODOL stream fronts all LOD resolutions in the header, then reaches
//! each LOD body through an absolute byte offset. Bodies interleave plain
//! counts with LZSS-compressed sub-blocks, so everything up to the property
//! table has to be consumed structurally to keep the cursor aligned. Layout
//! details are gated on the format version; 72 is the supported floor and
//! anything older decodes to a model with zero LODs.

use crate::codec;
use crate::cursor::Cursor;
use crate::error::{FormatError, FormatResult};
use crate::model::{Lod, Model};
use crate::resolution::LodResolution;

/// Lowest format version whose layout this decoder understands.
const VERSION_FLOOR: u32 = 72;

pub(super) fn decode(cursor: &mut Cursor<'_>, model: &mut Model) -> FormatResult<()> {
    let version = cursor.read_u32()?;
    if version < VERSION_FLOOR {
        tracing::debug!("Legacy container version {}, keeping zero LODs", version);
        return Ok(());
    }
    cursor.read_u32()?; // app id
    cursor.skip_asciiz()?; // muzzle flash surface
    let lod_count = cursor.read_u32()? as usize;
    // Every entry below costs at least four stream bytes, so a lying count
    // cannot make us reserve past what the buffer could back.
    let mut resolutions = Vec::with_capacity(lod_count.min(cursor.remaining() / 4));
    for _ in 0..lod_count {
        resolutions.push(cursor.read_f32()?);
    }

    // Sphere radii, vector hints, density coefficients, bounding boxes,
    // transform matrix and misc flag bytes. All fixed-size, content unused.
    let mut header_skip = 8 + 8 + 8
        + 4 * 3
        + 4 + 4 + 4
        + 4 * 3
        + 4 * 3
        + 4 + 4 + 4 * 3 * 5
        + 4 * 9
        + 4
        + 4 * 6
        + 1 + 4 + 1 + 4 + 1;
    if version >= 73 {
        header_skip += 1;
    }
    cursor.skip(header_skip)?;

    let skeleton_name = cursor.read_asciiz()?;
    if !skeleton_name.is_empty() {
        cursor.read_u8()?;
        let bone_count = cursor.read_u32()?;
        for _ in 0..bone_count {
            cursor.skip_asciiz()?;
            cursor.skip_asciiz()?;
        }
        cursor.read_u8()?;
    }

    cursor.read_u8()?;
    let mass_size = cursor.read_u32()?;
    if mass_size != 0 {
        return Err(FormatError::StructuralViolation {
            offset: cursor.position() - 4,
            what: "mass block size must be zero",
        });
    }

    cursor.skip(16)?;
    if version > 72 {
        cursor.skip(4)?;
    }
    cursor.skip(14)?;
    if version > 72 {
        cursor.skip(5)?;
    }

    cursor.skip_asciiz()?; // class type
    cursor.skip_asciiz()?; // destruct type
    cursor.read_u8()?;
    let unused_count = cursor.read_u32()?;
    if unused_count != 0 {
        return Err(FormatError::StructuralViolation {
            offset: cursor.position() - 4,
            what: "unused point count must be zero",
        });
    }

    cursor.skip(12 * lod_count)?; // per-LOD flag triples

    if cursor.read_u8()? != 0 {
        skip_animations(cursor, lod_count)?;
    }

    let mut offsets = Vec::with_capacity(lod_count.min(cursor.remaining() / 4));
    for _ in 0..lod_count {
        offsets.push(cursor.read_u32()? as usize);
    }
    cursor.skip(lod_count)?; // per-LOD usage flags

    // Offsets are absolute and not necessarily monotonic.
    for (offset, raw_resolution) in offsets.into_iter().zip(resolutions) {
        cursor.seek_to(offset)?;
        let lod = decode_lod_body(cursor)?;
        model.insert_lod(LodResolution::new(raw_resolution), lod);
    }
    Ok(())
}

/// Consumes the animation block without keeping any of it.
fn skip_animations(cursor: &mut Cursor<'_>, lod_count: usize) -> FormatResult<()> {
    let anim_count = cursor.read_u32()? as usize;
    let mut anim_types = Vec::with_capacity(anim_count.min(cursor.remaining() / 4));
    for _ in 0..anim_count {
        let anim_type = cursor.read_u32()?;
        anim_types.push(anim_type);
        cursor.skip_asciiz()?; // animation name
        cursor.skip_asciiz()?; // source name
        cursor.skip(28)?;
        match anim_type {
            0..=7 | 9 => cursor.skip(8)?,
            8 => cursor.skip(32)?,
            _ => {}
        }
    }

    let bones2anims = cursor.read_u32()?;
    for _ in 0..bones2anims {
        let bone_count = cursor.read_u32()?;
        for _ in 0..bone_count {
            let anim_refs = cursor.read_u32()? as usize;
            cursor.skip(anim_refs * 4)?;
        }
    }

    for _ in 0..lod_count {
        for anim_type in &anim_types {
            let bone_index = cursor.read_i32()?;
            if bone_index == -1 || *anim_type == 8 || *anim_type == 9 {
                continue;
            }
            cursor.skip(24)?; // axis position and direction
        }
    }
    Ok(())
}

fn decode_lod_body(cursor: &mut Cursor<'_>) -> FormatResult<Lod> {
    let proxy_count = cursor.read_u32()?;
    for _ in 0..proxy_count {
        cursor.skip_asciiz()?; // proxy name
        cursor.skip(64)?; // transform plus proxy/bone/section ids
    }

    let sub_bone_count = cursor.read_u32()? as usize;
    cursor.skip(sub_bone_count * 4)?;
    let bone_count = cursor.read_u32()?;
    for _ in 0..bone_count {
        let link_count = cursor.read_u32()? as usize;
        cursor.skip(link_count * 4)?;
    }

    cursor.skip(56)?; // point/face counts, area, hints, bounds

    let texture_count = cursor.read_u32()?;
    for _ in 0..texture_count {
        cursor.skip_asciiz()?;
    }
    let material_count = cursor.read_u32()?;
    for _ in 0..material_count {
        skip_material(cursor)?;
    }

    codec::skip_compressed_index_array(cursor)?; // point-to-vertex
    codec::skip_compressed_index_array(cursor)?; // vertex-to-point

    let face_count = cursor.read_u32()?;
    cursor.read_u32()?; // total face data size
    cursor.skip(2)?;
    for _ in 0..face_count {
        let vertex_count = usize::from(cursor.read_u8()?);
        cursor.skip(vertex_count * 4)?;
    }

    let section_count = cursor.read_u32()?;
    for _ in 0..section_count {
        cursor.skip(26)?;
        if cursor.read_i32()? == -1 {
            cursor.skip_asciiz()?; // inline material name
        }
        cursor.skip(16)?;
    }

    let selection_count = cursor.read_u32()?;
    for _ in 0..selection_count {
        skip_selection(cursor)?;
    }

    let mut lod = Lod::new();
    let property_count = cursor.read_u32()?;
    for _ in 0..property_count {
        let position = cursor.position();
        let key = cursor.read_asciiz()?;
        let value = cursor.read_asciiz()?;
        lod.insert_property(&key, value, position);
    }

    let frame_count = cursor.read_u32()?;
    if frame_count != 0 {
        return Err(FormatError::UnsupportedFeature {
            what: "animation frames",
        });
    }

    cursor.skip(13)?; // icon color, special flags
    let proxy_uv_size = cursor.read_u32()? as usize;
    cursor.skip(proxy_uv_size)?;
    cursor.skip(9)?; // point/normal counts, trailing flag
    Ok(lod)
}

fn skip_material(cursor: &mut Cursor<'_>) -> FormatResult<()> {
    cursor.skip_asciiz()?; // material name
    cursor.skip(120)?; // type, colors, render flags
    cursor.skip_asciiz()?; // surface file
    cursor.skip(8)?;
    let stage_count = cursor.read_u32()?;
    let transform_count = cursor.read_u32()? as usize;
    for _ in 0..stage_count {
        skip_stage(cursor)?;
    }
    cursor.skip(52 * transform_count)?;
    skip_stage(cursor)?; // thermal stage
    Ok(())
}

fn skip_stage(cursor: &mut Cursor<'_>) -> FormatResult<()> {
    cursor.read_u32()?;
    cursor.skip_asciiz()?; // texture file
    cursor.read_u32()?;
    cursor.read_u8()?;
    Ok(())
}

/// A selection is a name plus up to four independently compressed streams.
fn skip_selection(cursor: &mut Cursor<'_>) -> FormatResult<()> {
    cursor.skip_asciiz()?; // selection name
    skip_lengthed_stream(cursor, 4)?; // face indices
    let always_zero = cursor.read_u32()?;
    if always_zero != 0 {
        return Err(FormatError::StructuralViolation {
            offset: cursor.position() - 4,
            what: "selection reserved field must be zero",
        });
    }
    cursor.read_u8()?; // is-sectional flag
    skip_lengthed_stream(cursor, 4)?; // section indices
    skip_lengthed_stream(cursor, 4)?; // vertex table
    skip_lengthed_stream(cursor, 1)?; // vertex weights
    Ok(())
}

/// Count-prefixed stream; a marker byte after a non-zero count says whether
/// the payload was force-compressed.
fn skip_lengthed_stream(cursor: &mut Cursor<'_>, element_size: usize) -> FormatResult<()> {
    let count = cursor.read_u32()? as usize;
    if count != 0 {
        let marker = cursor.read_u8()?;
        codec::read_compressed(cursor, count * element_size, marker == 2)?;
    }
    Ok(())
}
