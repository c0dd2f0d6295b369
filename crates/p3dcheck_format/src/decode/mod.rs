//! Container format dispatch.
//!
//! A model file opens with a 4-byte magic naming its variant: `MLOD` is the
//! editable tag-chunked form, `ODOL` the compiled offset-indexed form. All
//! further layout is version- and count-driven within the stream itself.

mod mlod;
mod odol;

use std::path::Path;

use crate::cursor::Cursor;
use crate::error::{FormatError, FormatResult};
use crate::model::Model;

/// Magic of the editable container variant.
pub const MLOD_MAGIC: &[u8; 4] = b"MLOD";
/// Magic of the compiled container variant.
pub const ODOL_MAGIC: &[u8; 4] = b"ODOL";

/// Decodes one model file from its raw bytes.
///
/// Geometry is structurally skipped; what comes back is the LOD/property
/// tree. `path` is only recorded on the model for reporting.
pub fn decode_model(path: impl AsRef<Path>, bytes: &[u8]) -> FormatResult<Model> {
    let mut cursor = Cursor::new(bytes);
    let raw = cursor.read_exact(4)?;
    let magic = [raw[0], raw[1], raw[2], raw[3]];
    let mut model = Model::new(path.as_ref());
    if &magic == MLOD_MAGIC {
        mlod::decode(&mut cursor, &mut model)?;
    } else if &magic == ODOL_MAGIC {
        odol::decode(&mut cursor, &mut model)?;
    } else {
        return Err(FormatError::UnsupportedFormat { magic });
    }
    Ok(model)
}
