//! Minimal GLB container chunk scanning.
//!
//! `.vrm` files are binary glTF containers; this module locates the JSON
//! chunk so the VRM extension blocks can be parsed out of it. No other part
//! of the container (buffers, images) is touched.

use crate::Error;
use byteorder::{ByteOrder, LittleEndian};

/// "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// "JSON"
const CHUNK_JSON: u32 = 0x4E4F534A;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Returns the glTF JSON chunk of a GLB (`.glb` / `.vrm`) byte buffer.
pub fn gltf_json(bytes: &[u8]) -> Result<&[u8], Error> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::GlbParse {
            message: format!("truncated header: {} bytes", bytes.len()),
        });
    }

    let magic = LittleEndian::read_u32(&bytes[0..4]);
    if magic != GLB_MAGIC {
        return Err(Error::GlbParse {
            message: format!("bad magic: 0x{magic:08x}"),
        });
    }

    let version = LittleEndian::read_u32(&bytes[4..8]);
    if version != 2 {
        return Err(Error::GlbVersion { value: version });
    }

    let declared_len = LittleEndian::read_u32(&bytes[8..12]) as usize;
    if declared_len > bytes.len() {
        return Err(Error::GlbParse {
            message: format!(
                "declared length {declared_len} exceeds buffer of {} bytes",
                bytes.len()
            ),
        });
    }

    let mut offset = HEADER_LEN;
    while offset + CHUNK_HEADER_LEN <= declared_len {
        let chunk_len = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
        let chunk_type = LittleEndian::read_u32(&bytes[offset + 4..offset + 8]);
        let data_start = offset + CHUNK_HEADER_LEN;
        let data_end = match data_start.checked_add(chunk_len) {
            Some(end) if end <= declared_len => end,
            _ => {
                return Err(Error::GlbParse {
                    message: format!("chunk at offset {offset} overruns container"),
                });
            }
        };

        if chunk_type == CHUNK_JSON {
            return Ok(&bytes[data_start..data_end]);
        }

        // Chunks are 4-byte aligned; the JSON chunk pads with spaces, others
        // with zeros.
        offset = data_end + (data_end.wrapping_neg() & 3);
    }

    Err(Error::GlbParse {
        message: "no JSON chunk found".to_string(),
    })
}
