//! Forge mesh file parser
//!
//! Strictly sequential state machine over a [`Reader`]: header, then vertex
//! records, then faces, then assembly. There is no backtracking and no
//! recovery; the first bad field aborts the whole decode.

use glam::Vec2;

use crate::error::{DecodeState, MeshError};
use crate::mesh::{ForgeMesh, MeshHeader, SkinData, VertexType};
use crate::reader::{ByteOrder, Reader};
use crate::{
    ENDIAN_BIG, ENDIAN_LITTLE, MAGIC_LEN, VERTEX_STRIDE_COLOR, VERTEX_STRIDE_COLOR_TEX,
    VERTEX_UNKNOWN_BLOCK_LEN,
};

/// Decode a Forge mesh from an in-memory byte buffer.
///
/// The buffer must hold the complete file; this function performs no I/O
/// and emits no diagnostics of its own. Callers that want progress or
/// failure reporting log around the call.
///
/// # Arguments
/// * `data` - Raw .forgemesh file bytes
///
/// # Returns
/// * `Ok(ForgeMesh)` - Decoded mesh
/// * `Err(MeshError)` - Decode error naming the state it occurred in
///
/// # Example
/// ```ignore
/// let data = std::fs::read("model.forgemesh")?;
/// let mesh = forge_mesh::parse_forge_mesh(&data)?;
/// assert_eq!(mesh.positions.len(), mesh.header.vertex_count as usize);
/// ```
pub fn parse_forge_mesh(data: &[u8]) -> Result<ForgeMesh, MeshError> {
    let mut reader = Reader::new(data);

    let header = parse_header(&mut reader)?;

    // Vertex data
    let mut positions = Vec::new();
    let mut uv1 = Vec::new();
    let mut uv2 = Vec::new();
    let mut weights = Vec::new();
    let mut bone_indices = Vec::new();

    for index in 0..header.vertex_count {
        let state = DecodeState::Vertex(index);

        positions.push(
            reader
                .read_vec3_f32()
                .map_err(|e| MeshError::truncated(state, e))?,
        );

        // Per-vertex attribute block with unknown semantics; consumed so the
        // cursor stays aligned, never interpreted.
        reader
            .skip(VERTEX_UNKNOWN_BLOCK_LEN)
            .map_err(|e| MeshError::truncated(state, e))?;

        let primary = reader
            .read_vec2_f16()
            .map_err(|e| MeshError::truncated(state, e))?;
        let secondary = reader
            .read_vec2_f16()
            .map_err(|e| MeshError::truncated(state, e))?;
        uv1.push(flip_v(primary));
        uv2.push(flip_v(secondary));

        match header.vertex_type {
            VertexType::Color => {}
            VertexType::ColorTex => {
                reader
                    .skip(VERTEX_STRIDE_COLOR_TEX - VERTEX_STRIDE_COLOR)
                    .map_err(|e| MeshError::truncated(state, e))?;
            }
            VertexType::UnskinnedCompressed => {
                let mut w = [0u16; 4];
                for slot in &mut w {
                    *slot = reader
                        .read_u16()
                        .map_err(|e| MeshError::truncated(state, e))?;
                }
                let mut ids = [0u8; 4];
                for slot in &mut ids {
                    *slot = reader
                        .read_u8()
                        .map_err(|e| MeshError::truncated(state, e))?;
                }
                weights.push(w);
                bone_indices.push(ids);
            }
            other => {
                // Unknown stride; advancing past this record is not safe
                return Err(MeshError::UnimplementedVertexLayout {
                    vertex_type: other,
                    index,
                });
            }
        }
    }

    // Face data
    let mut faces = Vec::new();
    for index in 0..header.face_count {
        let [a, b, c] = reader
            .read_vec3_u32()
            .map_err(|e| MeshError::truncated(DecodeState::Face(index), e))?;
        // Winding reversal for the target rendering convention
        faces.push([c, b, a]);
    }

    let skin = header.vertex_type.has_skin_data().then(|| SkinData {
        weights,
        indices: bone_indices,
    });

    Ok(ForgeMesh {
        header,
        positions,
        uv1,
        uv2,
        faces,
        skin,
    })
}

/// Read the fixed header and configure the reader's byte order
fn parse_header(reader: &mut Reader) -> Result<MeshHeader, MeshError> {
    let state = DecodeState::Header;
    let truncated = |e| MeshError::truncated(state, e);

    let mut magic = [0u8; MAGIC_LEN];
    magic.copy_from_slice(reader.read_bytes(MAGIC_LEN).map_err(truncated)?);

    // Read under the initial little-endian order. 0 encodes identically in
    // both orders, so the flag itself is unambiguous.
    let endianness = reader.read_u32().map_err(truncated)?;
    let byte_order = match endianness {
        ENDIAN_LITTLE => ByteOrder::Little,
        ENDIAN_BIG => ByteOrder::Big,
        other => return Err(MeshError::UnrecognizedEndianness(other)),
    };
    reader.set_byte_order(byte_order);

    let version = reader.read_u32().map_err(truncated)?;

    let code = reader.read_u32().map_err(truncated)?;
    let vertex_type =
        VertexType::from_code(code).ok_or(MeshError::UnsupportedVertexType(code))?;

    let vertex_count = reader.read_u32().map_err(truncated)?;
    let face_count = reader.read_u32().map_err(truncated)?;

    let mut flags = [0u8; 4];
    for flag in &mut flags {
        *flag = reader.read_u8().map_err(truncated)?;
    }
    let keep_mesh_data = reader.read_u8().map_err(truncated)?;

    let vertex_usage_flags = reader.read_u32().map_err(truncated)?;
    let face_usage_flags = reader.read_u32().map_err(truncated)?;
    let reserved = reader.read_u32().map_err(truncated)?;
    let bounds = reader.read_vec4_f32().map_err(truncated)?;

    Ok(MeshHeader {
        magic,
        byte_order,
        version,
        vertex_type,
        vertex_count,
        face_count,
        flags,
        keep_mesh_data,
        vertex_usage_flags,
        face_usage_flags,
        reserved,
        bounds,
    })
}

/// The format stores UVs with the V axis pointing down; flipped exactly
/// once on read
fn flip_v(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, 1.0 - uv.y)
}
