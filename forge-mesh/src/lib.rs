//! Forge-Mesh: Forge engine mesh (.forgemesh) binary format decoder
//!
//! This crate provides a pure Rust decoder for the proprietary mesh format
//! used by Harmonix' Forge engine (Rock Band 4 and VR titles). It turns a
//! raw file buffer into an engine-agnostic geometry record: vertex
//! positions, two UV channels, triangle indices, and (for skinned variants)
//! per-vertex bone indices and weights.
//!
//! # Key Features
//!
//! - **Pure Rust**: No external C/C++ dependencies
//! - **Both byte orders**: Endianness is selected at runtime by a header flag
//! - **Layout dispatch**: Per-vertex record layout is chosen by a type code
//! - **Deterministic failure**: Malformed or truncated input is rejected at
//!   the first bad field, with the decode state and index in the error
//!
//! # Format Overview
//!
//! ```text
//! magic             8 bytes  opaque tag
//! endianness        u32      1 = little, 0 = big
//! version           u32      recorded only
//! vertex type       u32      selects the per-vertex record layout
//! vertex count      u32
//! face count        u32
//! flags             u8 x4    opaque
//! keep mesh data    u8       opaque
//! vertex usage      u32      opaque bitmask
//! face usage        u32      opaque bitmask
//! reserved          u32
//! bounds            f32 x4   bounding volume candidate
//! vertex records    vertex count x stride (stride depends on vertex type)
//! faces             face count x 3 u32
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use forge_mesh::parse_forge_mesh;
//!
//! let data = std::fs::read("model.forgemesh").unwrap();
//! let mesh = parse_forge_mesh(&data).unwrap();
//!
//! println!("Vertices: {}", mesh.positions.len());
//! println!("Faces: {}", mesh.faces.len());
//! ```

mod error;
mod mesh;
mod parser;
mod reader;

pub use error::{DecodeState, MeshError};
pub use mesh::{ForgeMesh, MeshHeader, SkinData, VertexType};
pub use parser::parse_forge_mesh;
pub use reader::{ByteOrder, ReadError, Reader};

// =============================================================================
// Constants
// =============================================================================

/// Length of the opaque magic tag at the start of the file
pub const MAGIC_LEN: usize = 8;

/// Endianness flag value for little-endian files
pub const ENDIAN_LITTLE: u32 = 1;

/// Endianness flag value for big-endian files
pub const ENDIAN_BIG: u32 = 0;

/// Fixed header size in bytes (magic through bounds vector)
pub const HEADER_LEN: usize = 61;

/// Bytes of per-vertex attribute data with unknown semantics, between the
/// position and the UV pairs in every decodable vertex record
pub const VERTEX_UNKNOWN_BLOCK_LEN: usize = 32;

/// Vertex record stride for the Color layout (type 0)
pub const VERTEX_STRIDE_COLOR: usize = 52;

/// Vertex record stride for the ColorTex layout (type 2)
pub const VERTEX_STRIDE_COLOR_TEX: usize = 80;

/// Vertex record stride for the UnskinnedCompressed layout (type 7)
pub const VERTEX_STRIDE_UNSKINNED_COMPRESSED: usize = 64;

/// Size of one triangle record (three u32 indices)
pub const FACE_LEN: usize = 12;

// =============================================================================
// Tests
// =============================================================================
