//! Forge mesh decode error types

use core::fmt;

use thiserror::Error;

use crate::mesh::VertexType;
use crate::reader::ReadError;

/// Decoder state machine phase, used to locate failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Reading the fixed header
    Header,
    /// Reading the vertex record at this index
    Vertex(u32),
    /// Reading the triangle at this index
    Face(u32),
}

impl fmt::Display for DecodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Vertex(i) => write!(f, "vertex {}", i),
            Self::Face(i) => write!(f, "face {}", i),
        }
    }
}

/// Errors that can occur when decoding a Forge mesh.
///
/// All variants are terminal for the current file: once any of them fires,
/// the cursor position can no longer be trusted to align with subsequent
/// fields, so there is no retry, no default substitution and no partial
/// mesh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Input ended in the middle of a required field
    #[error(
        "unexpected end of input in {state}: needed {needed} bytes at offset {offset}, {remaining} remaining"
    )]
    TruncatedInput {
        /// Decode phase the truncation happened in
        state: DecodeState,
        /// Offset the failed read started at
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Endianness flag was neither 0 (big) nor 1 (little)
    #[error("unrecognized endianness flag {0:#010x}")]
    UnrecognizedEndianness(u32),

    /// Vertex type code outside the set the format defines
    #[error("unsupported vertex type code {0}")]
    UnsupportedVertexType(u32),

    /// Recognized vertex type whose record stride is unknown, so the
    /// cursor cannot advance past its vertex data
    #[error("vertex layout for type {vertex_type} is not implemented (vertex {index})")]
    UnimplementedVertexLayout {
        /// The recognized but undecodable type
        vertex_type: VertexType,
        /// Vertex index the decode stopped at
        index: u32,
    },
}

impl MeshError {
    /// Tag a cursor out-of-bounds error with the decode state it fired in
    pub(crate) fn truncated(state: DecodeState, err: ReadError) -> Self {
        Self::TruncatedInput {
            state,
            offset: err.offset,
            needed: err.needed,
            remaining: err.remaining,
        }
    }
}
