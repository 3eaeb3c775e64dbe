//! Decoded Forge mesh data structures

use core::fmt;

use glam::{Vec2, Vec3, Vec4};

use crate::reader::ByteOrder;

/// Per-vertex record layout selector from the file header.
///
/// The format defines eight codes. Only [`Color`](VertexType::Color),
/// [`ColorTex`](VertexType::ColorTex) and
/// [`UnskinnedCompressed`](VertexType::UnskinnedCompressed) have a known
/// record stride; the remaining codes are recognized so diagnostics can name
/// them, but their vertex data cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexType {
    /// Type 0: base record only (position, unknown block, two UV pairs)
    Color,
    /// Type 2: base record plus a 28-byte trailer
    ColorTex,
    /// Type 3: layout unknown
    Unskinned,
    /// Type 4: layout unknown
    Skinned,
    /// Type 5: layout unknown
    PositionOnly,
    /// Type 6: layout unknown
    Particle,
    /// Type 7: base record plus 4 u16 skin weights and 4 u8 bone indices
    UnskinnedCompressed,
    /// Type 8: layout unknown
    SkinnedCompressed,
}

impl VertexType {
    /// Map a header code to a vertex type, `None` for codes the format
    /// does not define
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Color),
            2 => Some(Self::ColorTex),
            3 => Some(Self::Unskinned),
            4 => Some(Self::Skinned),
            5 => Some(Self::PositionOnly),
            6 => Some(Self::Particle),
            7 => Some(Self::UnskinnedCompressed),
            8 => Some(Self::SkinnedCompressed),
            _ => None,
        }
    }

    /// The header code for this vertex type
    pub fn code(self) -> u32 {
        match self {
            Self::Color => 0,
            Self::ColorTex => 2,
            Self::Unskinned => 3,
            Self::Skinned => 4,
            Self::PositionOnly => 5,
            Self::Particle => 6,
            Self::UnskinnedCompressed => 7,
            Self::SkinnedCompressed => 8,
        }
    }

    /// Whether this layout carries per-vertex skin data
    pub fn has_skin_data(self) -> bool {
        matches!(self, Self::UnskinnedCompressed)
    }
}

impl fmt::Display for VertexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "Color",
            Self::ColorTex => "ColorTex",
            Self::Unskinned => "Unskinned",
            Self::Skinned => "Skinned",
            Self::PositionOnly => "Position Only",
            Self::Particle => "Particle",
            Self::UnskinnedCompressed => "Unskinned Compressed",
            Self::SkinnedCompressed => "Skinned Compressed",
        };
        write!(f, "{}", name)
    }
}

/// Parsed Forge mesh header, field order as on disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHeader {
    /// 8-byte magic tag, kept verbatim (not validated beyond length)
    pub magic: [u8; 8],
    /// Byte order declared by the endianness field
    pub byte_order: ByteOrder,
    /// Format version, recorded but not branched on
    pub version: u32,
    /// Per-vertex record layout selector
    pub vertex_type: VertexType,
    /// Number of vertex records
    pub vertex_count: u32,
    /// Number of triangle records
    pub face_count: u32,
    /// Four boolean-like bytes with unknown meaning
    pub flags: [u8; 4],
    /// "Keep mesh data" byte flag
    pub keep_mesh_data: u8,
    /// Opaque vertex usage bitmask
    pub vertex_usage_flags: u32,
    /// Opaque face usage bitmask
    pub face_usage_flags: u32,
    /// Reserved field
    pub reserved: u32,
    /// Four floats, likely the bounding volume
    pub bounds: Vec4,
}

impl MeshHeader {
    /// Magic tag as text, for diagnostics
    pub fn magic_str(&self) -> String {
        String::from_utf8_lossy(&self.magic).into_owned()
    }
}

/// Per-vertex skin data for skinned layouts.
///
/// Values are stored exactly as read: weights are unnormalized u16
/// (engine range 0..=65535), indices refer to skeleton joints by number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinData {
    /// Four blend weights per vertex
    pub weights: Vec<[u16; 4]>,
    /// Four bone indices per vertex, parallel to `weights`
    pub indices: Vec<[u8; 4]>,
}

/// A fully decoded Forge mesh.
///
/// All sequences are indexed by vertex number and own their data; nothing
/// aliases the input buffer. `skin` is present only for layouts that carry
/// skin data.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgeMesh {
    /// Parsed file header
    pub header: MeshHeader,
    /// Vertex positions, length equals `header.vertex_count`
    pub positions: Vec<Vec3>,
    /// Primary UV channel, V axis already flipped
    pub uv1: Vec<Vec2>,
    /// Secondary UV channel, V axis already flipped
    pub uv2: Vec<Vec2>,
    /// Triangle indices, winding already reversed for the target renderer
    pub faces: Vec<[u32; 3]>,
    /// Bone weights and indices, skinned layouts only
    pub skin: Option<SkinData>,
}

impl ForgeMesh {
    /// Number of decoded vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of decoded triangles
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}
