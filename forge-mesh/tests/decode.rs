//! Whole-file decode tests against synthetic .forgemesh buffers

use glam::{Vec2, Vec3, Vec4};
use half::f16;

use forge_mesh::{
    parse_forge_mesh, ByteOrder, MeshError, VertexType, ENDIAN_BIG, ENDIAN_LITTLE, HEADER_LEN,
    VERTEX_STRIDE_COLOR_TEX, VERTEX_STRIDE_UNSKINNED_COMPRESSED,
};

/// Field-by-field builder for synthetic mesh files
struct MeshBuilder {
    buf: Vec<u8>,
    big: bool,
}

impl MeshBuilder {
    fn new(order: ByteOrder) -> Self {
        Self {
            buf: Vec::new(),
            big: order == ByteOrder::Big,
        }
    }

    fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    fn u16(&mut self, v: u16) -> &mut Self {
        let bytes = if self.big {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf.extend_from_slice(&bytes);
        self
    }

    fn u32(&mut self, v: u32) -> &mut Self {
        let bytes = if self.big {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf.extend_from_slice(&bytes);
        self
    }

    fn f32(&mut self, v: f32) -> &mut Self {
        self.u32(v.to_bits())
    }

    fn f16(&mut self, v: f32) -> &mut Self {
        self.u16(f16::from_f32(v).to_bits())
    }

    /// Full header; the endianness flag itself is written little-endian
    /// because its on-disk encoding does not depend on the file's order
    /// (1 is only ever read under the decoder's initial little order, 0 is
    /// identical in both)
    fn header(&mut self, vertex_type: VertexType, vertex_count: u32, face_count: u32) -> &mut Self {
        self.buf.extend_from_slice(b"FORGEMSH");
        let flag = if self.big { ENDIAN_BIG } else { ENDIAN_LITTLE };
        self.buf.extend_from_slice(&flag.to_le_bytes());
        self.u32(25); // version
        self.u32(vertex_type.code());
        self.u32(vertex_count);
        self.u32(face_count);
        self.buf.extend_from_slice(&[0, 1, 0, 1]); // flag bytes
        self.u8(1); // keep mesh data
        self.u32(0xDEAD); // vertex usage
        self.u32(0xBEEF); // face usage
        self.u32(0); // reserved
        self.f32(-1.0).f32(-1.0).f32(1.0).f32(1.0) // bounds
    }

    /// Common vertex prefix: position, 32 unknown bytes, two raw UV pairs
    /// (V as stored on disk, before the decoder's flip)
    fn vertex_base(&mut self, pos: [f32; 3], uv1: [f32; 2], uv2: [f32; 2]) -> &mut Self {
        self.f32(pos[0]).f32(pos[1]).f32(pos[2]);
        self.buf.extend_from_slice(&[0xAA; 32]);
        self.f16(uv1[0]).f16(uv1[1]);
        self.f16(uv2[0]).f16(uv2[1])
    }

    fn face(&mut self, a: u32, b: u32, c: u32) -> &mut Self {
        self.u32(a).u32(b).u32(c)
    }

    fn build(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

#[test]
fn decode_color_tex_mesh_little_endian() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::ColorTex, 2, 1);
    b.vertex_base([1.0, 2.0, 3.0], [0.25, 0.25], [0.5, 0.75]);
    b.buf.extend_from_slice(&[0x55; 28]); // ColorTex trailer
    b.vertex_base([-1.0, 0.0, 4.5], [0.0, 1.0], [1.0, 0.0]);
    b.buf.extend_from_slice(&[0x55; 28]);
    b.face(0, 1, 2);
    let buf = b.build();
    assert_eq!(buf.len(), HEADER_LEN + 2 * VERTEX_STRIDE_COLOR_TEX + 12);

    let mesh = parse_forge_mesh(&buf).unwrap();

    assert_eq!(mesh.header.vertex_type, VertexType::ColorTex);
    assert_eq!(mesh.header.byte_order, ByteOrder::Little);
    assert_eq!(mesh.header.vertex_count, 2);
    assert_eq!(mesh.header.face_count, 1);
    assert_eq!(mesh.header.bounds, Vec4::new(-1.0, -1.0, 1.0, 1.0));

    assert_eq!(mesh.positions.len(), 2);
    assert_eq!(mesh.positions[0], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(mesh.positions[1], Vec3::new(-1.0, 0.0, 4.5));

    // V flipped exactly once
    assert_eq!(mesh.uv1[0], Vec2::new(0.25, 0.75));
    assert_eq!(mesh.uv2[0], Vec2::new(0.5, 0.25));
    assert_eq!(mesh.uv1[1], Vec2::new(0.0, 0.0));
    assert_eq!(mesh.uv2[1], Vec2::new(1.0, 1.0));

    // Winding reversed
    assert_eq!(mesh.faces, vec![[2, 1, 0]]);

    assert!(mesh.skin.is_none());
}

#[test]
fn decode_skinned_mesh_keeps_raw_weights() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::UnskinnedCompressed, 1, 0);
    b.vertex_base([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0]);
    b.u16(100).u16(200).u16(0).u16(0); // weights
    b.u8(1).u8(2).u8(0).u8(0); // bone indices
    let buf = b.build();
    assert_eq!(buf.len(), HEADER_LEN + VERTEX_STRIDE_UNSKINNED_COMPRESSED);

    let mesh = parse_forge_mesh(&buf).unwrap();
    let skin = mesh.skin.expect("type 7 carries skin data");

    // No renormalization at decode time
    assert_eq!(skin.weights, vec![[100, 200, 0, 0]]);
    assert_eq!(skin.indices, vec![[1, 2, 0, 0]]);
}

#[test]
fn decode_big_endian_mesh() {
    let mut b = MeshBuilder::new(ByteOrder::Big);
    b.header(VertexType::Color, 1, 2);
    b.vertex_base([8.0, -8.0, 0.5], [0.5, 0.5], [0.25, 0.25]);
    b.face(0, 1, 2);
    b.face(10, 20, 30);
    let buf = b.build();

    let mesh = parse_forge_mesh(&buf).unwrap();

    assert_eq!(mesh.header.byte_order, ByteOrder::Big);
    assert_eq!(mesh.header.version, 25);
    assert_eq!(mesh.header.vertex_usage_flags, 0xDEAD);
    assert_eq!(mesh.positions[0], Vec3::new(8.0, -8.0, 0.5));
    assert_eq!(mesh.uv1[0], Vec2::new(0.5, 0.5));
    assert_eq!(mesh.faces, vec![[2, 1, 0], [30, 20, 10]]);
}

#[test]
fn decoded_counts_match_header_exactly() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::Color, 3, 2);
    for i in 0..3 {
        b.vertex_base([i as f32, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0]);
    }
    b.face(0, 1, 2);
    b.face(2, 1, 0);
    let buf = b.build();

    let mesh = parse_forge_mesh(&buf).unwrap();
    assert_eq!(mesh.vertex_count(), mesh.header.vertex_count as usize);
    assert_eq!(mesh.face_count(), mesh.header.face_count as usize);
    assert_eq!(mesh.uv1.len(), 3);
    assert_eq!(mesh.uv2.len(), 3);
}

#[test]
fn every_strict_prefix_fails_as_truncated() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::UnskinnedCompressed, 1, 1);
    b.vertex_base([1.0, 2.0, 3.0], [0.25, 0.25], [0.5, 0.5]);
    b.u16(100).u16(200).u16(0).u16(0);
    b.u8(1).u8(2).u8(0).u8(0);
    b.face(4, 5, 6);
    let buf = b.build();

    parse_forge_mesh(&buf).expect("the untruncated buffer is valid");

    for len in 0..buf.len() {
        match parse_forge_mesh(&buf[..len]) {
            Err(MeshError::TruncatedInput { .. }) => {}
            other => panic!("prefix of {} bytes: expected TruncatedInput, got {:?}", len, other),
        }
    }
}

#[test]
fn truncation_is_tagged_with_the_failing_state() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::Color, 1, 1);
    b.vertex_base([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0]);
    b.face(0, 1, 2);
    let buf = b.build();

    // Cut inside the face record
    let err = parse_forge_mesh(&buf[..buf.len() - 4]).unwrap_err();
    assert!(matches!(
        err,
        MeshError::TruncatedInput {
            state: forge_mesh::DecodeState::Face(0),
            ..
        }
    ));

    // Cut inside the vertex record
    let err = parse_forge_mesh(&buf[..HEADER_LEN + 20]).unwrap_err();
    assert!(matches!(
        err,
        MeshError::TruncatedInput {
            state: forge_mesh::DecodeState::Vertex(0),
            ..
        }
    ));
}

#[test]
fn unimplemented_layout_fails_on_first_vertex() {
    for ty in [
        VertexType::Unskinned,
        VertexType::Skinned,
        VertexType::PositionOnly,
        VertexType::Particle,
        VertexType::SkinnedCompressed,
    ] {
        let mut b = MeshBuilder::new(ByteOrder::Little);
        b.header(ty, 2, 0);
        // Enough bytes for the common prefix of the first record
        b.vertex_base([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0]);
        let buf = b.build();

        assert_eq!(
            parse_forge_mesh(&buf),
            Err(MeshError::UnimplementedVertexLayout {
                vertex_type: ty,
                index: 0
            })
        );
    }
}

#[test]
fn unknown_type_code_fails_before_vertex_data() {
    let mut b = MeshBuilder::new(ByteOrder::Little);
    b.header(VertexType::Color, 1, 0);
    b.vertex_base([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0]);
    let mut buf = b.build();
    // Overwrite the vertex type field (offset 16) with an undefined code
    buf[16..20].copy_from_slice(&99u32.to_le_bytes());

    assert_eq!(
        parse_forge_mesh(&buf),
        Err(MeshError::UnsupportedVertexType(99))
    );
}
