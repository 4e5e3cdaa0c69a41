use crate::driver::AttribType;
use bytemuck::{Pod, Zeroable};
use std::mem;

/// One attribute slot as described to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
    pub kind: AttribType,
    pub normalized: bool,
    /// Bytes between consecutive vertices.
    pub stride: usize,
    /// Byte offset of the attribute inside a vertex.
    pub offset: usize,
}

/// A plain vertex record whose memory layout matches `ATTRIBUTES` exactly.
pub trait Vertex: Pod {
    const ATTRIBUTES: &'static [VertexAttribute];
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex2D {
    pub x: f32,
    pub y: f32,
}

impl Vertex2D {
    pub const fn new(x: f32, y: f32) -> Vertex2D {
        Vertex2D { x, y }
    }
}

impl Vertex for Vertex2D {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute {
        location: 0,
        components: 2,
        kind: AttribType::Float,
        normalized: false,
        stride: mem::size_of::<Vertex2D>(),
        offset: mem::offset_of!(Vertex2D, x),
    }];
}

/// Unsigned integer types usable as element indices.
pub trait IndexType: Pod {
    const KIND: AttribType;
}

impl IndexType for u8 {
    const KIND: AttribType = AttribType::UnsignedByte;
}

impl IndexType for u16 {
    const KIND: AttribType = AttribType::UnsignedShort;
}

impl IndexType for u32 {
    const KIND: AttribType = AttribType::UnsignedInt;
}
