//! Owning wrappers over driver buffer objects.
//!
//! Each wrapper holds exactly one non-zero handle. `destroy` takes the wrapper
//! by value, so a released handle can never be bound again. Nothing is
//! released on drop: the driver is needed for that, and the context may
//! already be gone by the time a wrapper goes out of scope.

use crate::driver::{BufferTarget, BufferUsage, GlDriver};
use crate::glutils::GlContext;
use crate::math::{IndexType, Vertex};
use std::marker::PhantomData;

#[derive(Debug)]
struct RawBuffer {
    id: u32,
    target: BufferTarget,
    len: usize,
}

impl RawBuffer {
    #[track_caller]
    fn generate<D: GlDriver>(ctx: &mut GlContext<D>, target: BufferTarget) -> RawBuffer {
        let id = ctx.gl().gen_buffer();
        ctx.check_errors();
        debug_assert_ne!(id, 0, "driver returned an unallocated buffer handle");
        let buffer = RawBuffer { id, target, len: 0 };
        buffer.bind(ctx);
        buffer
    }

    #[track_caller]
    fn upload<D: GlDriver, T: bytemuck::Pod>(
        &mut self,
        ctx: &mut GlContext<D>,
        data: &[T],
        usage: BufferUsage,
    ) {
        self.bind(ctx);
        ctx.gl()
            .buffer_data(self.target, bytemuck::cast_slice(data), usage);
        ctx.check_errors();
        self.len = data.len();
    }

    #[track_caller]
    fn bind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        ctx.bind_buffer(self.target, self.id);
    }

    fn unbind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        ctx.bind_buffer(self.target, 0);
    }

    fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        ctx.gl().delete_buffer(self.id);
        ctx.buffer_released(self.id);
    }
}

/// A buffer of vertices bound to the array-buffer target.
#[derive(Debug)]
pub struct VertexBuffer<V: Vertex> {
    raw: RawBuffer,
    _vertex: PhantomData<V>,
}

impl<V: Vertex> VertexBuffer<V> {
    /// Allocates a buffer, binds it and uploads `vertices`. The buffer stays bound.
    #[track_caller]
    pub fn new<D: GlDriver>(
        ctx: &mut GlContext<D>,
        vertices: &[V],
        usage: BufferUsage,
    ) -> VertexBuffer<V> {
        let mut vb = Self::empty(ctx);
        vb.raw.upload(ctx, vertices, usage);
        vb
    }

    /// Allocates and binds a buffer without storage; fill it with [`Self::upload`].
    #[track_caller]
    pub fn empty<D: GlDriver>(ctx: &mut GlContext<D>) -> VertexBuffer<V> {
        VertexBuffer {
            raw: RawBuffer::generate(ctx, BufferTarget::Array),
            _vertex: PhantomData,
        }
    }

    #[track_caller]
    pub fn upload<D: GlDriver>(&mut self, ctx: &mut GlContext<D>, vertices: &[V], usage: BufferUsage) {
        self.raw.upload(ctx, vertices, usage);
    }

    pub fn id(&self) -> u32 {
        self.raw.id
    }

    /// Number of vertices last uploaded.
    pub fn len(&self) -> usize {
        self.raw.len
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    #[track_caller]
    pub fn bind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        self.raw.bind(ctx);
    }

    pub fn unbind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        self.raw.unbind(ctx);
    }

    pub fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        self.raw.destroy(ctx);
    }
}

/// A buffer of element indices bound to the element-array target.
#[derive(Debug)]
pub struct IndexBuffer<I: IndexType> {
    raw: RawBuffer,
    _index: PhantomData<I>,
}

impl<I: IndexType> IndexBuffer<I> {
    #[track_caller]
    pub fn new<D: GlDriver>(ctx: &mut GlContext<D>, indices: &[I], usage: BufferUsage) -> IndexBuffer<I> {
        let mut ib = Self::empty(ctx);
        ib.raw.upload(ctx, indices, usage);
        ib
    }

    #[track_caller]
    pub fn empty<D: GlDriver>(ctx: &mut GlContext<D>) -> IndexBuffer<I> {
        IndexBuffer {
            raw: RawBuffer::generate(ctx, BufferTarget::ElementArray),
            _index: PhantomData,
        }
    }

    #[track_caller]
    pub fn upload<D: GlDriver>(&mut self, ctx: &mut GlContext<D>, indices: &[I], usage: BufferUsage) {
        self.raw.upload(ctx, indices, usage);
    }

    pub fn id(&self) -> u32 {
        self.raw.id
    }

    pub fn len(&self) -> usize {
        self.raw.len
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    #[track_caller]
    pub fn bind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        self.raw.bind(ctx);
    }

    pub fn unbind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        self.raw.unbind(ctx);
    }

    pub fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        self.raw.destroy(ctx);
    }
}

/// A vertex-array object recording attribute layouts.
#[derive(Debug)]
pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    /// Allocates a vertex array and binds it.
    #[track_caller]
    pub fn new<D: GlDriver>(ctx: &mut GlContext<D>) -> VertexArray {
        let id = ctx.gl().gen_vertex_array();
        ctx.check_errors();
        debug_assert_ne!(id, 0, "driver returned an unallocated vertex array handle");
        let vao = VertexArray { id };
        vao.bind(ctx);
        vao
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    #[track_caller]
    pub fn enable_attribute<D: GlDriver>(&self, ctx: &GlContext<D>, index: u32) {
        ctx.gl().enable_vertex_attrib_array(index);
        ctx.check_errors();
    }

    /// Binds `buffer` and records the layout of `V` in this array.
    #[track_caller]
    pub fn describe<D: GlDriver, V: Vertex>(&self, ctx: &mut GlContext<D>, buffer: &VertexBuffer<V>) {
        self.bind(ctx);
        buffer.bind(ctx);
        ctx.describe_vertex::<V>();
    }

    #[track_caller]
    pub fn bind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        ctx.bind_vertex_array(self.id);
    }

    pub fn unbind<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        ctx.bind_vertex_array(0);
    }

    pub fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        ctx.gl().delete_vertex_array(self.id);
        ctx.vertex_array_released(self.id);
    }
}
