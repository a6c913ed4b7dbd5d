use super::backend::Gpu;
use super::shaders::POSITION_ATTRIBUTE;
use crate::utils::error::SurfaceError;
use glam::Vec3;

/// Half the side length of the quad, in normalized device coordinates.
pub const QUAD_HALF_WIDTH: f32 = 0.4;
/// Depth every quad vertex sits at.
pub const QUAD_DEPTH: f32 = -1.0;
pub const QUAD_VERTEX_COUNT: usize = 6;

/// Two triangles covering a square of half-width `s`, split along the
/// (-s,-s)/(s,s) diagonal. Face culling is off, so winding does not matter.
pub fn quad_vertices(s: f32) -> [Vec3; QUAD_VERTEX_COUNT] {
    [
        Vec3::new(-s, s, QUAD_DEPTH),
        Vec3::new(s, s, QUAD_DEPTH),
        Vec3::new(-s, -s, QUAD_DEPTH),
        Vec3::new(-s, -s, QUAD_DEPTH),
        Vec3::new(s, -s, QUAD_DEPTH),
        Vec3::new(s, s, QUAD_DEPTH),
    ]
}

/// The quad as the flat float array that is uploaded.
pub fn quad_positions() -> [f32; QUAD_VERTEX_COUNT * 3] {
    let mut out = [0.0; QUAD_VERTEX_COUNT * 3];
    for (chunk, vertex) in out.chunks_exact_mut(3).zip(quad_vertices(QUAD_HALF_WIDTH)) {
        chunk.copy_from_slice(&vertex.to_array());
    }
    out
}

/// GPU-resident quad: one vertex array and its single static buffer.
#[derive(Debug)]
pub struct QuadMesh<G: Gpu> {
    vertex_array: G::VertexArray,
    buffer: G::Buffer,
}

impl<G: Gpu> QuadMesh<G> {
    pub fn upload(gpu: &G) -> Result<Self, SurfaceError> {
        let vertex_array = gpu
            .create_vertex_array()
            .map_err(SurfaceError::Resource)?;
        let buffer = match gpu.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                gpu.delete_vertex_array(vertex_array);
                return Err(SurfaceError::Resource(e));
            }
        };

        gpu.bind_vertex_array(Some(vertex_array));
        gpu.bind_array_buffer(Some(buffer));
        gpu.static_array_buffer_data(&quad_positions());
        gpu.float_attrib_pointer(POSITION_ATTRIBUTE, 3);
        gpu.enable_attrib_array(POSITION_ATTRIBUTE);
        gpu.bind_vertex_array(None);

        log::debug!("Uploaded quad with {} vertices", QUAD_VERTEX_COUNT);
        Ok(Self {
            vertex_array,
            buffer,
        })
    }

    pub fn draw(&self, gpu: &G) {
        gpu.bind_vertex_array(Some(self.vertex_array));
        gpu.draw_triangles(0, QUAD_VERTEX_COUNT as i32);
    }

    pub fn delete(self, gpu: &G) {
        gpu.bind_vertex_array(None);
        gpu.delete_vertex_array(self.vertex_array);
        gpu.delete_buffer(self.buffer);
    }
}
