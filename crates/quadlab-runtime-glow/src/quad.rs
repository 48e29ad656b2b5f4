use glow::HasContext;
use quadlab_core::EngineError;

/// Floats per vertex (x, y).
pub const QUAD_COMPONENTS: i32 = 2;

/// Two triangles forming the quad, in clip space.
pub const QUAD_VERTICES: [f32; 12] = [
    -0.5, -1.0, //
    0.5, -1.0, //
    -0.5, 1.0, //
    -0.5, 1.0, //
    0.5, -1.0, //
    0.5, 1.0, //
];

pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32 / QUAD_COMPONENTS;

/// The quad's VAO/VBO. Uploaded once with `STATIC_DRAW`, never mutated.
#[derive(Debug)]
pub struct QuadMesh {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
}

impl QuadMesh {
    /// Uploads [`QUAD_VERTICES`] and wires them to attribute `slot`.
    pub unsafe fn new(gl: &glow::Context, slot: u32) -> Result<Self, EngineError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| EngineError::GlCreate(format!("create_vertex_array: {e}")))?;
        let vbo = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(EngineError::GlCreate(format!("create_buffer: {e}")));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );

        gl.enable_vertex_attrib_array(slot);
        gl.vertex_attrib_pointer_f32(slot, QUAD_COMPONENTS, glow::FLOAT, false, 0, 0);

        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);

        Ok(Self { vao, vbo })
    }

    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_arrays(glow::TRIANGLES, 0, QUAD_VERTEX_COUNT);
        gl.bind_vertex_array(None);
    }

    pub unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles() {
        assert_eq!(QUAD_VERTEX_COUNT, 6);
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 2 * 6 * std::mem::size_of::<f32>());
    }

    #[test]
    fn quad_spans_half_width_full_height() {
        let mut xs = QUAD_VERTICES.iter().step_by(2);
        let mut ys = QUAD_VERTICES.iter().skip(1).step_by(2);
        assert!(xs.all(|x| x.abs() == 0.5));
        assert!(ys.all(|y| y.abs() == 1.0));
        // Both triangles share the (0.5, -1) / (-0.5, 1) diagonal.
        assert_eq!(&QUAD_VERTICES[2..6], &[0.5f32, -1.0, -0.5, 1.0]);
        assert_eq!(&QUAD_VERTICES[6..10], &[-0.5f32, 1.0, 0.5, -1.0]);
    }
}
