//! Per-frame quad rendering.

use glow::HasContext;
use quadlab_core::{EngineError, FrameUniforms};

use crate::quad::QuadMesh;
use crate::shader::{raw_slot, ProgramSources, ShaderProgram};

pub const ATTR_VERTEX_POS: &str = "LVertexPos2D";
pub const UNIFORM_TIME: &str = "time";
pub const UNIFORM_SCREEN_WIDTH: &str = "screenWidth";
pub const UNIFORM_SCREEN_HEIGHT: &str = "screenHeight";

/// Locations resolved once after link. Missing names stay `None` and are skipped when drawing.
#[derive(Debug, Clone, Default)]
pub struct QuadLocations {
    pub vertex_pos: Option<u32>,
    pub time: Option<glow::NativeUniformLocation>,
    pub screen_width: Option<glow::NativeUniformLocation>,
    pub screen_height: Option<glow::NativeUniformLocation>,
}

impl QuadLocations {
    pub unsafe fn resolve(gl: &glow::Context, program: &ShaderProgram) -> Self {
        let locs = Self {
            vertex_pos: program.attrib_location(gl, ATTR_VERTEX_POS),
            time: program.uniform_location(gl, UNIFORM_TIME),
            screen_width: program.uniform_location(gl, UNIFORM_SCREEN_WIDTH),
            screen_height: program.uniform_location(gl, UNIFORM_SCREEN_HEIGHT),
        };

        tracing::debug!(attrib = raw_slot(locs.vertex_pos), "{ATTR_VERTEX_POS} slot");
        for name in locs.missing() {
            tracing::warn!(name, "not an active attribute/uniform in the linked program");
        }
        locs
    }

    /// Names that did not resolve.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.vertex_pos.is_none() {
            out.push(ATTR_VERTEX_POS);
        }
        if self.time.is_none() {
            out.push(UNIFORM_TIME);
        }
        if self.screen_width.is_none() {
            out.push(UNIFORM_SCREEN_WIDTH);
        }
        if self.screen_height.is_none() {
            out.push(UNIFORM_SCREEN_HEIGHT);
        }
        out
    }

    /// Attribute slot the quad's positions are bound to. Slot 0 if the attribute is inactive.
    pub fn vertex_slot(&self) -> u32 {
        self.vertex_pos.unwrap_or(0)
    }
}

/// Shader program + quad geometry + resolved locations.
#[derive(Debug)]
pub struct QuadRenderer {
    program: ShaderProgram,
    mesh: QuadMesh,
    locations: QuadLocations,
}

impl QuadRenderer {
    pub unsafe fn new(
        gl: &glow::Context,
        sources: &ProgramSources,
        clear_color: [f32; 4],
    ) -> Result<Self, EngineError> {
        let program = ShaderProgram::new(gl, sources)?;
        let locations = QuadLocations::resolve(gl, &program);

        let mesh = match QuadMesh::new(gl, locations.vertex_slot()) {
            Ok(m) => m,
            Err(e) => {
                program.destroy(gl);
                return Err(e);
            }
        };

        let [r, g, b, a] = clear_color;
        gl.clear_color(r, g, b, a);

        Ok(Self {
            program,
            mesh,
            locations,
        })
    }

    pub unsafe fn set_viewport(&self, gl: &glow::Context, w: i32, h: i32) {
        gl.viewport(0, 0, w.max(1), h.max(1));
    }

    /// Clears, then draws the quad if `draw` is set.
    pub unsafe fn render(&self, gl: &glow::Context, draw: bool, u: FrameUniforms) {
        gl.clear(glow::COLOR_BUFFER_BIT);
        if !draw {
            return;
        }

        self.program.use_program(gl);
        gl.uniform_1_f32(self.locations.time.as_ref(), u.time);
        gl.uniform_1_f32(self.locations.screen_width.as_ref(), u.screen_width);
        gl.uniform_1_f32(self.locations.screen_height.as_ref(), u.screen_height);
        self.mesh.draw(gl);
        ShaderProgram::unuse(gl);

        tracing::trace!(time = u.time, "quad drawn");
    }

    /// Releases the program and geometry.
    pub unsafe fn destroy(self, gl: &glow::Context) {
        self.mesh.destroy(gl);
        self.program.destroy(gl);
        tracing::debug!("quad renderer destroyed");
    }
}
