//! Shader sources and the linked program wrapper.

use std::path::Path;

use glow::HasContext;
use quadlab_core::EngineError;

/// One pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl ShaderStage {
    pub fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Maps a compiler log for this stage onto the matching error variant.
    pub fn compile_error(self, origin: &str, log: String) -> EngineError {
        let origin = origin.to_string();
        match self {
            ShaderStage::Vertex => EngineError::VertexCompile { origin, log },
            ShaderStage::Geometry => EngineError::GeometryCompile { origin, log },
            ShaderStage::Fragment => EngineError::FragmentCompile { origin, log },
        }
    }
}

/// Source text for one stage. Read once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct StageSource {
    pub stage: ShaderStage,
    pub text: String,
    /// Human-friendly origin (path/label) for logs.
    pub origin: String,
}

impl StageSource {
    pub fn from_path(stage: ShaderStage, path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        tracing::debug!(
            stage = stage.label(),
            path = %path.display(),
            bytes = text.len(),
            "read shader source"
        );
        Ok(Self {
            stage,
            text,
            origin: path.display().to_string(),
        })
    }
}

/// Vertex + optional geometry + fragment.
#[derive(Debug, Clone)]
pub struct ProgramSources {
    pub vertex: StageSource,
    pub geometry: Option<StageSource>,
    pub fragment: StageSource,
}

impl ProgramSources {
    pub fn from_paths(
        vertex: &Path,
        geometry: Option<&Path>,
        fragment: &Path,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            vertex: StageSource::from_path(ShaderStage::Vertex, vertex)?,
            geometry: geometry
                .map(|p| StageSource::from_path(ShaderStage::Geometry, p))
                .transpose()?,
            fragment: StageSource::from_path(ShaderStage::Fragment, fragment)?,
        })
    }

    /// Stages in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = &StageSource> {
        std::iter::once(&self.vertex)
            .chain(self.geometry.as_ref())
            .chain(std::iter::once(&self.fragment))
    }
}

/// Raw GL-style slot for an attribute lookup: `-1` when absent.
pub fn raw_slot(slot: Option<u32>) -> i32 {
    slot.map(|s| s as i32).unwrap_or(-1)
}

unsafe fn compile_stage(
    gl: &glow::Context,
    src: &StageSource,
) -> Result<glow::NativeShader, EngineError> {
    let shader = gl.create_shader(src.stage.gl_kind()).map_err(|e| {
        EngineError::GlCreate(format!("create_shader({}) failed: {e:?}", src.stage.label()))
    })?;
    gl.shader_source(shader, &src.text);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(src.stage.compile_error(&src.origin, log));
    }
    Ok(shader)
}

/// A linked GL program.
///
/// Construction either returns a usable program or an error; stage objects never outlive
/// `new`. Release with [`ShaderProgram::destroy`], which consumes the value.
#[derive(Debug)]
pub struct ShaderProgram {
    program: glow::NativeProgram,
}

impl ShaderProgram {
    pub unsafe fn new(gl: &glow::Context, sources: &ProgramSources) -> Result<Self, EngineError> {
        let mut shaders = Vec::with_capacity(3);
        for src in sources.stages() {
            match compile_stage(gl, src) {
                Ok(shader) => shaders.push(shader),
                Err(e) => {
                    for shader in shaders {
                        gl.delete_shader(shader);
                    }
                    return Err(e);
                }
            }
        }

        let program = match gl.create_program() {
            Ok(p) => p,
            Err(e) => {
                for shader in shaders {
                    gl.delete_shader(shader);
                }
                return Err(EngineError::GlCreate(format!(
                    "create_program failed: {e:?}"
                )));
            }
        };

        for &shader in &shaders {
            gl.attach_shader(program, shader);
        }
        gl.link_program(program);

        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(EngineError::Link(log));
        }

        tracing::info!(
            vertex = %sources.vertex.origin,
            geometry = sources.geometry.as_ref().map(|g| g.origin.as_str()).unwrap_or("-"),
            fragment = %sources.fragment.origin,
            "shader program linked"
        );
        Ok(Self { program })
    }

    /// `None` if the attribute is absent or optimized out.
    pub unsafe fn attrib_location(&self, gl: &glow::Context, name: &str) -> Option<u32> {
        gl.get_attrib_location(self.program, name)
    }

    /// `None` if the uniform is absent or optimized out.
    pub unsafe fn uniform_location(
        &self,
        gl: &glow::Context,
        name: &str,
    ) -> Option<glow::NativeUniformLocation> {
        gl.get_uniform_location(self.program, name)
    }

    /// Makes this the active program. Does not check that uniforms were set.
    pub unsafe fn use_program(&self, gl: &glow::Context) {
        gl.use_program(Some(self.program));
    }

    pub unsafe fn unuse(gl: &glow::Context) {
        gl.use_program(None);
    }

    pub unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let p = std::env::temp_dir().join(format!("quadlab_shader_{name}_{ts}"));
        fs::write(&p, contents).expect("write temp shader");
        p
    }

    #[test]
    fn stages_come_in_pipeline_order() {
        let vs = write_temp("vs", "// vs");
        let gs = write_temp("gs", "// gs");
        let fs_ = write_temp("fs", "// fs");

        let with_geom = ProgramSources::from_paths(&vs, Some(&gs), &fs_).unwrap();
        let order: Vec<_> = with_geom.stages().map(|s| s.stage).collect();
        assert_eq!(
            order,
            [ShaderStage::Vertex, ShaderStage::Geometry, ShaderStage::Fragment]
        );

        let without = ProgramSources::from_paths(&vs, None, &fs_).unwrap();
        assert_eq!(without.stages().count(), 2);
        assert_eq!(without.fragment.text, "// fs");

        for p in [vs, gs, fs_] {
            let _ = fs::remove_file(p);
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let missing = std::env::temp_dir().join("quadlab_definitely_missing.fshader");
        let err = StageSource::from_path(ShaderStage::Fragment, &missing).unwrap_err();
        match err {
            EngineError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn compile_error_variant_follows_stage() {
        let e = ShaderStage::Geometry.compile_error("g.gshader", "bad".into());
        assert!(matches!(e, EngineError::GeometryCompile { .. }));
        let e = ShaderStage::Vertex.compile_error("v.vshader", "bad".into());
        assert!(matches!(e, EngineError::VertexCompile { .. }));
    }

    #[test]
    fn raw_slot_sentinel() {
        assert_eq!(raw_slot(None), -1);
        assert_eq!(raw_slot(Some(0)), 0);
        assert_eq!(raw_slot(Some(3)), 3);
    }

    #[test]
    fn gl_kinds() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Geometry.gl_kind(), glow::GEOMETRY_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), glow::FRAGMENT_SHADER);
    }
}
