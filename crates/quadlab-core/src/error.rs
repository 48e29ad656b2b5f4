use std::path::PathBuf;

/// Engine-level errors used across quadlab crates.
///
/// This type lives in `quadlab-core` and is re-exported by the runtime and host crates.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    // ---- Core / assets / args ----
    #[error("assets not found (starting at {})", .start_dir.display())]
    AssetsNotFound { start_dir: PathBuf },

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("usage: {0}")]
    Usage(String),

    // ---- Runtime-facing (backend) ----
    #[error("vertex shader compile error ({origin}): {log}")]
    VertexCompile { origin: String, log: String },

    #[error("geometry shader compile error ({origin}): {log}")]
    GeometryCompile { origin: String, log: String },

    #[error("fragment shader compile error ({origin}): {log}")]
    FragmentCompile { origin: String, log: String },

    #[error("program link error: {0}")]
    Link(String),

    #[error("backend object creation failed: {0}")]
    GlCreate(String),
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by shader source text rather than the platform.
    pub fn is_shader_error(&self) -> bool {
        matches!(
            self,
            EngineError::VertexCompile { .. }
                | EngineError::GeometryCompile { .. }
                | EngineError::FragmentCompile { .. }
                | EngineError::Link(_)
        )
    }
}
