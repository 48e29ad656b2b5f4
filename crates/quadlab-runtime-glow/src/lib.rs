//! quadlab runtime (glow/OpenGL backend)
//
// This crate contains only the GL side of the demo:
// - read, compile and link shader stages
// - upload the quad and draw it with per-frame uniforms
//
// It does NOT contain windowing, event handling or argument parsing.
#![allow(clippy::missing_safety_doc)]
#![deny(missing_debug_implementations)]

pub mod quad;
pub mod renderer;
pub mod shader;


pub use quad::{QuadMesh, QUAD_VERTEX_COUNT, QUAD_VERTICES};
pub use renderer::{QuadLocations, QuadRenderer};
pub use shader::{raw_slot, ProgramSources, ShaderProgram, ShaderStage, StageSource};

pub use quadlab_core::EngineError;
