#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod assets;
pub mod config;
pub mod error;
pub mod frame;

pub use assets::AssetsRoot;
pub use config::{parse_args, CliCommand, DemoConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use error::EngineError;
pub use frame::{DrawToggle, FrameClock, FrameState, FrameUniforms, InputEvent, LoopState};
