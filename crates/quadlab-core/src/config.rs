//! Demo configuration and command-line parsing.
//!
//! There is no config file: settings are fixed defaults, with the fragment shader path as the
//! only thing a user can override (first positional argument).

use std::path::PathBuf;

use crate::{AssetsRoot, EngineError};

/// Logical screen size. Also the values fed to the `screenWidth`/`screenHeight` uniforms.
pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;

pub const DEFAULT_VERTEX_SHADER: &str = "shaders/basic_vertex.vshader";
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/basic_fragment.fshader";

pub const USAGE: &str = "quadlab-demo-quad [FRAGMENT_SHADER]";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run the demo, optionally replacing the default fragment shader.
    Run { fragment: Option<PathBuf> },
    Help,
}

/// Parses arguments (program name already stripped).
pub fn parse_args<I, S>(args: I) -> Result<CliCommand, EngineError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let first = args.next();
    if let Some(extra) = args.next() {
        return Err(EngineError::Usage(format!(
            "unexpected argument '{extra}'\n  {USAGE}"
        )));
    }

    match first.as_deref() {
        None => Ok(CliCommand::Run { fragment: None }),
        Some("-h") | Some("--help") => Ok(CliCommand::Help),
        Some(path) => Ok(CliCommand::Run {
            fragment: Some(PathBuf::from(path)),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested GL context version (major, minor), core profile.
    pub gl_version: (u8, u8),
    /// Wait for vertical refresh on present. Chosen once at startup.
    pub vsync: bool,
    pub clear_color: [f32; 4],
    pub vertex_shader: PathBuf,
    pub geometry_shader: Option<PathBuf>,
    pub fragment_shader: PathBuf,
}

impl DemoConfig {
    /// Defaults with shader paths resolved against `assets`.
    pub fn with_assets(assets: &AssetsRoot) -> Self {
        Self {
            title: "quadlab: quad".to_string(),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            gl_version: (3, 3),
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertex_shader: assets.resolve(DEFAULT_VERTEX_SHADER),
            geometry_shader: None,
            fragment_shader: assets.resolve(DEFAULT_FRAGMENT_SHADER),
        }
    }

    /// Replaces the fragment shader path. The path is used as given.
    pub fn with_fragment_override(mut self, fragment: Option<PathBuf>) -> Self {
        if let Some(path) = fragment {
            self.fragment_shader = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_runs_with_defaults() {
        let cmd = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(cmd, CliCommand::Run { fragment: None });
    }

    #[test]
    fn single_arg_is_fragment_path() {
        let cmd = parse_args(["shaders/rings_fragment.fshader"]).unwrap();
        assert_eq!(
            cmd,
            CliCommand::Run {
                fragment: Some(PathBuf::from("shaders/rings_fragment.fshader"))
            }
        );
    }

    #[test]
    fn extra_args_are_rejected() {
        let err = parse_args(["a.fshader", "b.fshader"]).unwrap_err();
        assert!(matches!(err, EngineError::Usage(_)));
        assert!(err.to_string().contains("b.fshader"));
    }

    #[test]
    fn help_flag() {
        assert_eq!(parse_args(["--help"]).unwrap(), CliCommand::Help);
        assert_eq!(parse_args(["-h"]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn defaults_match_fixed_logical_screen() {
        let cfg = DemoConfig::with_assets(&AssetsRoot::new("/assets"));
        assert_eq!((cfg.width, cfg.height), (640, 480));
        assert_eq!(cfg.gl_version, (3, 3));
        assert!(cfg.vsync);
        assert!(cfg.geometry_shader.is_none());
        assert_eq!(
            cfg.vertex_shader,
            PathBuf::from("/assets").join(DEFAULT_VERTEX_SHADER)
        );
    }

    #[test]
    fn fragment_override_keeps_default_vertex() {
        let cfg = DemoConfig::with_assets(&AssetsRoot::new("/assets"))
            .with_fragment_override(Some(PathBuf::from("alt.fshader")));
        assert_eq!(cfg.fragment_shader, PathBuf::from("alt.fshader"));
        assert_eq!(
            cfg.vertex_shader,
            PathBuf::from("/assets").join(DEFAULT_VERTEX_SHADER)
        );
    }
}
