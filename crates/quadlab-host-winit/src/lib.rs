//! Host glue (policy layer).
//!
//! Creates the window, the GL context and its surface, and turns window events into
//! [`quadlab_core::InputEvent`]s. Kept separate so the runtime stays free of windowing code.
#![allow(clippy::missing_safety_doc)]

mod input;

use std::ffi::CString;
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

use quadlab_core::{DemoConfig, EngineError};

pub use input::translate;

/// Window/context settings, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub vsync: bool,
    /// Hidden windows still get a full context; used for offscreen checks.
    pub visible: bool,
}

impl From<&DemoConfig> for HostConfig {
    fn from(cfg: &DemoConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            width: cfg.width,
            height: cfg.height,
            gl_version: cfg.gl_version,
            vsync: cfg.vsync,
            visible: true,
        }
    }
}

/// Runs `f`, turning a panic into [`EngineError::GlCreate`].
///
/// winit 0.28 and the glutin config picker report some platform failures (no display server,
/// empty config list) by panicking rather than returning an error.
pub fn catch_backend_panic<R, F: FnOnce() -> R>(what: &str, f: F) -> Result<R, EngineError> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).map_err(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        EngineError::GlCreate(format!("{what}: {msg}"))
    })
}

/// Creates the main-thread event loop, or `GlCreate` when no windowing backend is available.
pub fn create_event_loop() -> Result<EventLoop<()>, EngineError> {
    catch_backend_panic("EventLoop::new", EventLoop::new)
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

/// Window + current GL context + surface + loaded function table.
///
/// Fields drop in declaration order: GL function table, context, surface, window.
pub struct Host {
    pub gl: glow::Context,
    pub gl_context: PossiblyCurrentContext,
    pub gl_surface: Surface<WindowSurface>,
    pub window: Window,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("window", &self.window.id())
            .field("size", &self.window.inner_size())
            .finish_non_exhaustive()
    }
}

impl Host {
    /// Opens the window and makes a GL context current on it.
    ///
    /// Every platform failure, including a display that offers no GL configs, comes back as
    /// [`EngineError::GlCreate`].
    pub fn new<T>(
        event_loop: &EventLoopWindowTarget<T>,
        cfg: &HostConfig,
    ) -> Result<Self, EngineError> {
        let window_builder = WindowBuilder::new()
            .with_title(&cfg.title)
            .with_inner_size(LogicalSize::new(cfg.width as f64, cfg.height as f64))
            .with_resizable(false)
            .with_visible(cfg.visible);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(0)
            .with_stencil_size(0)
            .with_transparency(false);

        let display_builder =
            glutin_winit::DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = catch_backend_panic("DisplayBuilder.build", || {
            display_builder.build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
        })?
        .map_err(|e| EngineError::GlCreate(format!("DisplayBuilder.build: {e}")))?;

        let window = window
            .ok_or_else(|| EngineError::GlCreate("DisplayBuilder did not create a window".into()))?;
        let gl_display = gl_config.display();
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = cfg.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| {
                EngineError::GlCreate(format!("create_context (GL {major}.{minor} core): {e}"))
            })?;

        let (width, height): (u32, u32) = window.inner_size().into();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            non_zero(width),
            non_zero(height),
        );

        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(|e| EngineError::GlCreate(format!("create_window_surface: {e}")))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| EngineError::GlCreate(format!("make_current: {e}")))?;

        let interval = if cfg.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            tracing::warn!("unable to set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| match CString::new(s) {
                Ok(name) => gl_display.get_proc_address(name.as_c_str()) as *const _,
                Err(_) => std::ptr::null(),
            })
        };

        unsafe {
            tracing::info!(
                vendor = %gl.get_parameter_string(glow::VENDOR),
                renderer = %gl.get_parameter_string(glow::RENDERER),
                version = %gl.get_parameter_string(glow::VERSION),
                width,
                height,
                vsync = cfg.vsync,
                "GL context ready"
            );
        }

        Ok(Self {
            gl,
            gl_context,
            gl_surface,
            window,
        })
    }

    /// Current drawable size in physical pixels.
    pub fn drawable_size(&self) -> (i32, i32) {
        let s = self.window.inner_size();
        (s.width.max(1) as i32, s.height.max(1) as i32)
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        self.gl_surface
            .resize(&self.gl_context, non_zero(size.width), non_zero(size.height));
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Swaps buffers. Blocks on vertical refresh when vsync was granted.
    pub fn present(&self) -> Result<(), EngineError> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| EngineError::GlCreate(format!("swap_buffers: {e}")))
    }
}
