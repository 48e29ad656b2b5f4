// demos/quad/src/main.rs
//
// Opens a 640x480 GL 3.3 core window, compiles the quad shaders and redraws the quad every
// frame with a `time` uniform. `q` toggles drawing.
//
//   quadlab-demo-quad [FRAGMENT_SHADER]
//
// With no argument the default fragment shader under `shaders/` is used.

use quadlab_core::{parse_args, AssetsRoot, CliCommand, DemoConfig, EngineError, FrameState};
use quadlab_host_winit::{create_event_loop, translate, Host, HostConfig};
use quadlab_runtime_glow::{ProgramSources, QuadRenderer};
use tracing_subscriber::EnvFilter;
use winit::event::{Event, WindowEvent};
use winit::event_loop::ControlFlow;

/// Everything the loop owns. Torn down exactly once, in [`App::teardown`].
#[derive(Debug)]
struct App {
    renderer: QuadRenderer,
    frame: FrameState,
    host: Host,
}

impl App {
    fn sync_viewport(&self) {
        let (w, h) = self.host.drawable_size();
        unsafe { self.renderer.set_viewport(&self.host.gl, w, h) };
    }

    fn handle_window_event(&mut self, event: &WindowEvent<'_>) {
        match event {
            WindowEvent::Resized(size) => {
                self.host.resize(*size);
                self.sync_viewport();
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                self.host.resize(**new_inner_size);
                self.sync_viewport();
            }
            _ => {}
        }

        if let Some(input) = translate(event) {
            self.frame.handle(input);
        }
    }

    fn redraw(&mut self) {
        self.frame.update();
        unsafe {
            self.renderer
                .render(&self.host.gl, self.frame.draw.is_enabled(), self.frame.uniforms());
        }
        if let Err(e) = self.host.present() {
            tracing::error!("present failed: {e}");
        }
    }

    fn teardown(self) {
        unsafe { self.renderer.destroy(&self.host.gl) };
        drop(self.host);
        tracing::info!("shutdown complete");
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        if e.is_shader_error() {
            tracing::error!("shader program failed to build: {e}");
        } else {
            tracing::error!("{e}");
        }
        let code = match e {
            EngineError::Usage(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<(), EngineError> {
    let fragment = match parse_args(std::env::args().skip(1))? {
        CliCommand::Help => {
            println!("usage: {}", quadlab_core::config::USAGE);
            return Ok(());
        }
        CliCommand::Run { fragment } => fragment,
    };

    let assets = AssetsRoot::discover_from_cwd()?;
    let cfg = DemoConfig::with_assets(&assets).with_fragment_override(fragment);

    let sources = ProgramSources::from_paths(
        &cfg.vertex_shader,
        cfg.geometry_shader.as_deref(),
        &cfg.fragment_shader,
    )?;

    let event_loop = create_event_loop()?;
    let host = Host::new(&event_loop, &HostConfig::from(&cfg))?;
    let renderer = unsafe { QuadRenderer::new(&host.gl, &sources, cfg.clear_color)? };

    let app = App {
        renderer,
        frame: FrameState::new(),
        host,
    };
    app.sync_viewport();

    println!("--- keys ---");
    println!("q : toggle quad");
    println!("------------");

    let mut app = Some(app);
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                if let Some(app) = app.as_mut() {
                    app.handle_window_event(&event);
                    if !app.frame.is_running() {
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }

            Event::MainEventsCleared => {
                if let Some(app) = app.as_ref() {
                    app.host.request_redraw();
                }
            }

            Event::RedrawRequested(_) => {
                if let Some(app) = app.as_mut() {
                    if app.frame.is_running() {
                        app.redraw();
                    }
                }
            }

            Event::LoopDestroyed => {
                if let Some(app) = app.take() {
                    app.teardown();
                }
            }

            _ => {}
        }
    });
}
