//! Per-frame application state (GL-free).
//!
//! The host translates window events into [`InputEvent`]s, feeds them to [`FrameState`], then
//! calls [`FrameState::update`] once per frame before rendering.

use std::time::Instant;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Character that toggles quad drawing.
pub const TOGGLE_KEY: char = 'q';

/// Absolute time since startup, in seconds.
///
/// Each tick reads an absolute timestamp (not a delta). No smoothing, no history.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    seconds: f32,
}

impl FrameClock {
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            seconds: 0.0,
        }
    }

    /// Recomputes elapsed time from the current instant.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Recomputes elapsed time as of `now`. Never moves backwards.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let t = now.saturating_duration_since(self.start).as_secs_f32();
        self.seconds = self.seconds.max(t);
        self.seconds
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

/// The "draw the quad" flag. Starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawToggle {
    enabled: bool,
}

impl Default for DrawToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DrawToggle {
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Reached only through a close request; the loop exits after the current iteration.
    Terminating,
}

/// Input the demo understands. Hosts drop everything else before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    CloseRequested,
    /// A single character of text input.
    Text(char),
}

/// Scalar uniforms set on every drawn frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub loop_state: LoopState,
    pub draw: DrawToggle,
    pub clock: FrameClock,
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameState {
    pub fn new() -> Self {
        Self {
            loop_state: LoopState::Running,
            draw: DrawToggle::default(),
            clock: FrameClock::start(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    /// Applies one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::CloseRequested => {
                if self.loop_state == LoopState::Running {
                    tracing::info!("close requested");
                }
                self.loop_state = LoopState::Terminating;
            }
            InputEvent::Text(TOGGLE_KEY) => {
                let on = self.draw.toggle();
                tracing::info!(draw_quad = on, "toggled quad");
            }
            InputEvent::Text(_) => {}
        }
    }

    /// Advances the clock. Called once per frame, after input is drained.
    pub fn update(&mut self) -> f32 {
        self.clock.tick()
    }

    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            time: self.clock.seconds(),
            screen_width: SCREEN_WIDTH as f32,
            screen_height: SCREEN_HEIGHT as f32,
        }
    }
}
