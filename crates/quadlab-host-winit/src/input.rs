use quadlab_core::InputEvent;
use winit::event::WindowEvent;

/// Maps the window events the demo cares about. Everything else is dropped.
pub fn translate(event: &WindowEvent<'_>) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        WindowEvent::ReceivedCharacter(c) => Some(InputEvent::Text(*c)),
        _ => None,
    }
}
