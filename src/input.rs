use crate::render::SurfaceCommand;
use winit::keyboard::KeyCode;

pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// Maps a pressed key to the command it triggers, if any.
pub fn command_for_key(key: KeyCode) -> Option<SurfaceCommand> {
    match key {
        KeyCode::Escape => Some(SurfaceCommand::Quit),
        KeyCode::KeyW => Some(SurfaceCommand::Wireframe),
        KeyCode::KeyS => Some(SurfaceCommand::Filled),
        KeyCode::Digit1 => Some(SurfaceCommand::Colour(RED)),
        KeyCode::Digit2 => Some(SurfaceCommand::Colour(GREEN)),
        KeyCode::Digit3 => Some(SurfaceCommand::Colour(BLUE)),
        _ => None,
    }
}
