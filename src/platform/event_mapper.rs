//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events to the crate's `InputEvent`.
//
// Responsibilities:
// - Translate keyboard, mouse, wheel and touch events
// - Ignore window events that are not user input
// - Provide fallbacks (`Unidentified`, `Other`) for unmapped inputs
//
//=========================================================================

use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta,
    Touch, TouchPhase as WinitTouchPhase, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::input::{InputEvent, KeyCode, MouseButton, TouchPhase};

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,
            ArrowUp => KeyCode::ArrowUp,
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            _ => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== Touch Conversion ====================================================

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Started,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

//=== Full Event Conversion ===============================================
//
// Returns `None` for window events that carry no user input (resize,
// focus, redraw, ...). Wheel deltas are passed through in whatever unit
// the platform reports (lines or pixels).
//

/// Maps a Winit window event to an [`InputEvent`].
pub fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    let mapped = match event {
        //--- Keyboard Input ----------------------------------------------
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key,
                state,
                ..
            },
            ..
        } => {
            let key = match physical_key {
                PhysicalKey::Code(code) => KeyCode::from(*code),
                _ => KeyCode::Unidentified,
            };

            match state {
                ElementState::Pressed => InputEvent::KeyDown { key },
                ElementState::Released => InputEvent::KeyUp { key },
            }
        }

        //--- Mouse Button Input ------------------------------------------
        WindowEvent::MouseInput { state, button, .. } => {
            let button = MouseButton::from(*button);
            match state {
                ElementState::Pressed => InputEvent::MouseButtonDown { button },
                ElementState::Released => InputEvent::MouseButtonUp { button },
            }
        }

        //--- Mouse Movement ----------------------------------------------
        WindowEvent::CursorMoved { position, .. } => InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        },

        //--- Wheel -------------------------------------------------------
        WindowEvent::MouseWheel { delta, .. } => match delta {
            MouseScrollDelta::LineDelta(dx, dy) => InputEvent::Scroll { dx: *dx, dy: *dy },
            MouseScrollDelta::PixelDelta(pos) => InputEvent::Scroll {
                dx: pos.x as f32,
                dy: pos.y as f32,
            },
        },

        //--- Touch -------------------------------------------------------
        WindowEvent::Touch(Touch {
            id, phase, location, ..
        }) => InputEvent::Touch {
            id: *id,
            phase: TouchPhase::from(*phase),
            x: location.x as f32,
            y: location.y as f32,
        },

        //--- Non-input Events --------------------------------------------
        _ => return None,
    };

    Some(mapped)
}

//=========================================================================
// Unit Tests
//=========================================================================
