//=========================================================================
// Platform Integration
//
// Glue between the windowing layer (Winit) and the input lock.
//
// Responsibilities:
// - Translate Winit window events into `InputEvent`
// - Drop pointer/touch input while a screen locker holds the input lock
//
// Typical usage inside a Winit `ApplicationHandler::window_event`:
// ```ignore
// if let Some(event) = platform::gate_window_event(&input_lock, &event) {
//     game.handle_input(event);
// }
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use log::trace;
use winit::event::WindowEvent;

//=== Internal Modules ====================================================

use crate::core::input::{InputEvent, InputLock};

//=== Public API ==========================================================

pub use event_mapper::map_window_event;

/// Maps `event` and returns it only if the input lock admits it.
pub fn gate_window_event(input_lock: &InputLock, event: &WindowEvent) -> Option<InputEvent> {
    let mapped = map_window_event(event)?;

    if input_lock.admits(&mapped) {
        Some(mapped)
    } else {
        trace!("Suppressed {:?} while screen is locked", mapped);
        None
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use winit::event::{DeviceId, ElementState, MouseButton as WinitMouseButton};

    fn click() -> WindowEvent {
        WindowEvent::MouseInput {
            // SAFETY: dummy ids are only compared, never handed to the OS.
            device_id: unsafe { DeviceId::dummy() },
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        }
    }

    #[test]
    fn clicks_pass_while_unlocked() {
        let input_lock = InputLock::new();
        assert_eq!(
            gate_window_event(&input_lock, &click()),
            Some(InputEvent::MouseButtonDown { button: MouseButton::Left })
        );
    }

    #[test]
    fn clicks_are_dropped_while_locked() {
        let input_lock = InputLock::new();
        let token = input_lock.acquire().unwrap();

        assert_eq!(gate_window_event(&input_lock, &click()), None);

        input_lock.release(token).unwrap();
        assert!(gate_window_event(&input_lock, &click()).is_some());
    }
}
