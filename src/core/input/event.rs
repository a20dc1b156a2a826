//=========================================================================
// Input Event Types
//
// Platform-independent representation of the user input that reaches
// the application while overlays come and go.
//
// Responsibilities:
// - Represent keyboard, pointer, wheel and touch input portably
// - Classify events as pointer-like so the input lock can drop them
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputLock::filter (drops pointer/touch while locked)
//         ↓
//    Application input handling
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the application layer reacts to while a locker is on
/// screen are named; everything else maps to `Unidentified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== TouchPhase ==========================================================

/// Stage of a single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: keyboard
/// - **MouseButtonDown/MouseButtonUp/MouseMoved/Scroll**: pointer
/// - **Touch**: touch screen contacts
/// - **Unidentified**: unknown/unsupported events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton },

    /// Mouse cursor moved to new position.
    ///
    /// Coordinates are in screen space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Wheel or trackpad scroll, in lines.
    Scroll { dx: f32, dy: f32 },

    /// Touch contact update.
    Touch {
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
    },

    /// Unrecognized or unsupported event.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for mouse, wheel and touch input.
    ///
    /// These are the events suppressed while the input lock is held.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::MouseButtonDown { .. }
                | Self::MouseButtonUp { .. }
                | Self::MouseMoved { .. }
                | Self::Scroll { .. }
                | Self::Touch { .. }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_classification() {
        assert!(InputEvent::MouseButtonDown { button: MouseButton::Left }.is_pointer());
        assert!(InputEvent::MouseMoved { x: 1.0, y: 2.0 }.is_pointer());
        assert!(InputEvent::Scroll { dx: 0.0, dy: -1.0 }.is_pointer());
        assert!(InputEvent::Touch {
            id: 3,
            phase: TouchPhase::Started,
            x: 10.0,
            y: 10.0,
        }
        .is_pointer());
    }

    #[test]
    fn keyboard_is_not_pointer() {
        assert!(!InputEvent::KeyDown { key: KeyCode::Escape }.is_pointer());
        assert!(!InputEvent::KeyUp { key: KeyCode::Enter }.is_pointer());
        assert!(!InputEvent::Unidentified.is_pointer());
    }
}
