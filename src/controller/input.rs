//! Host-independent description of pointer and keyboard input.
//!
//! The DOM layer converts `PointerEvent`/`KeyboardEvent` fields into these
//! types; the controller never sees browser objects.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub fn toggles(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map `MouseEvent.button`.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Keys the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    F2,
    Escape,
    Other,
}

impl Key {
    /// Map `KeyboardEvent.key`.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Enter" => Self::Enter,
            "F2" => Self::F2,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Row/column step for arrow keys.
    pub fn direction(self) -> Option<(i8, i8)> {
        match self {
            Self::ArrowUp => Some((-1, 0)),
            Self::ArrowDown => Some((1, 0)),
            Self::ArrowLeft => Some((0, -1)),
            Self::ArrowRight => Some((0, 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("F2"), Key::F2);
        assert_eq!(Key::from_dom("a"), Key::Other);
        assert_eq!(Key::ArrowLeft.direction(), Some((0, -1)));
        assert_eq!(Key::Enter.direction(), None);
    }

    #[test]
    fn test_toggle_modifier() {
        assert!(Modifiers::CTRL.toggles());
        assert!(Modifiers::META.toggles());
        assert!(!Modifiers::SHIFT.toggles());
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    }
}
