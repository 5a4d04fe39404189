//! Adapter to convert winit key events to our KeyToken type

use winit::event::ElementState;
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::normalize::{RawKey, RawKeyEvent};
use super::types::KeyToken;

/// Build a raw window-source event from a winit keyboard event
pub fn raw_event(physical_key: PhysicalKey, state: ElementState) -> RawKeyEvent {
    RawKeyEvent {
        key: RawKey::Window(physical_key),
        pressed: state == ElementState::Pressed,
    }
}

/// Convert a winit physical key to a KeyToken
///
/// Physical keys are used rather than logical ones so that a chord held with
/// Shift or a non-US layout still resolves to the key's position name.
/// Returns None if the key cannot be mapped.
pub fn token_from_physical(physical_key: PhysicalKey) -> Option<KeyToken> {
    let code = match physical_key {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(_) => return None,
    };

    let token = match code {
        // Modifiers
        WinitKeyCode::ControlLeft | WinitKeyCode::ControlRight => KeyToken::Ctrl,
        WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => KeyToken::Shift,
        WinitKeyCode::AltLeft | WinitKeyCode::AltRight => KeyToken::Alt,
        WinitKeyCode::SuperLeft | WinitKeyCode::SuperRight => KeyToken::Meta,

        // Letters
        WinitKeyCode::KeyA => KeyToken::Letter('A'),
        WinitKeyCode::KeyB => KeyToken::Letter('B'),
        WinitKeyCode::KeyC => KeyToken::Letter('C'),
        WinitKeyCode::KeyD => KeyToken::Letter('D'),
        WinitKeyCode::KeyE => KeyToken::Letter('E'),
        WinitKeyCode::KeyF => KeyToken::Letter('F'),
        WinitKeyCode::KeyG => KeyToken::Letter('G'),
        WinitKeyCode::KeyH => KeyToken::Letter('H'),
        WinitKeyCode::KeyI => KeyToken::Letter('I'),
        WinitKeyCode::KeyJ => KeyToken::Letter('J'),
        WinitKeyCode::KeyK => KeyToken::Letter('K'),
        WinitKeyCode::KeyL => KeyToken::Letter('L'),
        WinitKeyCode::KeyM => KeyToken::Letter('M'),
        WinitKeyCode::KeyN => KeyToken::Letter('N'),
        WinitKeyCode::KeyO => KeyToken::Letter('O'),
        WinitKeyCode::KeyP => KeyToken::Letter('P'),
        WinitKeyCode::KeyQ => KeyToken::Letter('Q'),
        WinitKeyCode::KeyR => KeyToken::Letter('R'),
        WinitKeyCode::KeyS => KeyToken::Letter('S'),
        WinitKeyCode::KeyT => KeyToken::Letter('T'),
        WinitKeyCode::KeyU => KeyToken::Letter('U'),
        WinitKeyCode::KeyV => KeyToken::Letter('V'),
        WinitKeyCode::KeyW => KeyToken::Letter('W'),
        WinitKeyCode::KeyX => KeyToken::Letter('X'),
        WinitKeyCode::KeyY => KeyToken::Letter('Y'),
        WinitKeyCode::KeyZ => KeyToken::Letter('Z'),

        // Top-row digits
        WinitKeyCode::Digit0 => KeyToken::Digit(0),
        WinitKeyCode::Digit1 => KeyToken::Digit(1),
        WinitKeyCode::Digit2 => KeyToken::Digit(2),
        WinitKeyCode::Digit3 => KeyToken::Digit(3),
        WinitKeyCode::Digit4 => KeyToken::Digit(4),
        WinitKeyCode::Digit5 => KeyToken::Digit(5),
        WinitKeyCode::Digit6 => KeyToken::Digit(6),
        WinitKeyCode::Digit7 => KeyToken::Digit(7),
        WinitKeyCode::Digit8 => KeyToken::Digit(8),
        WinitKeyCode::Digit9 => KeyToken::Digit(9),

        // Function keys
        WinitKeyCode::F1 => KeyToken::F(1),
        WinitKeyCode::F2 => KeyToken::F(2),
        WinitKeyCode::F3 => KeyToken::F(3),
        WinitKeyCode::F4 => KeyToken::F(4),
        WinitKeyCode::F5 => KeyToken::F(5),
        WinitKeyCode::F6 => KeyToken::F(6),
        WinitKeyCode::F7 => KeyToken::F(7),
        WinitKeyCode::F8 => KeyToken::F(8),
        WinitKeyCode::F9 => KeyToken::F(9),
        WinitKeyCode::F10 => KeyToken::F(10),
        WinitKeyCode::F11 => KeyToken::F(11),
        WinitKeyCode::F12 => KeyToken::F(12),
        WinitKeyCode::F13 => KeyToken::F(13),
        WinitKeyCode::F14 => KeyToken::F(14),
        WinitKeyCode::F15 => KeyToken::F(15),
        WinitKeyCode::F16 => KeyToken::F(16),
        WinitKeyCode::F17 => KeyToken::F(17),
        WinitKeyCode::F18 => KeyToken::F(18),
        WinitKeyCode::F19 => KeyToken::F(19),
        WinitKeyCode::F20 => KeyToken::F(20),
        WinitKeyCode::F21 => KeyToken::F(21),
        WinitKeyCode::F22 => KeyToken::F(22),
        WinitKeyCode::F23 => KeyToken::F(23),
        WinitKeyCode::F24 => KeyToken::F(24),

        // Numpad
        WinitKeyCode::Numpad0 => KeyToken::Numpad(0),
        WinitKeyCode::Numpad1 => KeyToken::Numpad(1),
        WinitKeyCode::Numpad2 => KeyToken::Numpad(2),
        WinitKeyCode::Numpad3 => KeyToken::Numpad(3),
        WinitKeyCode::Numpad4 => KeyToken::Numpad(4),
        WinitKeyCode::Numpad5 => KeyToken::Numpad(5),
        WinitKeyCode::Numpad6 => KeyToken::Numpad(6),
        WinitKeyCode::Numpad7 => KeyToken::Numpad(7),
        WinitKeyCode::Numpad8 => KeyToken::Numpad(8),
        WinitKeyCode::Numpad9 => KeyToken::Numpad(9),

        WinitKeyCode::Space => KeyToken::Space,
        WinitKeyCode::Enter => KeyToken::Enter,
        WinitKeyCode::Tab => KeyToken::Tab,
        WinitKeyCode::Escape => KeyToken::Escape,
        WinitKeyCode::Backspace => KeyToken::Backspace,
        WinitKeyCode::Delete => KeyToken::Delete,
        WinitKeyCode::Insert => KeyToken::Insert,
        WinitKeyCode::CapsLock => KeyToken::CapsLock,

        // Navigation
        WinitKeyCode::Home => KeyToken::Home,
        WinitKeyCode::End => KeyToken::End,
        WinitKeyCode::PageUp => KeyToken::PageUp,
        WinitKeyCode::PageDown => KeyToken::PageDown,
        WinitKeyCode::ArrowUp => KeyToken::Up,
        WinitKeyCode::ArrowDown => KeyToken::Down,
        WinitKeyCode::ArrowLeft => KeyToken::Left,
        WinitKeyCode::ArrowRight => KeyToken::Right,

        _ => return None,
    };

    Some(token)
}
