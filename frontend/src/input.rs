use sdl2::keyboard::Keycode;
use vm8_core::Keypad;

/// Maps a host key symbol to its CHIP-8 key value.
///
/// The hexadecimal keypad sits on the left of a QWERTY layout:
///
/// ```text
/// 1 2 3 C        1 2 3 4
/// 4 5 6 D   <-   Q W E R
/// 7 8 9 E        A S D F
/// A 0 B F        Z X C V
/// ```
pub fn map_key(keycode: Keycode) -> Option<u8> {
    match keycode {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        // QWERTZ keyboards swap Z and Y
        Keycode::Y => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

/// Applies a key event to the keypad. Returns `false` for keys outside the
/// CHIP-8 layout so the caller can route them to its own bindings.
pub fn handle_key(keypad: &mut Keypad, keycode: Keycode, pressed: bool) -> bool {
    match map_key(keycode) {
        Some(key) => {
            if pressed {
                keypad.press(key);
            } else {
                keypad.release(key);
            }

            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(Keycode::Num1), Some(0x1));
        assert_eq!(map_key(Keycode::V), Some(0xF));
        assert_eq!(map_key(Keycode::Z), map_key(Keycode::Y));
        assert_eq!(map_key(Keycode::P), None);
    }

    #[test]
    fn test_handle_key_press_and_release() {
        let mut keypad = Keypad::new();

        assert!(handle_key(&mut keypad, Keycode::Q, true));
        assert!(keypad.is_pressed(0x4));

        assert!(handle_key(&mut keypad, Keycode::Q, false));
        assert!(!keypad.is_pressed(0x4));
    }

    #[test]
    fn test_handle_key_unmapped() {
        let mut keypad = Keypad::new();

        assert!(!handle_key(&mut keypad, Keycode::Escape, true));
        assert_eq!(keypad.first_pressed(), None);
    }
}
