use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input comes from a hexadecimal keypad, laid out here on the left
/// four columns of the keyboard.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
const KEYPAD: [(Keycode, u8); 16] = [
    (Keycode::Num1, 0x1),
    (Keycode::Num2, 0x2),
    (Keycode::Num3, 0x3),
    (Keycode::Num4, 0xC),
    (Keycode::Q, 0x4),
    (Keycode::W, 0x5),
    (Keycode::E, 0x6),
    (Keycode::R, 0xD),
    (Keycode::A, 0x7),
    (Keycode::S, 0x8),
    (Keycode::D, 0x9),
    (Keycode::F, 0xE),
    (Keycode::Z, 0xA),
    (Keycode::X, 0x0),
    (Keycode::C, 0xB),
    (Keycode::V, 0xF),
];

pub fn keymap(key: Keycode) -> Option<u8> {
    KEYPAD
        .iter()
        .find(|(keycode, _)| *keycode == key)
        .map(|&(_, value)| value)
}

/// Keys that drive the interpreter rather than the program.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Control {
    FastForward,
    Rewind,
    Pause,
    Step,
    Quit,
}

pub fn control(key: Keycode) -> Option<Control> {
    match key {
        Keycode::Space => Some(Control::FastForward),
        Keycode::Backspace => Some(Control::Rewind),
        Keycode::P => Some(Control::Pause),
        Keycode::N => Some(Control::Step),
        Keycode::Escape => Some(Control::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_the_keypad() {
        let mut keys: Vec<u8> = KEYPAD
            .iter()
            .filter_map(|&(key, _)| keymap(key))
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_controls_do_not_overlap_the_keypad() {
        for key in [Keycode::Space, Keycode::Backspace, Keycode::P, Keycode::N, Keycode::Escape] {
            assert!(control(key).is_some());
            assert_eq!(keymap(key), None);
        }
    }
}
