use bitflags::bitflags;

use crate::key::Key;

bitflags! {
    /// Logical buttons currently held. The raw bits are the value handed across
    /// the tick ABI, so the layout is fixed.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ButtonMask: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const SELECT = 1 << 4;
        const START = 1 << 5;
        const A = 1 << 6;
        const B = 1 << 7;
    }
}

impl ButtonMask {
    /// Fixed key binding. Returns `None` for keys with no logical button.
    pub fn for_key(key: Key) -> Option<ButtonMask> {
        match key {
            Key::Left => Some(ButtonMask::LEFT),
            Key::Right => Some(ButtonMask::RIGHT),
            Key::Up => Some(ButtonMask::UP),
            Key::Down => Some(ButtonMask::DOWN),
            Key::Num1 => Some(ButtonMask::START),
            Key::Num2 => Some(ButtonMask::SELECT),
            Key::A => Some(ButtonMask::A),
            Key::B => Some(ButtonMask::B),
            Key::Escape | Key::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_bit_layout() {
        assert_eq!(ButtonMask::LEFT.bits(), 0b0000_0001);
        assert_eq!(ButtonMask::RIGHT.bits(), 0b0000_0010);
        assert_eq!(ButtonMask::SELECT.bits(), 0b0001_0000);
        assert_eq!(ButtonMask::START.bits(), 0b0010_0000);
        assert_eq!(ButtonMask::B.bits(), 0b1000_0000);
        assert_eq!(ButtonMask::all().bits(), 0xff);
    }

    #[test]
    fn start_and_select_map_to_number_row() {
        assert_eq!(ButtonMask::for_key(Key::Num1), Some(ButtonMask::START));
        assert_eq!(ButtonMask::for_key(Key::Num2), Some(ButtonMask::SELECT));
    }

    #[test]
    fn escape_and_unknown_keys_are_unmapped() {
        assert_eq!(ButtonMask::for_key(Key::Escape), None);
        assert_eq!(ButtonMask::for_key(Key::None), None);
    }
}
