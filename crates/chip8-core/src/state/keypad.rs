use crate::KeyError;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Key-down state of the 16-key hexadecimal pad.
///
/// Stored as a bitmask (bit `k` set = key `k` down) so a threaded host can
/// keep its copy in a single atomic or mutex and hand it over with
/// [`Keypad::from_mask`] between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Keypad {
    mask: u16,
}

impl Keypad {
    /// Builds a keypad from a key-down bitmask.
    #[must_use]
    pub const fn from_mask(mask: u16) -> Self {
        Self { mask }
    }

    /// Returns the key-down bitmask.
    #[must_use]
    pub const fn mask(self) -> u16 {
        self.mask
    }

    /// Marks `key` as pressed or released.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::KeyIndexOutOfRange`] when `key` is not `0x0..=0xF`.
    pub fn set(&mut self, key: u8, down: bool) -> Result<(), KeyError> {
        if usize::from(key) >= KEY_COUNT {
            return Err(KeyError::KeyIndexOutOfRange(key));
        }
        let bit = 1_u16 << key;
        if down {
            self.mask |= bit;
        } else {
            self.mask &= !bit;
        }
        Ok(())
    }

    /// Returns `true` when the key selected by the low nibble of `key` is down.
    #[must_use]
    pub const fn is_down(self, key: u8) -> bool {
        self.mask & (1 << (key & 0x0F)) != 0
    }

    /// Lowest-numbered key currently down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn first_down(self) -> Option<u8> {
        if self.mask == 0 {
            None
        } else {
            Some(self.mask.trailing_zeros() as u8)
        }
    }

    /// Releases every key.
    pub const fn release_all(&mut self) {
        self.mask = 0;
    }
}

/// Conventional host layout: the left 4×4 block of a QWERTY keyboard.
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub const LAYOUT: [(char, u8); KEY_COUNT] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xC),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xD),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xE),
    ('z', 0xA),
    ('x', 0x0),
    ('c', 0xB),
    ('v', 0xF),
];

/// Maps a host keyboard character onto a keypad index using [`LAYOUT`].
#[must_use]
pub fn key_for_layout_char(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    LAYOUT
        .iter()
        .find_map(|(host, key)| (*host == c).then_some(*key))
}

#[cfg(test)]
mod tests {
    use super::{key_for_layout_char, Keypad, KEY_COUNT, LAYOUT};
    use crate::KeyError;
    use std::collections::HashSet;

    #[test]
    fn keys_toggle_independently() {
        let mut keypad = Keypad::default();
        keypad.set(0x3, true).expect("valid key");
        keypad.set(0xF, true).expect("valid key");

        assert!(keypad.is_down(0x3));
        assert!(keypad.is_down(0xF));
        assert!(!keypad.is_down(0x4));
        assert_eq!(keypad.mask(), 0x8008);

        keypad.set(0x3, false).expect("valid key");
        assert!(!keypad.is_down(0x3));
        assert_eq!(keypad.first_down(), Some(0xF));
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        let mut keypad = Keypad::default();
        assert_eq!(
            keypad.set(0x10, true),
            Err(KeyError::KeyIndexOutOfRange(0x10))
        );
        assert_eq!(keypad, Keypad::default());
    }

    #[test]
    fn first_down_prefers_lowest_index() {
        assert_eq!(Keypad::default().first_down(), None);
        assert_eq!(Keypad::from_mask(0b1010_0000).first_down(), Some(5));
    }

    #[test]
    fn release_all_clears_mask() {
        let mut keypad = Keypad::from_mask(u16::MAX);
        keypad.release_all();
        assert_eq!(keypad.mask(), 0);
    }

    #[test]
    fn layout_covers_every_key_once() {
        let keys: HashSet<u8> = LAYOUT.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys.len(), KEY_COUNT);
        assert_eq!(key_for_layout_char('x'), Some(0x0));
        assert_eq!(key_for_layout_char('V'), Some(0xF));
        assert_eq!(key_for_layout_char('p'), None);
    }
}
