pub const KEY_COUNT: usize = 16;

/// State table for the 16-key input device, indexed by CHIP-8 key value
/// 0x0-0xF. The host input adapter owns the writes; the engine only reads.
pub struct Keypad {
    keys: [u8; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: [0; KEY_COUNT],
        }
    }

    pub fn press(&mut self, key: u8) {
        self.keys[key as usize] = 0x1;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[key as usize] = 0x0;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[key as usize] == 0x1
    }

    /// Lowest pressed key code, if any. Scan order 0x0-0xF.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&key| key == 0x1).map(|i| i as u8)
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
