//! CHIP-8 interpreter core.
//!
//! Owns the full machine state (memory, framebuffer, keypad, registers,
//! stack, timers) and advances it one fetch-decode-execute cycle at a time.
//! Everything host-facing is injected: a [`Drawable`] renders the
//! framebuffer, an input adapter writes the [`Keypad`], and the driver
//! decides how fast [`Chip8::cycle`] gets called.

pub use chip8::{Chip8, Chip8Builder};
pub use error::Chip8Error;
pub use keypad::Keypad;
pub use memory::{Memory, MEMORY_SIZE, PROGRAM_OFFSET};
pub use video::{Drawable, Video, SCREEN_HEIGHT, SCREEN_WIDTH};

mod chip8;
mod error;
mod keypad;
mod memory;
mod video;
