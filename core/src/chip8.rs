use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::memory::{Memory, PROGRAM_OFFSET};
use crate::video::Video;

const REGISTER_COUNT: usize = 16;
const STACK_SIZE: usize = 16;

/// Timers run at an eighth of the cycle rate. The cycle rate itself is the
/// driver's responsibility; the core never looks at the clock.
const CYCLES_PER_TIMER_TICK: u64 = 8;

/// Configures and builds a [`Chip8`] machine.
#[derive(Debug)]
pub struct Chip8Builder {
    /// Program bytes, loaded at the program offset
    program: Option<Vec<u8>>,
    /// PRNG seed
    rng_seed: Option<u64>,
}

/// The interpreter core: registers, stack, timers and the owned
/// memory/framebuffer/keypad, advanced one fetch-decode-execute cycle at a
/// time via [`Chip8::cycle`].
pub struct Chip8 {
    memory: Memory,
    video: Video,
    keypad: Keypad,

    /// General purpose registers V0-VF
    regs: [u8; REGISTER_COUNT],
    /// Subroutine return addresses
    stack: [u16; STACK_SIZE],

    /// Program counter
    pc: u16,
    /// Stack pointer
    sp: u16,
    /// Index register
    index: u16,

    delay_timer: u8,
    sound_timer: u8,

    paused: bool,
    should_draw: bool,
    should_beep: bool,
    ticks: u64,

    rng: StdRng,
}

impl Chip8Builder {
    pub fn new() -> Chip8Builder {
        Chip8Builder {
            program: None,
            rng_seed: None,
        }
    }

    pub fn with_program(mut self, program: Vec<u8>) -> Self {
        self.program = Some(program);
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Builds a freshly reset machine with the program (if any) loaded.
    pub fn build(self) -> Result<Chip8, Chip8Error> {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut chip8 = Chip8 {
            memory: Memory::new(),
            video: Video::new(),
            keypad: Keypad::new(),
            regs: [0; REGISTER_COUNT],
            stack: [0; STACK_SIZE],
            pc: PROGRAM_OFFSET,
            sp: 0,
            index: 0,
            delay_timer: 0,
            sound_timer: 0,
            paused: false,
            should_draw: true,
            should_beep: false,
            ticks: 0,
            rng,
        };

        if let Some(program) = &self.program {
            chip8.load_program(program)?;
        }

        Ok(chip8)
    }
}

impl Default for Chip8Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8 {
    /// Restores the initial state: program counter at the program offset,
    /// registers/stack/timers zeroed, framebuffer cleared, and the
    /// new-frame flag raised so the first frame always renders. The loaded
    /// program is wiped along with the rest of the program region; the
    /// keypad belongs to the input adapter and is left alone.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.video.reset();

        self.regs = [0; REGISTER_COUNT];
        self.stack = [0; STACK_SIZE];

        self.pc = PROGRAM_OFFSET;
        self.sp = 0;
        self.index = 0;

        self.delay_timer = 0;
        self.sound_timer = 0;

        self.paused = false;
        self.should_draw = true;
        self.should_beep = false;
        self.ticks = 0;

        log::debug!("machine reset");
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load_program(program)
    }

    /// Runs one fetch-decode-execute cycle. While paused this is a no-op,
    /// not a skipped opcode. Every eighth cycle the timers tick; a sound
    /// timer expiring raises the beep signal.
    pub fn cycle(&mut self) -> Result<(), Chip8Error> {
        if self.paused {
            return Ok(());
        }

        let opcode = self.memory.read_word(self.pc);
        log::trace!("pc={:#06X} opcode={:#06X}", self.pc, opcode);
        self.execute(opcode)?;

        if self.ticks % CYCLES_PER_TIMER_TICK == 0 {
            self.tick_timers();
        }

        self.ticks += 1;
        Ok(())
    }

    /// Reports whether a new frame is ready and clears the flag.
    pub fn should_draw(&mut self) -> bool {
        let should_draw = self.should_draw;
        self.should_draw = false;
        should_draw
    }

    /// Reports whether the sound timer just expired and clears the signal.
    pub fn should_beep(&mut self) -> bool {
        let should_beep = self.should_beep;
        self.should_beep = false;
        should_beep
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    pub fn video(&self) -> &Video {
        &self.video
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    /// Decodes and executes a single opcode. Each arm advances the program
    /// counter itself: by 2 for a plain instruction, by 4 to skip the next
    /// one, or by jumping outright. Control-flow opcodes must not take a
    /// default increment, so there is none.
    fn execute(&mut self, opcode: u16) -> Result<(), Chip8Error> {
        let nibbles = (
            ((opcode & 0xF000) >> 12) as u8,
            ((opcode & 0x0F00) >> 8) as u8,
            ((opcode & 0x00F0) >> 4) as u8,
            (opcode & 0x000F) as u8,
        );

        let nnn = opcode & 0x0FFF;
        let kk = (opcode & 0x00FF) as u8;
        let x = nibbles.1 as usize;
        let y = nibbles.2 as usize;
        let n = nibbles.3;

        match nibbles {
            // 00E0: clear the framebuffer
            (0x0, 0x0, 0xE, 0x0) => {
                self.video.reset();
                self.should_draw = true;
                self.pc += 2;
            }
            // 00EE: return from subroutine
            (0x0, 0x0, 0xE, 0xE) => {
                self.sp -= 1;
                self.pc = self.stack[self.sp as usize] + 2;
            }
            // 1NNN: jump to NNN
            (0x1, _, _, _) => {
                self.pc = nnn;
            }
            // 2NNN: call subroutine at NNN
            (0x2, _, _, _) => {
                self.stack[self.sp as usize] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            // 3XKK: skip next instruction if VX == KK
            (0x3, _, _, _) => {
                self.pc += if self.regs[x] == kk { 4 } else { 2 };
            }
            // 4XKK: skip next instruction if VX != KK
            (0x4, _, _, _) => {
                self.pc += if self.regs[x] != kk { 4 } else { 2 };
            }
            // 5XY0: skip next instruction if VX == VY
            (0x5, _, _, 0x0) => {
                self.pc += if self.regs[x] == self.regs[y] { 4 } else { 2 };
            }
            // 6XKK: VX = KK
            (0x6, _, _, _) => {
                self.regs[x] = kk;
                self.pc += 2;
            }
            // 7XKK: VX += KK, wrapping, carry flag untouched
            (0x7, _, _, _) => {
                self.regs[x] = self.regs[x].wrapping_add(kk);
                self.pc += 2;
            }
            // 8XY0: VX = VY
            (0x8, _, _, 0x0) => {
                self.regs[x] = self.regs[y];
                self.pc += 2;
            }
            // 8XY1: VX |= VY
            (0x8, _, _, 0x1) => {
                self.regs[x] |= self.regs[y];
                self.pc += 2;
            }
            // 8XY2: VX &= VY
            (0x8, _, _, 0x2) => {
                self.regs[x] &= self.regs[y];
                self.pc += 2;
            }
            // 8XY3: VX ^= VY
            (0x8, _, _, 0x3) => {
                self.regs[x] ^= self.regs[y];
                self.pc += 2;
            }
            // 8XY4: VX += VY, VF = carry
            (0x8, _, _, 0x4) => {
                let (sum, carry) = self.regs[x].overflowing_add(self.regs[y]);
                self.regs[x] = sum;
                self.regs[0xF] = carry as u8;
                self.pc += 2;
            }
            // 8XY5: VX -= VY, VF = no borrow
            (0x8, _, _, 0x5) => {
                let (diff, borrow) = self.regs[x].overflowing_sub(self.regs[y]);
                self.regs[x] = diff;
                self.regs[0xF] = !borrow as u8;
                self.pc += 2;
            }
            // 8XY6: VX >>= 1, VF = shifted-out bit
            (0x8, _, _, 0x6) => {
                let bit = self.regs[x] & 0x1;
                self.regs[x] >>= 1;
                self.regs[0xF] = bit;
                self.pc += 2;
            }
            // 8XY7: VX = VY - VX, VF = no borrow
            (0x8, _, _, 0x7) => {
                let (diff, borrow) = self.regs[y].overflowing_sub(self.regs[x]);
                self.regs[x] = diff;
                self.regs[0xF] = !borrow as u8;
                self.pc += 2;
            }
            // 8XYE: VX <<= 1, VF = shifted-out bit
            (0x8, _, _, 0xE) => {
                let bit = self.regs[x] >> 7;
                self.regs[x] <<= 1;
                self.regs[0xF] = bit;
                self.pc += 2;
            }
            // 9XY0: skip next instruction if VX != VY
            (0x9, _, _, 0x0) => {
                self.pc += if self.regs[x] != self.regs[y] { 4 } else { 2 };
            }
            // ANNN: I = NNN
            (0xA, _, _, _) => {
                self.index = nnn;
                self.pc += 2;
            }
            // BNNN: jump to NNN + V0
            (0xB, _, _, _) => {
                self.pc = nnn + self.regs[0x0] as u16;
            }
            // CXKK: VX = random byte AND KK
            (0xC, _, _, _) => {
                self.regs[x] = self.rng.next_u32() as u8 & kk;
                self.pc += 2;
            }
            // DXYN: draw the N-byte sprite at I to (VX, VY) by XOR,
            // VF = collision. Off-screen pixels clip silently.
            (0xD, _, _, _) => {
                self.regs[0xF] = 0;

                for row in 0..n {
                    let sprite = self.memory.read_byte(self.index + row as u16);

                    for column in 0..8u8 {
                        if sprite & (0x80 >> column) != 0 {
                            let px = self.regs[x].wrapping_add(column);
                            let py = self.regs[y].wrapping_add(row);

                            if self.video.read(px, py) {
                                self.regs[0xF] = 1;
                            }

                            self.video.invert(px, py);
                        }
                    }
                }

                self.should_draw = true;
                self.pc += 2;
            }
            // EX9E: skip next instruction if key VX is pressed
            (0xE, _, 0x9, 0xE) => {
                self.pc += if self.keypad.is_pressed(self.regs[x]) { 4 } else { 2 };
            }
            // EXA1: skip next instruction if key VX is not pressed
            (0xE, _, 0xA, 0x1) => {
                self.pc += if self.keypad.is_pressed(self.regs[x]) { 2 } else { 4 };
            }
            // FX07: VX = delay timer
            (0xF, _, 0x0, 0x7) => {
                self.regs[x] = self.delay_timer;
                self.pc += 2;
            }
            // FX0A: wait for a key press. While nothing is pressed the
            // program counter stays put, so the opcode repeats cycle over
            // cycle until a pressed key is observed.
            (0xF, _, 0x0, 0xA) => {
                if let Some(key) = self.keypad.first_pressed() {
                    self.regs[x] = key;
                    self.pc += 2;
                }
            }
            // FX15: delay timer = VX
            (0xF, _, 0x1, 0x5) => {
                self.delay_timer = self.regs[x];
                self.pc += 2;
            }
            // FX18: sound timer = VX
            (0xF, _, 0x1, 0x8) => {
                self.sound_timer = self.regs[x];
                self.pc += 2;
            }
            // FX1E: I += VX, VF = 1 on overflow past 0xFFF
            (0xF, _, 0x1, 0xE) => {
                let sum = self.index + self.regs[x] as u16;
                self.regs[0xF] = (sum > 0x0FFF) as u8;
                self.index = sum;
                self.pc += 2;
            }
            // FX29: I = address of the glyph sprite for digit VX
            (0xF, _, 0x2, 0x9) => {
                self.index = self.regs[x] as u16 * 0x5;
                self.pc += 2;
            }
            // FX33: store VX as three BCD digits at I, I+1, I+2
            (0xF, _, 0x3, 0x3) => {
                let value = self.regs[x];
                self.memory.write_byte(self.index, value / 100);
                self.memory.write_byte(self.index + 1, value % 100 / 10);
                self.memory.write_byte(self.index + 2, value % 10);
                self.pc += 2;
            }
            // FX55: store V0..=VX at I, leaving I past the written range
            (0xF, _, 0x5, 0x5) => {
                for i in 0..=x as u16 {
                    self.memory.write_byte(self.index + i, self.regs[i as usize]);
                }

                self.index += x as u16 + 1;
                self.pc += 2;
            }
            // FX65: load V0..=VX from I, leaving I past the read range
            (0xF, _, 0x6, 0x5) => {
                for i in 0..=x as u16 {
                    self.regs[i as usize] = self.memory.read_byte(self.index + i);
                }

                self.index += x as u16 + 1;
                self.pc += 2;
            }
            _ => return Err(Chip8Error::InvalidOpcode { opcode }),
        }

        Ok(())
    }

    fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer > 0 {
            if self.sound_timer == 1 {
                self.should_beep = true;
            }

            self.sound_timer -= 1;
        }
    }
}
