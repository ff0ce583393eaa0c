/// Errors that can escape the interpreter core.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    /// The fetched 16-bit word matches none of the 35 defined opcodes.
    /// Fatal to the run; the driver is expected to halt.
    #[error("invalid opcode {opcode:#06X}")]
    InvalidOpcode { opcode: u16 },

    /// The program does not fit between the program offset and the end of
    /// addressable memory. Surfaced before any cycle runs.
    #[error("program is too large ({size} bytes), capacity is {capacity} bytes")]
    ProgramTooLarge { size: usize, capacity: usize },
}
