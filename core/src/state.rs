use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, KEY_COUNT, MEMORY_SIZE,
    PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};

/// The FrameBuffer is indexed as [y][x]; every cell is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The down/up status of each of the hexadecimal keys 0..F
pub type KeyMatrix = [bool; KEY_COUNT];

/// # Machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit index register used as a memory address
///
/// Counter
/// - (pc) a 16-bit program counter, advanced by 2 on every fetch
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per executed cycle
///
/// ## Memory
/// - 16 entry call stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the hexadecimal font
///     - 0x200.. holds the loaded program
/// - 32x64 frame buffer
///
/// ## Input
/// - the key matrix, written by the frontend and only ever read by instructions
/// - Fx0A parks the machine until a key is down, recording the register that receives it
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: KeyMatrix,
    pub awaiting_key: Option<usize>,
    rng: StdRng,
}

impl State {
    /// A freshly reset machine whose random number generator is seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A freshly reset machine with a reproducible random number generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keys: [false; KEY_COUNT],
            awaiting_key: None,
            rng,
        }
    }

    /// Reads a byte, wrapping the address into memory.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    /// Writes a byte, wrapping the address into memory.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = value;
    }

    /// Whether the key named by the low nibble of `key` is down.
    pub fn key_down(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xF)]
    }

    /// The lowest numbered key that is currently down.
    pub fn first_key_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }

    /// A uniformly distributed random byte.
    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Return addresses of the subroutines currently being executed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    addresses: [u16; STACK_DEPTH],
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stacked return addresses, always within `0..=STACK_DEPTH`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pushes `addr`, handing it back if the stack is already full.
    pub fn push(&mut self, addr: u16) -> Result<(), u16> {
        if self.depth == STACK_DEPTH {
            return Err(addr);
        }
        self.addresses[self.depth] = addr;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.depth = self.depth.checked_sub(1)?;
        Some(self.addresses[self.depth])
    }
}
