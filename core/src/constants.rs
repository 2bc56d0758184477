/// Addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every memory address so accesses wrap around the address space.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded here and execution begins here.
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Maximum nesting of subroutine calls.
pub const STACK_DEPTH: usize = 16;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Index of VF, the carry/borrow/collision flag register.
pub const FLAG: usize = 0xF;

/// Instruction rate the frontend runs at unless told otherwise.
/// At 60Hz the timers, which tick once per instruction, decay at their canonical rate.
pub const DEFAULT_CLOCK_HZ: u32 = 60;

/// Start of the reserved region holding the hexadecimal font.
pub const FONT_START: u16 = 0x50;

/// Height in bytes of a single font glyph.
pub const GLYPH_HEIGHT: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
/// Only the high nibble of each row is lit, e.g. the glyph for `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
