use std::fmt;

/// # Opcodes
///
/// A 16-bit instruction word, fetched high byte first. Dispatch is keyed on:
/// - `[f___]` the family, which alone identifies 12 of the 16 instruction groups
/// - `[___n]` the variant within family `8`
/// - `[__kk]` the variant within families `0`, `E` and `F`
///
/// The remaining nibbles carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate assigned to or compared with Vx
/// - `[_x__]` the register Vx, or the upper bound of the range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height in rows
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combines two consecutive bytes of memory into an instruction word.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// `[f___]`
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// `[_x__]` as a register index
    pub fn x(self) -> usize {
        usize::from((self.0 >> 8) & 0xF)
    }

    /// `[__y_]` as a register index
    pub fn y(self) -> usize {
        usize::from((self.0 >> 4) & 0xF)
    }

    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// `[_nnn]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
