use crate::opcode::Opcode;
use crate::operations::*;

/// Selects the Operation for a given Opcode
///
/// The family nibble picks the operation directly, except for families `0`, `8`, `E` and `F`
/// which each have their own second level keyed on part of the low byte. Anything left
/// unmapped at either level decodes to `nop`.
pub fn from_op(op: Opcode) -> Operation {
    match op.family() {
        0x0 => family_0(op.kk()),
        0x1 => jump,
        0x2 => call,
        0x3 => ske,
        0x4 => skne,
        0x5 => skre,
        0x6 => load,
        0x7 => add,
        0x8 => family_8(op.n()),
        0x9 => skrne,
        0xA => loadi,
        0xB => jumpi,
        0xC => rnd,
        0xD => draw,
        0xE => family_e(op.kk()),
        0xF => family_f(op.kk()),
        _ => nop,
    }
}

/// `00kk`
fn family_0(kk: u8) -> Operation {
    match kk {
        0xE0 => clr,
        0xEE => rts,
        _ => nop,
    }
}

/// `8xyn`
fn family_8(n: u8) -> Operation {
    match n {
        0x0 => mv,
        0x1 => or,
        0x2 => and,
        0x3 => xor,
        0x4 => addr,
        0x5 => sub,
        0x6 => shr,
        0x7 => subn,
        0xE => shl,
        _ => nop,
    }
}

/// `Exkk`
fn family_e(kk: u8) -> Operation {
    match kk {
        0x9E => skpr,
        0xA1 => skup,
        _ => nop,
    }
}

/// `Fxkk`
fn family_f(kk: u8) -> Operation {
    match kk {
        0x07 => moved,
        0x0A => keyd,
        0x15 => loadd,
        0x18 => loads,
        0x1E => addi,
        0x29 => ldspr,
        0x33 => bcd,
        0x55 => stor,
        0x65 => read,
        _ => nop,
    }
}
