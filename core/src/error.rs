use std::io;

use thiserror::Error;

use crate::constants::{MAX_ROM_SIZE, STACK_DEPTH};

/// Faults raised while executing an instruction.
///
/// These never escape `Chip8::cycle`; the cycle logs them and restarts program flow from
/// address 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow: call to {target:#05X} nested deeper than {max} subroutines", max = STACK_DEPTH)]
    StackOverflow { target: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}

/// Errors encountered while copying a ROM into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is {size} bytes but at most {max} fit in memory", max = MAX_ROM_SIZE)]
    RomTooLarge { size: usize },

    #[error("unable to read ROM")]
    Io(#[from] io::Error),
}
