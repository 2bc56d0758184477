pub use chip8::Chip8;
pub use constants::DEFAULT_CLOCK_HZ;
pub use error::{Fault, LoadError};
pub use opcode::Opcode;
pub use state::{FrameBuffer, KeyMatrix, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
