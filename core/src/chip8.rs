use std::io::Read;

use log::{debug, trace, warn};

use crate::constants::{ADDRESS_MASK, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::LoadError;
use crate::instruction::from_op;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, KeyMatrix, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns the machine `state` and supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the machine one instruction at a time
/// - inspecting its frame buffer for rendering by some display
///
/// Pacing is left to the caller: every call to `cycle` executes exactly one instruction and
/// ticks both timers once.
pub struct Chip8 {
    state: State,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
        }
    }

    /// A machine whose random numbers are reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            state: State::with_seed(seed),
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader over the raw bytes of a ROM
    ///
    /// Reads at most one byte past the largest ROM that fits, so an oversized or endless
    /// source is rejected without being drained.
    pub fn load_rom<R: Read>(&mut self, reader: R) -> Result<usize, LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE + 1);
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_bytes(&rom)
    }

    /// Copy a rom into memory at the program start address, returning its size
    pub fn load_bytes(&mut self, rom: &[u8]) -> Result<usize, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge { size: rom.len() });
        }
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// The current contents of the display
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it has been drawn to since the last call
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::take(&mut self.state.draw_flag) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keys[usize::from(key & 0xF)] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keys[usize::from(key & 0xF)] = false;
    }

    /// Replace the status of every key at once
    pub fn set_keys(&mut self, keys: KeyMatrix) {
        self.state.keys = keys;
    }

    /// Whether the sound timer is running
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The register waiting to receive the next key press, if any
    pub fn awaiting_key(&self) -> Option<u8> {
        self.state.awaiting_key.map(|register| register as u8)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advances the machine by a single cycle
    /// - while awaiting a keypress, polls the keys instead of fetching
    /// - otherwise gets and executes the next opcode
    /// - decrements both timers
    pub fn cycle(&mut self) {
        match self.state.awaiting_key {
            Some(register) => self.poll_key(register),
            None => self.step(),
        }
        self.advance_timers();
    }

    fn step(&mut self) {
        let op = self.get_op();
        trace!(
            "{:?} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        if let Err(fault) = from_op(op)(op, &mut self.state) {
            warn!("{}; restarting from address 0", fault);
            self.state.pc = 0;
        }
    }

    /// Completes a parked Fx0A once any key is down, moving pc past it
    fn poll_key(&mut self, register: usize) {
        if let Some(key) = self.state.first_key_down() {
            debug!("key {:X} pressed into V{:X}", key, register);
            self.state.v[register] = key;
            self.state.awaiting_key = None;
            self.state.pc = self.state.pc.wrapping_add(0x2) & ADDRESS_MASK;
        }
    }

    fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Gets the opcode currently pointed at by the pc and moves the pc past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&mut self) -> Opcode {
        let pc = self.state.pc;
        let op = Opcode::from_bytes(self.state.read(pc), self.state.read(pc.wrapping_add(1)));
        self.state.pc = pc.wrapping_add(0x2) & ADDRESS_MASK;
        op
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
