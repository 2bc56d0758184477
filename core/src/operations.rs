use log::{debug, trace};

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_START, GLYPH_HEIGHT,
};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::State;

// Every operation runs after the fetch has already moved pc past the instruction, so
// pc names the next instruction and a skip only has to hop over one more. Every write to pc
// is masked back into the 12-bit address space.

/// An instruction's effect on the machine.
pub type Operation = fn(op: Opcode, state: &mut State) -> Result<(), Fault>;

fn skip_if(condition: bool, state: &mut State) {
    if condition {
        state.pc = state.pc.wrapping_add(0x2) & ADDRESS_MASK;
    }
}

/// unmapped opcode; changes nothing
pub fn nop(op: Opcode, _state: &mut State) -> Result<(), Fault> {
    trace!("ignoring unmapped opcode {:?}", op);
    Ok(())
}

/// clear
pub fn clr(_op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: Opcode, state: &mut State) -> Result<(), Fault> {
    let pc = state.pc.wrapping_sub(0x2) & ADDRESS_MASK;
    state.pc = state.stack.pop().ok_or(Fault::StackUnderflow { pc })?;
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let target = op.addr();
    state
        .stack
        .push(state.pc)
        .map_err(|_| Fault::StackOverflow { target })?;
    state.pc = target;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(state.v[op.x()] == op.kk(), state);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(state.v[op.x()] != op.kk(), state);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(state.v[op.x()] == state.v[op.y()], state);
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Wraps on overflow; VF is untouched
pub fn add(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

// The flag-producing arithmetic below writes VF after Vx, so VF holds the flag
// even when it is also the destination.

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[FLAG] = u8::from(carry);
    Ok(())
}

/// Vx -= Vy; VF = Vx >= Vy
pub fn sub(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[FLAG] = u8::from(vx >= vy);
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[FLAG] = vx & 0x1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy >= Vx
pub fn subn(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[FLAG] = u8::from(vy >= vx);
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[FLAG] = vx >> 7;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(state.v[op.x()] != state.v[op.y()], state);
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.pc = (op.addr() + u16::from(state.v[0x0])) & ADDRESS_MASK;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] = state.random_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at I onto the FrameBuffer at (Vx, Vy), wrapping at the edges.
/// VF is set if any lit pixel was erased
pub fn draw(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let left = usize::from(state.v[op.x()]) % DISPLAY_WIDTH;
    let top = usize::from(state.v[op.y()]) % DISPLAY_HEIGHT;
    let mut collision = false;

    for row in 0..op.n() {
        let sprite = state.read(state.i.wrapping_add(u16::from(row)));
        let y = (top + usize::from(row)) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let pixel = &mut state.frame_buffer[y][(left + bit) % DISPLAY_WIDTH];
            collision |= *pixel == 1;
            *pixel ^= 1;
        }
    }

    state.v[FLAG] = u8::from(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(state.key_down(state.v[op.x()]), state);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State) -> Result<(), Fault> {
    skip_if(!state.key_down(state.v[op.x()]), state);
    Ok(())
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// Vx = first pressed key
/// With no key down the instruction is rewound and the machine parks until one is
pub fn keyd(op: Opcode, state: &mut State) -> Result<(), Fault> {
    match state.first_key_down() {
        Some(key) => state.v[op.x()] = key,
        None => {
            debug!("waiting for a key press into V{:X}", op.x());
            state.awaiting_key = Some(op.x());
            state.pc = state.pc.wrapping_sub(0x2) & ADDRESS_MASK;
        }
    }
    Ok(())
}

/// DT = Vx
pub fn loadd(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn loads(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    Ok(())
}

/// I = &FONT[Vx]
/// Only the low nibble of Vx names a glyph
pub fn ldspr(op: Opcode, state: &mut State) -> Result<(), Fault> {
    state.i = FONT_START + u16::from(state.v[op.x()] & 0xF) * GLYPH_HEIGHT;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: Opcode, state: &mut State) -> Result<(), Fault> {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in (0..).zip(digits) {
        state.write(state.i.wrapping_add(offset), digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State) -> Result<(), Fault> {
    for r in 0..=op.x() {
        state.write(state.i.wrapping_add(r as u16), state.v[r]);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State) -> Result<(), Fault> {
    for r in 0..=op.x() {
        state.v[r] = state.read(state.i.wrapping_add(r as u16));
    }
    Ok(())
}
