use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_ADDR, FONT_GLYPH_SIZE};
use crate::error::RangeError;
use crate::instruction::Instruction;
use crate::registers::Register;
use crate::state::State;

/// Where the program counter goes once an instruction has been executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Next {
    /// pc += 2
    Advance,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc stays put and the same instruction runs again next step
    Wait,
}

impl Next {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Next::Skip
        } else {
            Next::Advance
        }
    }
}

/// Apply `instruction` to `state`, returning what should happen to the pc.
///
/// `state` may be partially modified when an error is returned, so callers
/// should execute against a copy.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    rng: &mut dyn RngCore,
) -> Result<Next, RangeError> {
    use Instruction::*;

    let next = match instruction {
        Clear => clr(state),
        Return => rts(state)?,
        Jump { addr } => Next::Jump(addr),
        Call { addr } => call(addr, state)?,
        SkipEqByte { x, kk } => Next::skip_if(state.registers[x] == kk),
        SkipNeByte { x, kk } => Next::skip_if(state.registers[x] != kk),
        SkipEqReg { x, y } => Next::skip_if(state.registers[x] == state.registers[y]),
        SkipNeReg { x, y } => Next::skip_if(state.registers[x] != state.registers[y]),
        LoadByte { x, kk } => load(x, kk, state),
        AddByte { x, kk } => add(x, kk, state),
        Move { x, y } => mv(x, y, state),
        Or { x, y } => alu(x, y, state, |a, b| a | b),
        And { x, y } => alu(x, y, state, |a, b| a & b),
        Xor { x, y } => alu(x, y, state, |a, b| a ^ b),
        AddReg { x, y } => addr(x, y, state),
        Sub { x, y } => sub(x, y, state),
        SubN { x, y } => subn(x, y, state),
        ShiftRight { x, .. } => shr(x, state),
        ShiftLeft { x, .. } => shl(x, state),
        LoadI { addr } => loadi(addr, state),
        JumpV0 { addr } => Next::Jump(u16::from(state.registers[Register::V0]) + addr),
        Random { x, kk } => rand(x, kk, state, rng),
        Draw { x, y, n } => draw(x, y, n, state)?,
        SkipPressed { x } => Next::skip_if(state.keys.is_held(state.registers[x])),
        SkipNotPressed { x } => Next::skip_if(!state.keys.is_held(state.registers[x])),
        ReadDelay { x } => moved(x, state),
        WaitKey { x } => keyd(x, state),
        SetDelay { x } => loads(x, state),
        SetSound { x } => ld(x, state),
        AddI { x } => addi(x, state),
        LoadFont { x } => ldspr(x, state),
        Bcd { x } => bcd(x, state)?,
        Store { x } => stor(x, state)?,
        Read { x } => read(x, state)?,
    };
    Ok(next)
}

/// clear
fn clr(state: &mut State) -> Next {
    state.frame_buffer.clear();
    Next::Advance
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<Next, RangeError> {
    Ok(Next::Jump(state.registers.stack.pop()?))
}

/// STACK.push(PC + 2); PC = addr
fn call(addr: u16, state: &mut State) -> Result<Next, RangeError> {
    let registers = &mut state.registers;
    registers.stack.push(registers.pc.wrapping_add(2))?;
    Ok(Next::Jump(addr))
}

/// Vx = kk
fn load(x: Register, kk: u8, state: &mut State) -> Next {
    state.registers[x] = kk;
    Next::Advance
}

/// Vx += kk
/// Overflow wraps and the flag is left alone
fn add(x: Register, kk: u8, state: &mut State) -> Next {
    state.registers[x] = state.registers[x].wrapping_add(kk);
    Next::Advance
}

/// Vx = Vy
fn mv(x: Register, y: Register, state: &mut State) -> Next {
    state.registers[x] = state.registers[y];
    Next::Advance
}

/// Vx = Vx op Vy, for the bitwise operations that leave VF alone
fn alu(x: Register, y: Register, state: &mut State, op: fn(u8, u8) -> u8) -> Next {
    state.registers[x] = op(state.registers[x], state.registers[y]);
    Next::Advance
}

/// Vx += Vy; VF = carry
fn addr(x: Register, y: Register, state: &mut State) -> Next {
    let (res, carry) = state.registers[x].overflowing_add(state.registers[y]);
    state.registers[x] = res;
    state.registers.set_flag(carry);
    Next::Advance
}

/// VF = Vx >= Vy; Vx -= Vy
fn sub(x: Register, y: Register, state: &mut State) -> Next {
    let (vx, vy) = (state.registers[x], state.registers[y]);
    state.registers.set_flag(vx >= vy);
    state.registers[x] = vx.wrapping_sub(vy);
    Next::Advance
}

/// VF = Vy >= Vx; Vx = Vy - Vx
fn subn(x: Register, y: Register, state: &mut State) -> Next {
    let (vx, vy) = (state.registers[x], state.registers[y]);
    state.registers.set_flag(vy >= vx);
    state.registers[x] = vy.wrapping_sub(vx);
    Next::Advance
}

/// VF = lsb(Vx); Vx >>= 1
fn shr(x: Register, state: &mut State) -> Next {
    let vx = state.registers[x];
    state.registers.set_flag(vx & 0x01 != 0);
    state.registers[x] = vx >> 1;
    Next::Advance
}

/// VF = msb(Vx); Vx <<= 1
fn shl(x: Register, state: &mut State) -> Next {
    let vx = state.registers[x];
    state.registers.set_flag(vx & 0x80 != 0);
    state.registers[x] = vx << 1;
    Next::Advance
}

/// I = addr
fn loadi(addr: u16, state: &mut State) -> Next {
    state.registers.i = addr;
    Next::Advance
}

/// Vx = rand_byte & kk
fn rand(x: Register, kk: u8, state: &mut State, rng: &mut dyn RngCore) -> Next {
    let rand_byte: u8 = rng.gen();
    state.registers[x] = rand_byte & kk;
    Next::Advance
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at memory I..I+n onto the frame buffer at Vx, Vy with wrapping.
/// VF = whether any pixel was erased
fn draw(x: Register, y: Register, n: u8, state: &mut State) -> Result<Next, RangeError> {
    let origin_x = usize::from(state.registers[x]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.registers[y]) % DISPLAY_HEIGHT;
    let sprite = state
        .memory
        .slice(usize::from(state.registers.i), usize::from(n))?;
    let collision = state.frame_buffer.draw(origin_x, origin_y, sprite);
    state.registers.set_flag(collision);
    Ok(Next::Advance)
}

/// Vx = DT
fn moved(x: Register, state: &mut State) -> Next {
    state.registers[x] = state.timers.delay.get();
    Next::Advance
}

/// Vx = most recently pressed key, or wait until there is one
fn keyd(x: Register, state: &mut State) -> Next {
    match state.keys.take_latest() {
        Some(key) => {
            state.registers[x] = key;
            Next::Advance
        }
        None => Next::Wait,
    }
}

/// DT = Vx
fn loads(x: Register, state: &mut State) -> Next {
    state.timers.delay.set(state.registers[x]);
    Next::Advance
}

/// ST = Vx
fn ld(x: Register, state: &mut State) -> Next {
    state.timers.sound.set(state.registers[x]);
    Next::Advance
}

/// I += Vx
fn addi(x: Register, state: &mut State) -> Next {
    let registers = &mut state.registers;
    registers.i = registers.i.saturating_add(u16::from(registers[x]));
    Next::Advance
}

/// I = address of the font glyph for the low nibble of Vx
fn ldspr(x: Register, state: &mut State) -> Next {
    let digit = u16::from(state.registers[x] & 0x0F);
    state.registers.i = FONT_ADDR + digit * FONT_GLYPH_SIZE;
    Next::Advance
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(x: Register, state: &mut State) -> Result<Next, RangeError> {
    let vx = state.registers[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .memory
        .write(usize::from(state.registers.i), &digits)?;
    Ok(Next::Advance)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(x: Register, state: &mut State) -> Result<Next, RangeError> {
    let registers = &state.registers;
    state
        .memory
        .write(usize::from(registers.i), &registers.v[..=x.index()])?;
    Ok(Next::Advance)
}

/// V0..=Vx = mem[I..=I+x]
fn read(x: Register, state: &mut State) -> Result<Next, RangeError> {
    let bytes = state
        .memory
        .slice(usize::from(state.registers.i), x.index() + 1)?;
    state.registers.v[..=x.index()].copy_from_slice(bytes);
    Ok(Next::Advance)
}
