use std::collections::VecDeque;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::MAX_SAVED_STATES;
use crate::error::{Chip8Error, LoadError};
use crate::frame_buffer::FrameBuffer;
use crate::input::KeyPoll;
use crate::instruction::Instruction;
use crate::operations::{execute, Next};
use crate::state::{RegisterDump, State};

/// What a call to `step` did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// The instruction ran and the program counter moved on.
    Executed(Instruction),
    /// A key wait found no pending key press; the same instruction runs again next step.
    AwaitingKey,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the random source used by `RND`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping and rewinding the CPU
/// - decaying its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R = StdRng> {
    state: State,
    previous_states: VecDeque<State>,
    max_saved_states: usize,
    rng: R,
    loaded: bool,
}

impl Chip8 {
    /// A Chip-8 whose random numbers come from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Chip8<R> {
    pub fn with_rng(rng: R) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::new(),
            max_saved_states: MAX_SAVED_STATES,
            rng,
            loaded: false,
        }
    }

    /// How many previous states to keep for `rewind`; 0 turns rewinding off.
    pub fn with_history(mut self, max_saved_states: usize) -> Self {
        self.max_saved_states = max_saved_states;
        self.previous_states.truncate(max_saved_states);
        self
    }

    /// Copy a program image into memory at the load base.
    ///
    /// Can only be done once; build a new Chip8 to run something else.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded.into());
        }
        self.state.memory.load(program)?;
        self.loaded = true;
        Ok(())
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// Either the whole instruction takes effect or, on error, nothing does.
    pub fn step(&mut self) -> Result<Step, Chip8Error> {
        let pc = self.state.registers.pc;
        let op = self.state.memory.word(usize::from(pc))?;
        let instruction = Instruction::decode(&op)?;
        trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            u16::from_be_bytes(op),
            instruction.to_string(),
            self.state.registers.v,
            self.state.registers.i,
            pc
        );

        let mut next_state = self.state;
        let next = execute(instruction, &mut next_state, &mut self.rng)?;
        next_state.registers.pc = match next {
            Next::Advance => pc.wrapping_add(2),
            Next::Skip => pc.wrapping_add(4),
            Next::Jump(addr) => addr,
            Next::Wait => {
                debug!("waiting for a key press at {:04X}", pc);
                return Ok(Step::AwaitingKey);
            }
        };

        self.save_state();
        self.state = next_state;
        Ok(Step::Executed(instruction))
    }

    /// Restores the state from before the last executed instruction, if there is one.
    ///
    /// The keypad is live hardware and is not rewound.
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                let keys = self.state.keys;
                self.state = state;
                self.state.keys = keys;
                true
            }
            None => false,
        }
    }

    /// Decrement both timers once. Called at 60Hz.
    pub fn decay_timers(&mut self) {
        self.state.timers.decay();
    }

    /// Whether the beeper should be sounding.
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound.get() > 0
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keys.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keys.release(key);
    }

    /// Take in everything an input collaborator saw since its last poll.
    pub fn update_keys(&mut self, poll: &KeyPoll) {
        self.state.keys.update(poll);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> RegisterDump {
        self.state.dump()
    }

    /// Puts the current state in previous_states
    /// - if there are already `max_saved_states` saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.max_saved_states == 0 {
            return;
        }
        if self.previous_states.len() == self.max_saved_states {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE};
    use crate::error::RangeError;
    use rand::rngs::mock::StepRng;

    fn chip8(program: &[u8]) -> Chip8<StepRng> {
        let mut chip8 = Chip8::with_rng(StepRng::new(0x5A, 0));
        chip8.load(program).unwrap();
        chip8
    }

    #[test]
    fn test_steps_and_advances() {
        let mut chip8 = chip8(&[0x00, 0xE0]);
        assert_eq!(chip8.step(), Ok(Step::Executed(Instruction::Clear)));
        assert_eq!(chip8.registers().pc, 0x202);
    }

    #[test]
    fn test_jump_sets_pc_exactly() {
        let mut chip8 = chip8(&[0x12, 0x28]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x228);
    }

    #[test]
    fn test_call_then_return() {
        // 0x200 CALL #206; 0x202 LD V0, #01; 0x204 JP #204; 0x206 RET
        let mut chip8 = chip8(&[0x22, 0x06, 0x60, 0x01, 0x12, 0x04, 0x00, 0xEE]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x206);
        assert_eq!(chip8.registers().sp, 1);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x202);
        assert_eq!(chip8.registers().sp, 0);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0], 0x01);
    }

    #[test]
    fn test_skip_advances_by_four() {
        let mut chip8 = chip8(&[0x30, 0x00]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x204);
    }

    #[test]
    fn test_key_wait_holds_pc_until_key() {
        let mut chip8 = chip8(&[0xF5, 0x0A]);
        for _ in 0..3 {
            assert_eq!(chip8.step(), Ok(Step::AwaitingKey));
            assert_eq!(chip8.registers().pc, 0x200);
        }
        chip8.key_press(0x7);
        chip8.key_release(0x7);
        assert!(matches!(chip8.step(), Ok(Step::Executed(_))));
        assert_eq!(chip8.registers().pc, 0x202);
        assert_eq!(chip8.registers().v[0x5], 0x7);
    }

    #[test]
    fn test_key_wait_from_poll() {
        let mut chip8 = chip8(&[0xF1, 0x0A]);
        chip8.update_keys(&KeyPoll {
            pressed: vec![0x2, 0xC],
            ..KeyPoll::default()
        });
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x1], 0xC);
    }

    #[test]
    fn test_random_uses_injected_source() {
        let mut chip8 = chip8(&[0xC3, 0xF0]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x3], 0x50);
    }

    #[test]
    fn test_decode_error_leaves_state_alone() {
        let mut chip8 = chip8(&[0x60, 0x01, 0xFF, 0xFF]);
        chip8.step().unwrap();
        let before = chip8.registers();
        assert_eq!(chip8.step(), Err(Chip8Error::Decode { word: 0xFFFF }));
        assert_eq!(chip8.registers(), before);
    }

    #[test]
    fn test_faulting_instruction_is_not_partially_applied() {
        // LD V0, #09; LD I, #FFE; LD [I], V2 writes 3 bytes past the end of memory
        let mut chip8 = chip8(&[0x60, 0x09, 0xAF, 0xFE, 0xF2, 0x55]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        let result = chip8.step();
        assert_eq!(
            result,
            Err(Chip8Error::OperandRange(RangeError::Memory {
                address: 0xFFE,
                len: 3
            }))
        );
        assert_eq!(chip8.registers().pc, 0x204);
        assert_eq!(chip8.state.memory.read(0xFFE), Ok(0));
    }

    #[test]
    fn test_return_with_empty_stack() {
        let mut chip8 = chip8(&[0x00, 0xEE]);
        assert_eq!(
            chip8.step(),
            Err(Chip8Error::OperandRange(RangeError::StackUnderflow))
        );
    }

    #[test]
    fn test_recursion_overflows_stack() {
        let mut chip8 = chip8(&[0x22, 0x00]);
        for _ in 0..16 {
            chip8.step().unwrap();
        }
        assert_eq!(
            chip8.step(),
            Err(Chip8Error::OperandRange(RangeError::StackOverflow { depth: 16 }))
        );
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut chip8 = chip8(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        assert_eq!(
            chip8.step(),
            Err(Chip8Error::OperandRange(RangeError::Memory {
                address: MEMORY_SIZE - 1,
                len: 2
            }))
        );
    }

    #[test]
    fn test_load_only_once() {
        let mut chip8 = chip8(&[0x00, 0xE0]);
        assert_eq!(
            chip8.load(&[0x00, 0xE0]),
            Err(Chip8Error::Load(LoadError::AlreadyLoaded))
        );
    }

    #[test]
    fn test_load_too_large() {
        let mut chip8 = Chip8::with_rng(StepRng::new(0, 0));
        let program = vec![0; MAX_PROGRAM_SIZE + 2];
        assert!(matches!(
            chip8.load(&program),
            Err(Chip8Error::Load(LoadError::TooLarge { .. }))
        ));
        assert!(chip8.load(&[0x00, 0xE0]).is_ok());
    }

    #[test]
    fn test_timers_decay_separately_from_steps() {
        // LD V0, #78; LD DT, V0
        let mut chip8 = chip8(&[0x60, 0x78, 0xF0, 0x15]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.registers().dt, 120);
        chip8.decay_timers();
        assert_eq!(chip8.registers().dt, 119);
    }

    #[test]
    fn test_sound_active() {
        // LD V0, #01; LD ST, V0
        let mut chip8 = chip8(&[0x60, 0x01, 0xF0, 0x18]);
        chip8.step().unwrap();
        assert!(!chip8.sound_active());
        chip8.step().unwrap();
        assert!(chip8.sound_active());
        chip8.decay_timers();
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_rewinds() {
        let mut chip8 = chip8(&[0x60, 0x01, 0x60, 0x02]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert!(chip8.rewind());
        assert_eq!(chip8.registers().v[0], 0x01);
        assert_eq!(chip8.registers().pc, 0x202);
        assert!(chip8.rewind());
        assert_eq!(chip8.registers().pc, 0x200);
        assert!(!chip8.rewind());
    }

    #[test]
    fn test_rewind_keeps_live_keys() {
        // LD V1, K; LD V2, K
        let mut chip8 = chip8(&[0xF1, 0x0A, 0xF2, 0x0A]);
        chip8.key_press(0x4);
        chip8.step().unwrap();
        chip8.key_press(0x9);
        assert!(chip8.rewind());

        assert_eq!(chip8.registers().pc, 0x200);
        assert!(chip8.state.keys.is_held(0x4));
        assert!(chip8.state.keys.is_held(0x9));
        // 0x4 was consumed before the rewind and stays consumed
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x1], 0x9);
        assert_eq!(chip8.step(), Ok(Step::AwaitingKey));
    }

    #[test]
    fn test_drops_old_saved_states() {
        let mut chip8 = chip8(&[0x12, 0x00]).with_history(3);
        for _ in 0..5 {
            chip8.step().unwrap();
        }
        assert_eq!(chip8.previous_states.len(), 3);
    }

    #[test]
    fn test_history_disabled() {
        let mut chip8 = chip8(&[0x12, 0x00]).with_history(0);
        chip8.step().unwrap();
        assert!(!chip8.rewind());
    }

    #[test]
    fn test_blocked_step_is_not_saved() {
        let mut chip8 = chip8(&[0xF0, 0x0A]);
        chip8.step().unwrap();
        assert!(chip8.previous_states.is_empty());
    }
}
