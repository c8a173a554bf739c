use crate::constants::KEY_COUNT;

/// What an input collaborator reports on each poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPoll {
    /// Keys currently held down.
    pub held: [bool; KEY_COUNT],
    /// Keys that went down since the previous poll, oldest first.
    pub pressed: Vec<u8>,
}

/// # Input Latch
/// Tracks which keys of the hexadecimal keypad are held, and which keys went
/// down but have not yet been consumed by a key wait.
///
/// Pending keys are ordered by when they were latched so that a key wait can
/// take the most recent one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct InputLatch {
    held: [bool; KEY_COUNT],
    pending: [u8; KEY_COUNT],
    pending_len: usize,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a key going down. Keys outside the keypad are ignored.
    pub fn press(&mut self, key: u8) {
        let key = key as usize;
        if key >= KEY_COUNT {
            return;
        }
        self.held[key] = true;
        self.forget(key as u8);
        self.pending[self.pending_len] = key as u8;
        self.pending_len += 1;
    }

    /// Releasing a key doesn't cancel a pending press.
    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            *held = false;
        }
    }

    /// Replace the held set and latch the newly pressed keys.
    pub fn update(&mut self, poll: &KeyPoll) {
        for &key in &poll.pressed {
            self.press(key);
        }
        self.held = poll.held;
    }

    pub fn is_held(&self, key: u8) -> bool {
        self.held.get(key as usize).copied().unwrap_or(false)
    }

    pub fn has_pending(&self) -> bool {
        self.pending_len > 0
    }

    /// Consume the most recently latched key.
    pub fn take_latest(&mut self) -> Option<u8> {
        self.pending_len = self.pending_len.checked_sub(1)?;
        Some(self.pending[self.pending_len])
    }

    fn forget(&mut self, key: u8) {
        if let Some(position) = self.pending[..self.pending_len]
            .iter()
            .position(|&k| k == key)
        {
            self.pending.copy_within(position + 1..self.pending_len, position);
            self.pending_len -= 1;
        }
    }
}
