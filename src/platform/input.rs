//! Keyboard state with per-key debouncing

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Release the ball from the paddle
    Launch,
    /// Start a round / leave the win screen
    Confirm,
    /// Next level in the menu
    Up,
    /// Previous level in the menu
    Down,
}

impl Key {
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// Held and already-handled flags for every key
///
/// A press is "processed" once a one-shot action has consumed it, and stays
/// that way until the key is released.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Key::COUNT],
    processed: [bool; Key::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
        self.processed[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn is_processed(&self, key: Key) -> bool {
        self.processed[key.index()]
    }

    pub fn mark_processed(&mut self, key: Key) {
        self.processed[key.index()] = true;
    }

    /// True once per physical press
    pub fn take_press(&mut self, key: Key) -> bool {
        if self.is_held(key) && !self.is_processed(key) {
            self.mark_processed(key);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_press_fires_once_per_press() {
        let mut input = InputState::new();
        assert!(!input.take_press(Key::Confirm));

        input.press(Key::Confirm);
        assert!(input.take_press(Key::Confirm));
        assert!(!input.take_press(Key::Confirm));
        assert!(input.is_held(Key::Confirm));

        input.release(Key::Confirm);
        input.press(Key::Confirm);
        assert!(input.take_press(Key::Confirm));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut input = InputState::new();
        input.press(Key::Left);
        input.press(Key::Up);
        assert!(input.take_press(Key::Up));
        assert!(!input.is_processed(Key::Left));
        assert!(!input.is_held(Key::Right));
    }
}
