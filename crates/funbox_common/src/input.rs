use crate::button::ButtonMask;
use crate::key::{EventSource, InputEvent, Key, KeyState};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct InputSample {
    pub quit: bool,
    pub buttons: ButtonMask,
}

/// Folds key transitions into a persistent mask of held buttons.
///
/// Bits are only ever cleared by an explicit release; nothing is inferred from
/// focus changes or missing events.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    buttons: ButtonMask,
    quit: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending event in arrival order and return the latched state.
    pub fn sample(&mut self, source: &mut impl EventSource) -> InputSample {
        while let Some(event) = source.poll_event() {
            self.apply(event);
        }
        self.current()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::CloseRequested => self.quit = true,
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Released,
            } => self.quit = true,
            InputEvent::Key { key, state } => {
                let Some(button) = ButtonMask::for_key(key) else {
                    return;
                };
                match state {
                    KeyState::Pressed => self.buttons.insert(button),
                    KeyState::Released => self.buttons.remove(button),
                }
                log::trace!("buttons: {:#010b}", self.buttons.bits());
            }
        }
    }

    pub fn current(&self) -> InputSample {
        InputSample {
            quit: self.quit,
            buttons: self.buttons,
        }
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn queue(events: &[InputEvent]) -> VecDeque<InputEvent> {
        events.iter().copied().collect()
    }

    #[test]
    fn press_sets_and_release_clears() {
        let mut latch = InputLatch::new();
        let sample = latch.sample(&mut queue(&[InputEvent::pressed(Key::Right)]));
        assert_eq!(sample.buttons.bits(), 0b0000_0010);
        assert!(!sample.quit);

        let sample = latch.sample(&mut queue(&[InputEvent::released(Key::Right)]));
        assert!(sample.buttons.is_empty());
    }

    #[test]
    fn held_buttons_persist_across_samples() {
        let mut latch = InputLatch::new();
        latch.sample(&mut queue(&[
            InputEvent::pressed(Key::Up),
            InputEvent::pressed(Key::A),
        ]));
        let sample = latch.sample(&mut VecDeque::new());
        assert_eq!(sample.buttons, ButtonMask::UP | ButtonMask::A);
    }

    #[test]
    fn last_event_per_button_wins() {
        let mut latch = InputLatch::new();
        let sample = latch.sample(&mut queue(&[
            InputEvent::pressed(Key::Left),
            InputEvent::released(Key::Left),
            InputEvent::pressed(Key::B),
            InputEvent::released(Key::B),
            InputEvent::pressed(Key::B),
        ]));
        assert_eq!(sample.buttons, ButtonMask::B);
    }

    #[test]
    fn empty_sample_is_idempotent() {
        let mut latch = InputLatch::new();
        latch.sample(&mut queue(&[InputEvent::pressed(Key::Down)]));
        let before = latch.current();

        for _ in 0..3 {
            assert_eq!(latch.sample(&mut VecDeque::new()), before);
        }
    }

    #[test]
    fn escape_release_quits_alongside_other_events() {
        let mut latch = InputLatch::new();
        let sample = latch.sample(&mut queue(&[
            InputEvent::pressed(Key::Num1),
            InputEvent::released(Key::Escape),
            InputEvent::pressed(Key::Num2),
        ]));
        assert!(sample.quit);
        assert_eq!(sample.buttons, ButtonMask::START | ButtonMask::SELECT);
    }

    #[test]
    fn escape_press_alone_does_not_quit() {
        let mut latch = InputLatch::new();
        let sample = latch.sample(&mut queue(&[InputEvent::pressed(Key::Escape)]));
        assert!(!sample.quit);
        assert!(sample.buttons.is_empty());
    }

    #[test]
    fn close_request_quits() {
        let mut latch = InputLatch::new();
        assert!(latch.sample(&mut queue(&[InputEvent::CloseRequested])).quit);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut latch = InputLatch::new();
        let sample = latch.sample(&mut queue(&[
            InputEvent::pressed(Key::None),
            InputEvent::released(Key::None),
        ]));
        assert_eq!(sample, InputSample::default());
    }

    #[test]
    fn release_without_press_leaves_other_bits() {
        let mut latch = InputLatch::new();
        latch.sample(&mut queue(&[InputEvent::pressed(Key::A)]));
        let sample = latch.sample(&mut queue(&[InputEvent::released(Key::B)]));
        assert_eq!(sample.buttons, ButtonMask::A);
    }
}
