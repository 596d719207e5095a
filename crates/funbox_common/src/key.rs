/// Physical keys the frontend reports. Anything else arrives as `Key::None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Num1,
    Num2,
    A,
    B,
    Escape,
    None,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A discrete input transition, already translated from the platform event.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },
    /// The window manager asked the window to close.
    CloseRequested,
}

impl InputEvent {
    pub fn pressed(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Released,
        }
    }
}

/// Non-blocking queue of pending input transitions.
pub trait EventSource {
    /// Next pending event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl EventSource for std::collections::VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}
