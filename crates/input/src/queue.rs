use crate::event::InputEvent;
use std::collections::VecDeque;

/// FIFO of input events waiting for the next frame tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown(Key::Char('2')));
        q.push(InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        q.push(InputEvent::Resized {
            width: 10,
            height: 20,
        });
        assert_eq!(q.len(), 3);

        let drained: Vec<InputEvent> = q.drain().collect();
        assert_eq!(drained[0], InputEvent::KeyDown(Key::Char('2')));
        assert_eq!(drained[1], InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        assert!(matches!(drained[2], InputEvent::Resized { width: 10, .. }));
        assert!(q.is_empty());
    }
}
