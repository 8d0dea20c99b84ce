use super::Game;
use std::fmt;

pub type Listener = Box<dyn FnMut(&Game)>;

/// Handle returned by [`Game::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(Subscription, Listener)>,
}

impl Subscribers {
    pub fn add(&mut self, listener: Listener) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, listener));
        subscription
    }

    /// Removing twice is harmless; the second call reports `false`.
    pub fn remove(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Detaches the listeners so they can be called with a shared borrow of the game.
    pub(super) fn take(&mut self) -> Vec<(Subscription, Listener)> {
        std::mem::take(&mut self.listeners)
    }

    pub(super) fn restore(&mut self, listeners: Vec<(Subscription, Listener)>) {
        self.listeners = listeners;
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
