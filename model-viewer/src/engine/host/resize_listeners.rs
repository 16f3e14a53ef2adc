use crate::engine::session::ResizeSubscription;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct ResizeListeners {
    next_id: u64,
    active: Vec<ResizeSubscription>,
}

impl ResizeListeners {
    pub fn subscribe(&mut self) -> ResizeSubscription {
        self.next_id += 1;
        let subscription = ResizeSubscription(self.next_id);
        self.active.push(subscription);
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: ResizeSubscription) {
        self.active.retain(|active| *active != subscription);
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let mut listeners = ResizeListeners::default();
        let a = listeners.subscribe();
        let b = listeners.subscribe();

        listeners.unsubscribe(a);
        assert_eq!(listeners.len(), 1);

        listeners.unsubscribe(a);
        listeners.unsubscribe(b);
        assert!(listeners.is_empty());
    }
}
