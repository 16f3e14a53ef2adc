use std::time::Duration;

/// Coalesces a burst of triggers into one delayed action.
///
/// Every `fire` restarts the quiescence window and replaces the payload, so
/// the payload handed back by `poll` is the one from the last trigger.
#[derive(Debug, Clone)]
pub struct DebouncedTrigger<T> {
    delay: Duration,
    deadline: Option<Duration>,
    payload: Option<T>,
}

impl<T> DebouncedTrigger<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            payload: None,
        }
    }

    pub fn fire(&mut self, now: Duration, payload: T) {
        self.deadline = Some(now + self.delay);
        self.payload = Some(payload);
    }

    /// Returns the pending payload once the window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.payload.take()
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.payload = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_collapses_into_last_payload() {
        let mut trigger = DebouncedTrigger::new(ms(100));
        trigger.fire(ms(0), 1);
        trigger.fire(ms(40), 2);
        trigger.fire(ms(90), 3);

        assert_eq!(trigger.poll(ms(150)), None);
        assert_eq!(trigger.poll(ms(190)), Some(3));
        assert_eq!(trigger.poll(ms(500)), None);
    }

    #[test]
    fn cancel_drops_pending_action() {
        let mut trigger = DebouncedTrigger::new(ms(100));
        trigger.fire(ms(0), ());
        trigger.cancel();

        assert!(!trigger.is_pending());
        assert_eq!(trigger.poll(ms(1_000)), None);
    }
}
