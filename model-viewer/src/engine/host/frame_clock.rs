use crate::engine::session::FrameRequest;
use bevy::prelude::*;

/// At most one outstanding frame request; it becomes due on the next `Update`.
#[derive(Resource, Default)]
pub struct FrameClock {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl FrameClock {
    pub fn request(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    pub fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_only_clears_matching_request() {
        let mut clock = FrameClock::default();
        let first = clock.request();
        let second = clock.request();

        clock.cancel(first);
        assert_eq!(clock.pending(), Some(second));

        clock.cancel(second);
        assert_eq!(clock.take_due(), None);
    }
}
