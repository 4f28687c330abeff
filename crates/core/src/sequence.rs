/// Drops poll outcomes that complete out of order.
///
/// Each poller numbers its requests; an outcome older than the last one
/// applied is stale and must not overwrite newer data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseGate {
    last_applied: Option<u64>,
}

impl ResponseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the outcome for `seq` should be applied.
    pub fn admit(&mut self, seq: u64) -> bool {
        if self.last_applied.is_some_and(|last| seq < last) {
            return false;
        }
        self.last_applied = Some(seq);
        true
    }
}
