/// The single shared error banner.
///
/// Every [`show`](Self::show) bumps the generation; the caller schedules an
/// expiry carrying that generation and only the latest one can hide the
/// banner, so a newer error restarts the countdown.
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    message:    Option<String>,
    generation: u64,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `message`, replacing whatever is shown.  Returns the
    /// generation the hide timer must report back.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.message = Some(message.into());
        self.generation += 1;
        self.generation
    }

    /// Hide the banner if `generation` is still the current one.
    /// Returns `true` when the banner was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_hides_banner() {
        let mut banner = ErrorBanner::new();
        let gen = banner.show("x");
        assert_eq!(banner.message(), Some("x"));
        assert!(banner.expire(gen));
        assert!(!banner.is_visible());
    }

    #[test]
    fn second_error_overwrites_and_restarts_countdown() {
        let mut banner = ErrorBanner::new();
        let first = banner.show("Failed to update status");
        let second = banner.show("Failed to load history");

        assert!(!banner.expire(first));
        assert_eq!(banner.message(), Some("Failed to load history"));

        assert!(banner.expire(second));
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn late_expiry_is_harmless() {
        let mut banner = ErrorBanner::new();
        let gen = banner.show("x");
        assert!(banner.expire(gen));
        assert!(!banner.expire(gen));
    }
}
