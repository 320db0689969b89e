/// Transient notification state ("Copied").
///
/// Just the state machine: the GUI polls it on a timer subscription and
/// drops it once expired. How it looks is the view's business.
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_toast_is_visible() {
        let toast = Toast::new("Copied");
        assert_eq!(toast.message(), "Copied");
        assert!(!toast.is_expired(Instant::now()));
    }

    #[test]
    fn test_toast_expires() {
        let toast = Toast::new("Copied");
        let later = Instant::now() + TOAST_DURATION + Duration::from_millis(1);
        assert!(toast.is_expired(later));
    }
}
