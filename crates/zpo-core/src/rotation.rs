//! Wheel rotation throttle.
//!
//! The host processes rotations slower than a free-spinning wheel delivers
//! ticks, so rotations closer together than the host's minimum interval are
//! dropped. Only the timestamp of the last accepted rotation is kept.

/// Two-state limiter (ready / limited) keyed on the last accepted rotation.
#[derive(Debug, Clone, Default)]
pub struct RotationLimiter {
    last_accept_ms: Option<f64>,
}

impl RotationLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a rotation at `now_ms` if at least `min_interval_ms` passed
    /// since the last accepted one. Rejections leave the state untouched.
    pub fn try_accept(&mut self, now_ms: f64, min_interval_ms: f64) -> bool {
        if let Some(last) = self.last_accept_ms
            && now_ms - last < min_interval_ms
        {
            log::trace!("rotation rate limited ({}ms)", now_ms - last);
            return false;
        }
        self.last_accept_ms = Some(now_ms);
        true
    }

    pub fn last_accept_ms(&self) -> Option<f64> {
        self.last_accept_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rotation_is_accepted() {
        let mut limiter = RotationLimiter::new();
        assert!(limiter.try_accept(5.0, 50.0));
        assert_eq!(limiter.last_accept_ms(), Some(5.0));
    }

    #[test]
    fn rotation_within_interval_is_rejected() {
        let mut limiter = RotationLimiter::new();
        assert!(limiter.try_accept(1000.0, 50.0));
        assert!(!limiter.try_accept(1049.0, 50.0));
        // Rejection does not move the window.
        assert_eq!(limiter.last_accept_ms(), Some(1000.0));
        assert!(limiter.try_accept(1050.0, 50.0));
        assert_eq!(limiter.last_accept_ms(), Some(1050.0));
    }

    #[test]
    fn zero_interval_never_limits() {
        let mut limiter = RotationLimiter::new();
        assert!(limiter.try_accept(1.0, 0.0));
        assert!(limiter.try_accept(1.0, 0.0));
    }
}
