//! Rate limiting for drag-move events.
use std::time::Duration;

/// Share of the interval an event may arrive early and still pass, so a frame
/// loop running at exactly the target rate is never throttled by jitter.
const SLACK_DIVISOR: u32 = 8;

/// Leading-edge throttle: the first event of a burst always passes, later
/// events pass at most once per `interval`, less a small slack.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether an event arriving at `now` should be handled.
    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.min_gap() => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    fn min_gap(&self) -> Duration {
        self.interval - self.interval / SLACK_DIVISOR
    }

    /// Starts a new burst.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn first_event_passes() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.ready(ms(1000)));
    }

    #[test]
    fn events_inside_interval_are_dropped() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.ready(ms(100)));
        assert!(!throttle.ready(ms(105)));
        assert!(!throttle.ready(ms(113)));
        assert!(throttle.ready(ms(116)));
        assert!(!throttle.ready(ms(120)));
    }

    #[test]
    fn reset_starts_a_new_burst() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.ready(ms(100)));
        throttle.reset();
        assert!(throttle.ready(ms(101)));
    }

    #[test]
    fn frame_jitter_is_tolerated() {
        let mut throttle = Throttle::new(Duration::from_secs_f32(1.0 / 60.0));
        let mut now = ms(1000);
        assert!(throttle.ready(now));
        // a second event in the same frame waits for the next frame
        assert!(!throttle.ready(now));
        for _ in 0..10 {
            now += Duration::from_micros(16_500);
            assert!(throttle.ready(now));
        }
        assert!(!throttle.ready(now + ms(5)));
    }

    #[test]
    fn half_rate_drops_every_other_frame() {
        let mut throttle = Throttle::new(Duration::from_secs_f32(1.0 / 30.0));
        let frame = Duration::from_micros(16_667);
        let passed = (0..12u32).filter(|&i| throttle.ready(ms(1000) + frame * i)).count();
        assert_eq!(passed, 6);
    }
}
