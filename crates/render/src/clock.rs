use std::time::Instant;

/// Frame clock. Each sample returns the seconds elapsed since the previous
/// sample; the first sample returns zero.
///
/// Deltas are never negative: an instant earlier than the last sample
/// yields zero.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last: Option<Instant>,
    elapsed: f64,
    max_delta: Option<f32>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every delta, so a stalled frame (debugger, window drag) does not
    /// produce one giant step.
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            max_delta: Some(max_delta.max(0.0)),
            ..Self::default()
        }
    }

    pub fn get_delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let raw = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        if self.last.is_none_or(|prev| now > prev) {
            self.last = Some(now);
        }
        let delta = match self.max_delta {
            Some(max) => raw.min(max),
            None => raw,
        };
        self.elapsed += delta as f64;
        delta
    }

    /// Sum of all deltas handed out so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_sample_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.delta_at(Instant::now()), 0.0);
    }

    #[test]
    fn deltas_measure_between_samples() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.delta_at(t0);
        let d = clock.delta_at(t0 + Duration::from_millis(16));
        assert!((d - 0.016).abs() < 1e-6);
        let d = clock.delta_at(t0 + Duration::from_millis(48));
        assert!((d - 0.032).abs() < 1e-6);
        assert!((clock.elapsed() - 0.048).abs() < 1e-6);
    }

    #[test]
    fn going_back_in_time_yields_zero() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.delta_at(t0 + Duration::from_millis(100));
        assert_eq!(clock.delta_at(t0), 0.0);
        // The later sample remains the reference point.
        let d = clock.delta_at(t0 + Duration::from_millis(110));
        assert!((d - 0.010).abs() < 1e-6);
    }

    #[test]
    fn max_delta_caps_stalls() {
        let mut clock = Clock::with_max_delta(0.1);
        let t0 = Instant::now();
        clock.delta_at(t0);
        assert_eq!(clock.delta_at(t0 + Duration::from_secs(3)), 0.1);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn uncapped_clock_reports_the_whole_stall() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.delta_at(t0);
        assert!((clock.delta_at(t0 + Duration::from_secs(3)) - 3.0).abs() < 1e-6);
        assert!((clock.elapsed() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn wall_clock_delta_is_non_negative() {
        let mut clock = Clock::new();
        for _ in 0..5 {
            assert!(clock.get_delta() >= 0.0);
        }
    }
}
