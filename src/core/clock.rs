// Scaled and unscaled frame clocks

/// Two monotonically increasing clocks advanced once per frame.
///
/// The scaled clock runs at `time_scale` times real speed and is what most
/// duration checks use. The unscaled clock always follows real time, so a
/// window measured on it is not stretched while the game runs in slow motion.
#[derive(Debug, Clone)]
pub struct FrameClock {
    scaled: f32,
    unscaled: f32,
    time_scale: f32,
    delta: f32,
    unscaled_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            scaled: 0.0,
            unscaled: 0.0,
            time_scale: 1.0,
            delta: 0.0,
            unscaled_delta: 0.0,
        }
    }

    /// Advance both clocks by one frame of real time
    pub fn advance(&mut self, real_dt: f32) {
        let real_dt = real_dt.max(0.0);
        self.unscaled_delta = real_dt;
        self.delta = real_dt * self.time_scale;
        self.unscaled += real_dt;
        self.scaled += self.delta;
    }

    /// Current scaled time in seconds
    pub fn now(&self) -> f32 {
        self.scaled
    }

    /// Current real time in seconds
    pub fn unscaled_now(&self) -> f32 {
        self.unscaled
    }

    /// Scaled duration of the last frame
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Real duration of the last frame
    pub fn unscaled_delta(&self) -> f32 {
        self.unscaled_delta
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the multiplier applied to the scaled clock from the next frame on
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Return to real-time speed
    pub fn reset_time_scale(&mut self) {
        self.time_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.unscaled_now(), 0.0);
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_clocks_advance_together_at_normal_speed() {
        let mut clock = FrameClock::new();
        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.now(), 0.5);
        assert_eq!(clock.unscaled_now(), 0.5);
    }

    #[test]
    fn test_slow_motion_only_affects_scaled_clock() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(0.25);
        clock.advance(1.0);
        assert_eq!(clock.now(), 0.25);
        assert_eq!(clock.delta(), 0.25);
        assert_eq!(clock.unscaled_now(), 1.0);
        assert_eq!(clock.unscaled_delta(), 1.0);

        clock.reset_time_scale();
        clock.advance(0.5);
        assert_eq!(clock.now(), 0.75);
        assert_eq!(clock.unscaled_now(), 1.5);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.now(), 0.5);
    }
}
