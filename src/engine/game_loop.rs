// Frame pacing for a headless run: variable-length frames drive fixed-length
// physics ticks. Frame durations come from the caller so runs are repeatable.

use std::time::Duration;

use log::warn;

/// Length of one physics tick in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

const TICK: Duration = Duration::from_micros(16_667);

/// Ticks allowed per frame; anything past this is dropped, not replayed
const MAX_TICKS_PER_FRAME: u32 = 5;

#[derive(Debug, Default)]
pub struct GameLoop {
    pending: Duration,
    ticks: u64,
    dropped_frames: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `frame_time` and return how many physics ticks are due
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.pending += frame_time;

        let due = (self.pending.as_nanos() / TICK.as_nanos()) as u64;
        let ticks = due.min(MAX_TICKS_PER_FRAME as u64) as u32;
        self.pending -= TICK * ticks;

        if due > ticks as u64 {
            self.dropped_frames += 1;
            warn!("frame ran {due} ticks behind, dropping backlog");
            self.pending = self.pending.min(TICK);
        }

        self.ticks += ticks as u64;
        ticks
    }

    /// Physics ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames that hit the per-frame tick cap
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_matches_fixed_timestep() {
        assert!((TICK.as_secs_f32() - FIXED_TIMESTEP).abs() < 1e-5);
    }

    #[test]
    fn test_display_rate_frames_tick_once() {
        let mut game_loop = GameLoop::new();
        for _ in 0..30 {
            assert_eq!(game_loop.advance(TICK), 1);
        }
        assert_eq!(game_loop.ticks(), 30);
        assert_eq!(game_loop.dropped_frames(), 0);
    }

    #[test]
    fn test_fast_frames_bank_time() {
        let mut game_loop = GameLoop::new();
        let half = TICK / 2;
        assert_eq!(game_loop.advance(half), 0);
        assert_eq!(game_loop.advance(half), 1);
        assert_eq!(game_loop.advance(half), 0);
    }

    #[test]
    fn test_hitch_is_capped_and_forgotten() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(300)), MAX_TICKS_PER_FRAME);
        assert_eq!(game_loop.dropped_frames(), 1);
        assert!(game_loop.advance(Duration::ZERO) <= 1);
    }
}
