/// Host frame clock
///
/// Fixed-timestep update counting with pause support, plus the input clock
/// the jump controller falls back to when an event carries no timestamp.
use std::time::{Duration, Instant};

/// Target update rate (240 steps per second, the host's physics rate)
pub const FIXED_TIMESTEP: f64 = 1.0 / 240.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_nanos(4_166_667);

/// Maximum number of steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 8;

pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    last_frame_time: Instant,

    /// Origin of the input clock
    start_time: Instant,

    paused: bool,

    frame_count: u64,

    step_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a loop whose clock starts at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: start,
            start_time: start,
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame, returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            // Drop the backlog rather than carrying it into the next frame
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Seconds since the loop started, in the host's input clock domain
    pub fn input_timestamp(&self) -> f64 {
        self.timestamp_at(Instant::now())
    }

    /// Input-clock reading for a given instant
    pub fn timestamp_at(&self, instant: Instant) -> f64 {
        instant
            .saturating_duration_since(self.start_time)
            .as_secs_f64()
    }

    pub fn fixed_timestep(&self) -> f64 {
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.step_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let game_loop = GameLoop::new();
        assert_relative_eq!(game_loop.fixed_timestep(), 1.0 / 240.0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_no_steps() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        game_loop.pause();

        let steps = game_loop.begin_frame_at(start + Duration::from_millis(50));
        assert_eq!(steps, 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_step_accumulation() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // Two and a half steps worth of time
        let steps = game_loop.begin_frame_at(start + FIXED_TIMESTEP_DURATION * 5 / 2);
        assert_eq!(steps, 2);

        // The leftover half step completes with another half
        let steps = game_loop.begin_frame_at(start + FIXED_TIMESTEP_DURATION * 3);
        assert_eq!(steps, 1);
        assert_eq!(game_loop.step_count(), 3);
    }

    #[test]
    fn test_max_steps_limit() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let steps = game_loop.begin_frame_at(start + Duration::from_millis(300));
        assert_eq!(steps, MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn test_input_timestamp_is_relative_to_start() {
        let start = Instant::now();
        let game_loop = GameLoop::starting_at(start);

        assert_relative_eq!(game_loop.timestamp_at(start), 0.0);
        assert_relative_eq!(
            game_loop.timestamp_at(start + Duration::from_millis(1500)),
            1.5
        );
        assert!(game_loop.input_timestamp() >= 0.0);
    }
}
