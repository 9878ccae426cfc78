use std::time::{Duration, Instant};

/// Fixed logical step: 60 Hz.
pub const LOGICAL_STEP: Duration = Duration::from_nanos(16_666_667);

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct TimeStep {
    /// Accumulated logical time, in seconds. Advances in whole 60 Hz steps.
    pub elapsed: f32,

    /// Fraction of the next logical step already accumulated, in `[0, 1)`.
    ///
    /// Available for motion interpolation between logical steps; the demos do
    /// not currently use it.
    pub alpha: f32,

    /// Number of logical steps consumed by this frame.
    pub steps: u32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Pure fixed-step accumulator.
///
/// Frame deltas are clamped before accumulation:
/// - minimum prevents zero-dt behavior from tight loops on some platforms
/// - maximum prevents runaway step bursts after long stalls
#[derive(Debug, Clone)]
pub(crate) struct StepTimer {
    step: Duration,
    accumulator: Duration,
    steps_total: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl StepTimer {
    pub(crate) fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            steps_total: 0,
            dt_min: Duration::from_micros(100), // 0.0001s
            dt_max: Duration::from_millis(250), // 0.25s
        }
    }

    /// Accumulates one frame delta and consumes whole logical steps.
    ///
    /// Returns `(steps_consumed, alpha)`.
    pub(crate) fn push(&mut self, frame_dt: Duration) -> (u32, f32) {
        let dt = frame_dt.clamp(self.dt_min, self.dt_max);
        self.accumulator += dt;

        let mut steps = 0u32;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            self.steps_total += 1;
            steps += 1;
        }

        let alpha = self.accumulator.as_secs_f32() / self.step.as_secs_f32();
        (steps, alpha)
    }

    /// Accumulated logical time in seconds.
    pub(crate) fn elapsed(&self) -> f64 {
        self.steps_total as f64 * self.step.as_secs_f64()
    }
}

/// Frame clock producing `TimeStep` snapshots.
///
/// `StepClock` is designed to be used per window (or per loop) so that
/// multi-window applications do not share timing state.
#[derive(Debug, Clone)]
pub struct StepClock {
    last: Instant,
    frame_index: u64,
    timer: StepTimer,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            timer: StepTimer::new(LOGICAL_STEP),
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `TimeStep`.
    pub fn tick(&mut self) -> TimeStep {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let (steps, alpha) = self.timer.push(dt);

        let ts = TimeStep {
            elapsed: self.timer.elapsed() as f32,
            alpha,
            steps,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ts
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> StepTimer {
        StepTimer::new(LOGICAL_STEP)
    }

    #[test]
    fn exact_step_consumes_one() {
        let mut t = timer();
        let (steps, alpha) = t.push(LOGICAL_STEP);
        assert_eq!(steps, 1);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn partial_step_consumes_none() {
        let mut t = timer();
        let (steps, alpha) = t.push(LOGICAL_STEP / 2);
        assert_eq!(steps, 0);
        assert!(alpha > 0.0 && alpha < 1.0);
    }

    #[test]
    fn two_and_a_half_steps() {
        let mut t = timer();
        let (steps, alpha) = t.push(LOGICAL_STEP * 2 + LOGICAL_STEP / 2);
        assert_eq!(steps, 2);
        assert!((alpha - 0.5).abs() < 1e-3);
    }

    #[test]
    fn remainder_carries_across_frames() {
        let mut t = timer();
        let (steps, _) = t.push(LOGICAL_STEP * 3 / 4);
        assert_eq!(steps, 0);
        let (steps, _) = t.push(LOGICAL_STEP * 3 / 4);
        assert_eq!(steps, 1);
    }

    #[test]
    fn elapsed_advances_in_whole_steps() {
        let mut t = timer();
        for _ in 0..60 {
            t.push(LOGICAL_STEP);
        }
        assert!((t.elapsed() - 60.0 * LOGICAL_STEP.as_secs_f64()).abs() < 1e-9);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut t = timer();
        let (steps, alpha) = t.push(Duration::from_secs(10));
        // 250ms cap / 16.667ms step.
        assert!(steps <= 15);
        assert!(alpha < 1.0);
    }

    #[test]
    fn alpha_stays_below_one() {
        let mut t = timer();
        let mut dt = Duration::from_millis(1);
        for _ in 0..1000 {
            let (_, alpha) = t.push(dt);
            assert!((0.0..1.0).contains(&alpha));
            dt += Duration::from_micros(137);
        }
    }
}
