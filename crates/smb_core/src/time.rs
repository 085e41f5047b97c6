//! Fixed-timestep frame clock.
//!
//! Wall-clock time is fed into an accumulator and drained in whole simulation
//! ticks, so physics always advances in identical steps regardless of render
//! rate. Pausing is the caller simply not stepping; the clock keeps no notion
//! of it.

use std::time::Instant;

pub const DEFAULT_FPS: u32 = 60;

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub tick_count: u64,
    pub frame_count: u64,
    pub ticks_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            fixed_dt: 1.0 / f64::from(fps.max(1)),
            max_accumulator: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            tick_count: 0,
            frame_count: 0,
            ticks_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
        }
    }

    /// Measure elapsed wall-clock time since the previous frame and feed it in.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.feed(real_dt);
    }

    /// Feed an explicit elapsed time. `begin_frame` goes through here.
    pub fn feed(&mut self, real_dt: f64) {
        self.real_dt = real_dt;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.ticks_this_frame = 0;
        self.frame_count += 1;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.tick_count += 1;
            self.ticks_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Time left until the next tick is due.
    pub fn time_to_next_tick(&self) -> f64 {
        (self.fixed_dt - self.accumulator).max(0.0)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
