//! CorePlugin wires the fixed-step simulation clock and global tuning.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use crate::core::settings::GameTuning;

const DEFAULT_TICK_HZ: f32 = 60.0;
const MIN_TICK_HZ: f32 = 1.0;

/// Upper bound on steps consumed per frame so a long stall cannot
/// trigger a catch-up spiral.
const MAX_PENDING_STEPS: u32 = 8;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Accumulates real frame deltas and releases whole logical steps at a
/// fixed rate, so simulation speed is independent of the display refresh.
#[derive(Resource, Debug)]
pub struct TickClock {
    step: Duration,
    accumulated: Duration,
    elapsed: Duration,
    total_steps: u64,
}

impl TickClock {
    /// Creates a clock releasing steps at the given frequency (clamped to
    /// a small positive minimum).
    pub fn new(tick_hz: f32) -> Self {
        let hz = tick_hz.max(MIN_TICK_HZ);
        Self {
            step: Duration::from_secs_f32(1.0 / hz),
            accumulated: Duration::ZERO,
            elapsed: Duration::ZERO,
            total_steps: 0,
        }
    }

    /// Duration of one logical step.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Total logical steps released since startup.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Total real time fed into the clock.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real frame delta to the accumulator.
    pub fn tick(&mut self, real_delta: Duration) {
        self.accumulated += real_delta;
        self.elapsed += real_delta;
    }

    /// Drains whole steps out of the accumulator, capped so a stalled
    /// frame releases at most [`MAX_PENDING_STEPS`].
    pub fn take_pending(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulated >= self.step && steps < MAX_PENDING_STEPS {
            self.accumulated -= self.step;
            steps += 1;
        }
        if steps == MAX_PENDING_STEPS {
            // Discard the backlog rather than fast-forwarding the world.
            self.accumulated = Duration::ZERO;
        }
        self.total_steps += u64::from(steps);
        steps
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

/// Registers the tick clock and loads game tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let tuning = GameTuning::load_or_default();
        let tick_clock = TickClock::new(tuning.simulation.tick_hz);

        app.insert_resource(tuning)
            .insert_resource(tick_clock)
            .add_systems(Startup, log_startup_tick_rate)
            .add_systems(Update, advance_tick_clock);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_tick_stats);
        }
    }
}

fn advance_tick_clock(mut clock: ResMut<TickClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_tick_rate(clock: Res<TickClock>) {
    info!(
        "CorePlugin initialised with logical step: {:.4}s",
        clock.step().as_secs_f32()
    );
}

#[cfg(feature = "core_debug")]
fn log_tick_stats(mut timer: ResMut<DebugTickTimer>, clock: Res<TickClock>, time: Res<Time>) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "Elapsed: {:.2}s | steps: {} | step size: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.total_steps(),
            clock.step().as_secs_f32(),
        );
    }
}
