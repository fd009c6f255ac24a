//=========================================================================
// Frame Time
//=========================================================================
//
// Per-frame time snapshot handed to scenes, and the monotonic clock the
// platform uses to produce it.
//
//   GameClock ──tick()──> GameTime { total, elapsed }
//                              │
//                              ├─ SceneManager::update()  (debounce check)
//                              └─ Scene::update() / Scene::draw()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== GameTime ============================================================

/// Read-only time snapshot for a single frame.
///
/// `total` is the time since the clock started and never decreases between
/// consecutive ticks of the same clock. `elapsed` is the time since the
/// previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTime {
    total: Duration,
    elapsed: Duration,
}

impl GameTime {
    /// Builds a snapshot from explicit durations.
    pub fn new(total: Duration, elapsed: Duration) -> Self {
        Self { total, elapsed }
    }

    /// Snapshot at `total_ms` milliseconds with no elapsed frame time.
    ///
    /// Mostly useful for driving the scene manager by hand.
    pub fn from_millis(total_ms: u64) -> Self {
        Self::new(Duration::from_millis(total_ms), Duration::ZERO)
    }

    /// Total time since start.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Time since the previous frame.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total time since start, in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0
    }

    /// Time since the previous frame, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Time between `earlier` and this snapshot, clamped at zero.
    pub fn since(&self, earlier: Duration) -> Duration {
        self.total.saturating_sub(earlier)
    }
}

//=== GameClock ===========================================================

/// Monotonic frame clock.
///
/// Started when the platform begins driving frames; every `tick()` yields
/// the next [`GameTime`].
#[derive(Debug, Clone)]
pub struct GameClock {
    start: Instant,
    last: Instant,
}

impl GameClock {
    /// Starts a clock at the current instant.
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Starts a clock at a given instant.
    pub fn start_at(start: Instant) -> Self {
        Self { start, last: start }
    }

    /// Advances the clock to now.
    pub fn tick(&mut self) -> GameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// An instant earlier than the previous tick is treated as no progress,
    /// which keeps `total` non-decreasing.
    pub fn tick_at(&mut self, now: Instant) -> GameTime {
        let now = now.max(self.last);
        let elapsed = now - self.last;
        self.last = now;

        GameTime::new(now - self.start, elapsed)
    }

    /// Snapshot of the last tick without advancing.
    pub fn now(&self) -> GameTime {
        GameTime::new(self.last - self.start, Duration::ZERO)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::start()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
