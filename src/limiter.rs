use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-path recording budget consulted as the last recording gate.
pub trait RateLimiter: Send + Sync {
    /// Returns true when `path` may be recorded now. Called concurrently for
    /// many distinct paths.
    fn acquire(&self, path: &str) -> bool;
}

impl<F> RateLimiter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn acquire(&self, path: &str) -> bool {
        self(path)
    }
}

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct WindowSlot {
    started: Instant,
    used: u32,
}

#[derive(Debug, Default)]
struct WindowState {
    slots: HashMap<String, WindowSlot>,
    last_sweep: Option<Instant>,
}

impl WindowState {
    // Expired slots are dropped at most once per window.
    fn sweep(&mut self, now: Instant, window: Duration) {
        match self.last_sweep {
            Some(last) if now.saturating_duration_since(last) < window => {}
            Some(_) => {
                self.slots
                    .retain(|_, slot| now.saturating_duration_since(slot.started) < window);
                self.last_sweep = Some(now);
            }
            None => self.last_sweep = Some(now),
        }
    }
}

/// Fixed-window limiter: at most `permits` grants per path per window.
#[derive(Debug)]
pub struct WindowLimiter {
    permits: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

impl WindowLimiter {
    pub fn new(permits: u32, window: Duration) -> Self {
        Self {
            permits,
            window,
            state: Mutex::new(WindowState::default()),
        }
    }

    /// One-minute windows, the agent's default recording cadence.
    pub fn per_minute(permits: u32) -> Self {
        Self::new(permits, DEFAULT_WINDOW)
    }

    pub fn permits(&self) -> u32 {
        self.permits
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Paths currently holding a window slot.
    pub fn tracked_paths(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .slots
            .len()
    }

    pub fn acquire_at(&self, path: &str, now: Instant) -> bool {
        if self.permits == 0 {
            return false;
        }
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.sweep(now, self.window);
        let slot = state
            .slots
            .entry(path.to_string())
            .or_insert(WindowSlot { started: now, used: 0 });

        if now.saturating_duration_since(slot.started) >= self.window {
            *slot = WindowSlot { started: now, used: 0 };
        }
        if slot.used < self.permits {
            slot.used += 1;
            true
        } else {
            false
        }
    }
}

impl RateLimiter for WindowLimiter {
    fn acquire(&self, path: &str) -> bool {
        self.acquire_at(path, Instant::now())
    }
}
