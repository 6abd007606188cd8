//! Process-wide configuration slot.
//!
//! Exactly one [`RuntimeConfig`] is live at a time. A refresh builds the
//! replacement completely, then publishes it with a single pointer swap, so
//! readers see either the previous instance or the new one, never a mix.

use super::runtime::{ConfigUpdate, RuntimeConfig};
use crate::limiter::{RateLimiter, WindowLimiter};
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::{debug, info};

static CONFIG: ArcSwapOption<RuntimeConfig> = ArcSwapOption::const_empty();
static LIMITER: ArcSwapOption<LimiterSlot> = ArcSwapOption::const_empty();

/// Limiter backing [`RuntimeConfig::invalid_record`].
pub enum LimiterSlot {
    /// Installed by the host; survives configuration refreshes.
    Installed(Box<dyn RateLimiter>),
    /// Built from the live record rate; rebuilt when the rate changes.
    Default(WindowLimiter),
}

impl RateLimiter for LimiterSlot {
    fn acquire(&self, path: &str) -> bool {
        match self {
            LimiterSlot::Installed(limiter) => limiter.acquire(path),
            LimiterSlot::Default(limiter) => limiter.acquire(path),
        }
    }
}

fn permits_for(record_rate: i32) -> u32 {
    record_rate.max(0) as u32
}

fn default_limiter(record_rate: i32) -> LimiterSlot {
    LimiterSlot::Default(WindowLimiter::per_minute(permits_for(record_rate)))
}

// Swap in a default built from `record_rate` unless the slot already holds an
// installed limiter or a default with the same budget.
fn refresh_default_limiter(record_rate: i32) {
    LIMITER.rcu(|current| match current.as_deref() {
        Some(LimiterSlot::Installed(_)) => current.clone(),
        Some(LimiterSlot::Default(limiter)) if limiter.permits() == permits_for(record_rate) => {
            current.clone()
        }
        _ => Some(Arc::new(default_limiter(record_rate))),
    });
}

/// Replace the live configuration with one built from `update`.
pub fn update(update: ConfigUpdate) -> Arc<RuntimeConfig> {
    let next = Arc::new(RuntimeConfig::new(update));

    refresh_default_limiter(next.record_rate());
    CONFIG.store(Some(Arc::clone(&next)));
    info!(
        service = next.service_name(),
        record_rate = next.record_rate(),
        entities = next.dynamic_entity_map().len(),
        debug = next.is_enable_debug(),
        "runtime config published"
    );
    next
}

/// The live configuration, or `None` before the first [`update`].
pub fn get() -> Option<Arc<RuntimeConfig>> {
    CONFIG.load_full()
}

/// Route every subsequent [`RuntimeConfig::invalid_record`] call through `limiter`.
pub fn install_limiter<L>(limiter: L)
where
    L: RateLimiter + 'static,
{
    LIMITER.store(Some(Arc::new(LimiterSlot::Installed(Box::new(limiter)))));
    debug!("custom record limiter installed");
}

/// Drop an installed limiter; the rate-driven default takes over again.
pub fn reset_limiter() {
    let rate = get().map_or(0, |config| config.record_rate());
    LIMITER.store(Some(Arc::new(default_limiter(rate))));
    debug!(record_rate = rate, "record limiter reset to default");
}

/// The limiter consulted by [`RuntimeConfig::invalid_record`].
pub fn limiter() -> Option<Arc<LimiterSlot>> {
    LIMITER.load_full()
}

impl RuntimeConfig {
    /// True when `path` must not be recorded, using the process-wide limiter.
    pub fn invalid_record(&self, path: &str) -> bool {
        let slot = match LIMITER.load_full() {
            Some(slot) => slot,
            None => {
                // Budget follows the published config, not this instance.
                let rate = get().map_or(0, |live| live.record_rate());
                let fresh = Arc::new(default_limiter(rate));
                let previous = LIMITER.rcu(|current| match current {
                    Some(_) => current.clone(),
                    None => Some(Arc::clone(&fresh)),
                });
                previous.unwrap_or(fresh)
            }
        };
        self.invalid_record_with(path, slot.as_ref())
    }
}
