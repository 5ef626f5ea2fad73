//! Rotating motivational banner.
//!
//! Purely decorative: the rotator never looks at conversation state.
//!
//! Rotation is driven by the caller through [`QuoteRotator::tick`].  The
//! REPL ticks before each prompt, so the banner changes at most once per
//! line read; while the user sits at the prompt the banner stays put and
//! catches up on the next tick.

use std::time::{Duration, Instant};

/// How long each quote stays up.
pub const DEFAULT_QUOTE_INTERVAL: Duration = Duration::from_secs(6);

/// The built-in quote pool.
pub const MOTIVATIONAL_QUOTES: [&str; 4] = [
    "Cada día es una nueva oportunidad para ser mejor. 💪",
    "Tu potencial no tiene límites. ✨",
    "El esfuerzo de hoy es el éxito de mañana. 🌟",
    "Cree en ti mismo y todo será posible. 🚀",
];

/// Cycles through a fixed pool of quotes on a fixed interval.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    pool: &'static [&'static str],
    interval: Duration,
    index: usize,
    shown_at: Instant,
}

impl QuoteRotator {
    /// A rotator over [`MOTIVATIONAL_QUOTES`] starting at the first quote.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            pool: &MOTIVATIONAL_QUOTES,
            interval,
            index: 0,
            shown_at: now,
        }
    }

    /// A rotator over `pool`, or `None` when the pool is empty.
    pub fn with_pool(
        pool: &'static [&'static str],
        interval: Duration,
        now: Instant,
    ) -> Option<Self> {
        if pool.is_empty() {
            return None;
        }
        Some(Self {
            pool,
            interval,
            index: 0,
            shown_at: now,
        })
    }

    /// The quote currently on display.
    pub fn current(&self) -> &'static str {
        self.pool[self.index]
    }

    /// Advances past every interval that elapsed since the last change.
    ///
    /// Returns the new quote when it changed.
    pub fn tick(&mut self, now: Instant) -> Option<&'static str> {
        if self.interval.is_zero() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.shown_at);
        let interval = self.interval.as_nanos();
        let steps = elapsed.as_nanos() / interval;
        if steps == 0 {
            return None;
        }
        let before = self.index;
        let len = self.pool.len() as u128;
        self.index = ((self.index as u128 + steps % len) % len) as usize;
        // Keep the phase: the current quote went up at the last interval boundary.
        let into_interval = u64::try_from(elapsed.as_nanos() % interval)
            .map(Duration::from_nanos)
            .unwrap_or(Duration::ZERO);
        self.shown_at = now.checked_sub(into_interval).unwrap_or(now);
        if self.index == before {
            None
        } else {
            Some(self.current())
        }
    }
}
