//! Account-wide risk state shared across symbol pipelines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Account-wide risk state, owned by the caller and read by the risk gate.
///
/// Drawdowns are fractions of equity in [0, 1]. Invariants:
/// `realized_drawdown_total >= realized_drawdown_today >= 0` and
/// `available_capital >= 0`. [`RiskContext::record_loss`] maintains them;
/// callers mutating fields directly are responsible for keeping them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskContext {
    /// Capital available for new positions
    pub available_capital: Decimal,
    /// Number of currently open positions
    pub open_position_count: usize,
    /// Realized loss so far today, as a fraction of equity
    pub realized_drawdown_today: Decimal,
    /// Realized peak-to-trough loss overall, as a fraction of equity
    pub realized_drawdown_total: Decimal,
    /// Per-symbol timestamp (unix ms) of the last approved signal
    last_signal_at: HashMap<String, i64>,
}

impl RiskContext {
    /// Create a context with the given capital and no open risk.
    pub fn new(available_capital: Decimal) -> Self {
        Self {
            available_capital,
            ..Default::default()
        }
    }

    /// Set the drawdown fractions, clamping to keep the invariants.
    pub fn with_drawdowns(mut self, today: Decimal, total: Decimal) -> Self {
        let today = today.max(Decimal::ZERO);
        self.realized_drawdown_today = today;
        self.realized_drawdown_total = total.max(today);
        self
    }

    /// Record a realized loss as a fraction of equity.
    pub fn record_loss(&mut self, fraction: Decimal) {
        let fraction = fraction.max(Decimal::ZERO);
        self.realized_drawdown_today += fraction;
        self.realized_drawdown_total =
            self.realized_drawdown_total.max(self.realized_drawdown_today);
    }

    /// Reset the daily drawdown at the start of a trading day.
    pub fn reset_day(&mut self) {
        self.realized_drawdown_today = Decimal::ZERO;
    }

    /// Timestamp (unix ms) of the last approved signal for a symbol.
    pub fn last_signal_at(&self, symbol: &str) -> Option<i64> {
        self.last_signal_at.get(symbol).copied()
    }

    /// Record an approved signal for cooldown tracking.
    pub fn record_signal(&mut self, symbol: &str, timestamp: i64) {
        self.last_signal_at.insert(symbol.to_string(), timestamp);
    }
}

/// Mutex-guarded [`RiskContext`] handle, cloneable across symbol pipelines.
///
/// The gate check and any bookkeeping update must happen inside a single
/// [`transact`](Self::transact) call: two concurrent pipelines must not both
/// pass the position-count or capital check against a stale snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedRiskContext(Arc<Mutex<RiskContext>>);

impl SharedRiskContext {
    /// Wrap a context for shared use.
    pub fn new(ctx: RiskContext) -> Self {
        Self(Arc::new(Mutex::new(ctx)))
    }

    /// Run `f` with exclusive access to the context.
    pub fn transact<T>(&self, f: impl FnOnce(&mut RiskContext) -> T) -> T {
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> RiskContext {
        self.transact(|ctx| ctx.clone())
    }
}
