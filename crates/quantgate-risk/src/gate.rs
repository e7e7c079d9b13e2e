//! The risk gate: account-wide limit checks with graceful degradation.

use quantgate_core::types::{GateVerdict, RejectReason, RiskContext, Signal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Account-wide risk limits.
///
/// Drawdown limits are fractions of equity in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Maximum number of concurrently open positions
    pub max_positions: usize,
    /// Daily realized loss limit as a fraction of equity
    pub daily_loss_limit: Decimal,
    /// Total realized drawdown limit as a fraction of equity
    pub max_total_drawdown: Decimal,
    /// Smallest order notional worth placing
    pub min_trade_notional: Decimal,
    /// Seconds that must elapse between approved signals per symbol
    pub cooldown_secs: u64,
    /// Fraction of a drawdown limit at which linear scale-down begins.
    /// 1.0 disables scaling (hard cliff at the limit).
    pub warning_band: Decimal,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_positions: 5,
            daily_loss_limit: dec!(0.03),
            max_total_drawdown: dec!(0.20),
            min_trade_notional: dec!(10),
            cooldown_secs: 300,
            warning_band: dec!(0.5),
        }
    }
}

/// Validates signals against a [`RiskContext`].
///
/// Stateless across calls: every decision derives from the context snapshot
/// it is handed, so callers control the consistency boundary.
#[derive(Debug, Clone)]
pub struct RiskGate {
    limits: RiskLimits,
}

impl RiskGate {
    /// Create a gate with the given limits.
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    /// The limits this gate enforces.
    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Evaluate a signal against the context.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// position count, daily drawdown, total drawdown, capital, cooldown.
    /// An approval carries the warning-band scale factor in (0, 1].
    pub fn evaluate(&self, signal: &Signal, ctx: &RiskContext) -> GateVerdict {
        if ctx.open_position_count >= self.limits.max_positions {
            return self.reject(signal, RejectReason::MaxPositions);
        }

        if ctx.realized_drawdown_today >= self.limits.daily_loss_limit {
            return self.reject(signal, RejectReason::DailyLossLimit);
        }
        if ctx.realized_drawdown_total >= self.limits.max_total_drawdown {
            return self.reject(signal, RejectReason::TotalDrawdownLimit);
        }

        if ctx.available_capital < self.limits.min_trade_notional {
            return self.reject(signal, RejectReason::InsufficientCapital);
        }

        if let Some(last) = ctx.last_signal_at(&signal.symbol) {
            let elapsed_ms = signal.generated_at - last;
            let cooldown_ms = self.limits.cooldown_secs as i64 * 1000;
            // elapsed == 0 is a same-bar retry, not a new signal
            if elapsed_ms > 0 && elapsed_ms < cooldown_ms {
                return self.reject(signal, RejectReason::CooldownActive);
            }
        }

        let scale = self
            .scale_for(ctx.realized_drawdown_today, self.limits.daily_loss_limit)
            .min(self.scale_for(ctx.realized_drawdown_total, self.limits.max_total_drawdown));

        if scale < Decimal::ONE {
            debug!(
                symbol = %signal.symbol,
                %scale,
                "drawdown in warning band, scaling position down"
            );
        }

        GateVerdict::Approved { scale }
    }

    fn reject(&self, signal: &Signal, reason: RejectReason) -> GateVerdict {
        info!(symbol = %signal.symbol, %reason, "signal rejected by risk gate");
        GateVerdict::Rejected(reason)
    }

    /// Linear scale-down for a drawdown metric approaching its limit.
    ///
    /// 1.0 below the warning band, falling linearly to 0 at the limit.
    /// Values at or past the limit are unreachable here (rejected above).
    fn scale_for(&self, value: Decimal, limit: Decimal) -> Decimal {
        if limit <= Decimal::ZERO {
            return Decimal::ONE;
        }
        let band_start = limit * self.limits.warning_band;
        if value <= band_start || band_start >= limit {
            return Decimal::ONE;
        }
        ((limit - value) / (limit - band_start)).clamp(Decimal::ZERO, Decimal::ONE)
    }
}
