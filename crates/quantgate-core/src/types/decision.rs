//! Risk verdicts and sizing decisions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a signal was not turned into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Open position count is at the configured maximum
    MaxPositions,
    /// Today's realized drawdown reached the daily loss limit
    DailyLossLimit,
    /// Overall realized drawdown reached the total limit
    TotalDrawdownLimit,
    /// Available capital is below the minimum trade notional
    InsufficientCapital,
    /// The symbol's cooldown window has not elapsed
    CooldownActive,
    /// The quantity rounded down to zero at the instrument's increment
    BelowMinimumSize,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::MaxPositions => "max_positions",
            RejectReason::DailyLossLimit => "daily_loss_limit",
            RejectReason::TotalDrawdownLimit => "total_drawdown_limit",
            RejectReason::InsufficientCapital => "insufficient_capital",
            RejectReason::CooldownActive => "cooldown_active",
            RejectReason::BelowMinimumSize => "below_minimum_size",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the risk gate for one signal.
///
/// Rejection is an ordinary value, not an error: callers skip the
/// symbol/timeframe for this cycle and move on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateVerdict {
    /// Signal may proceed to sizing, scaled by `scale` in (0, 1]
    Approved { scale: Decimal },
    /// Signal is blocked
    Rejected(RejectReason),
}

impl GateVerdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, GateVerdict::Approved { .. })
    }
}

/// Instrument metadata the sizer needs, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Symbol identifier
    pub symbol: String,
    /// Minimum tradable quantity increment (exchange lot size)
    pub quantity_increment: Decimal,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, quantity_increment: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity_increment,
        }
    }

    /// Round a quantity down to this instrument's increment.
    pub fn round_down(&self, quantity: Decimal) -> Decimal {
        if self.quantity_increment <= Decimal::ZERO {
            return quantity;
        }
        (quantity / self.quantity_increment).floor() * self.quantity_increment
    }
}

/// Terminal output of the pipeline for one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingDecision {
    /// Symbol the decision applies to
    pub symbol: String,
    /// Whether an order should be placed
    pub approved: bool,
    /// Order quantity (zero when not approved)
    pub quantity: Decimal,
    /// Protective stop price
    pub stop_loss_price: Option<Decimal>,
    /// Profit target price
    pub take_profit_price: Option<Decimal>,
    /// Populated exactly when `approved` is false
    pub rejection_reason: Option<RejectReason>,
}

impl SizingDecision {
    /// An approved decision with concrete order parameters.
    pub fn approved(
        symbol: impl Into<String>,
        quantity: Decimal,
        stop_loss_price: Decimal,
        take_profit_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            approved: true,
            quantity,
            stop_loss_price: Some(stop_loss_price),
            take_profit_price: Some(take_profit_price),
            rejection_reason: None,
        }
    }

    /// A rejected decision carrying the enumerated reason.
    pub fn rejected(symbol: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            symbol: symbol.into(),
            approved: false,
            quantity: Decimal::ZERO,
            stop_loss_price: None,
            take_profit_price: None,
            rejection_reason: Some(reason),
        }
    }
}
