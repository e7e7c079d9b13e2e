//! Position sizing.

use quantgate_core::error::SizingError;
use quantgate_core::types::{Direction, Instrument, RejectReason, RiskContext, Signal, SizingDecision};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Position sizing parameters. Fractions are of available capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizerConfig {
    /// Capital fraction risked per trade (0.01 = 1%)
    pub risk_per_trade: Decimal,
    /// Largest position notional as a fraction of capital
    pub max_position_fraction: Decimal,
    /// Take-profit distance as a multiple of the stop distance
    pub reward_ratio: Decimal,
}

impl Default for SizerConfig {
    fn default() -> Self {
        Self {
            risk_per_trade: dec!(0.01),
            max_position_fraction: dec!(0.20),
            reward_ratio: dec!(2),
        }
    }
}

/// Converts an approved signal plus a stop price into an order quantity.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    config: SizerConfig,
}

impl PositionSizer {
    /// Create a sizer with the given parameters.
    pub fn new(config: SizerConfig) -> Self {
        Self { config }
    }

    /// The parameters this sizer applies.
    pub fn config(&self) -> &SizerConfig {
        &self.config
    }

    /// Size an approved signal.
    ///
    /// `scale` is the risk gate's warning-band factor. The quantity risks
    /// `risk_per_trade × scale` of available capital against the stop
    /// distance, capped at `max_position_fraction` of capital at the
    /// reference price, then floored to the instrument's increment. A
    /// quantity that floors to zero comes back unapproved with
    /// `below_minimum_size`.
    pub fn size(
        &self,
        signal: &Signal,
        reference_price: Decimal,
        stop_loss_price: Decimal,
        scale: Decimal,
        ctx: &RiskContext,
        instrument: &Instrument,
    ) -> Result<SizingDecision, SizingError> {
        if reference_price <= Decimal::ZERO {
            return Err(SizingError::InvalidReferencePrice {
                price: reference_price,
            });
        }

        let stop_distance = (reference_price - stop_loss_price).abs();
        if stop_distance <= Decimal::ZERO {
            return Err(SizingError::InvalidStopDistance {
                distance: stop_distance,
            });
        }

        let risk_amount = ctx.available_capital * self.config.risk_per_trade * scale;
        let quantity = risk_amount / stop_distance;

        let cap = self.config.max_position_fraction * ctx.available_capital / reference_price;
        let quantity = instrument.round_down(quantity.min(cap));

        if quantity <= Decimal::ZERO {
            debug!(
                symbol = %signal.symbol,
                increment = %instrument.quantity_increment,
                "quantity floored to zero at instrument increment"
            );
            return Ok(SizingDecision::rejected(
                &signal.symbol,
                RejectReason::BelowMinimumSize,
            ));
        }

        let reward = stop_distance * self.config.reward_ratio;
        let take_profit_price = match signal.direction {
            Direction::Short => reference_price - reward,
            // Flat never reaches the sizer; treat it like long for safety
            Direction::Long | Direction::Flat => reference_price + reward,
        };

        Ok(SizingDecision::approved(
            &signal.symbol,
            quantity,
            stop_loss_price,
            take_profit_price,
        ))
    }
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(SizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantgate_core::types::Timeframe;

    fn signal(direction: Direction) -> Signal {
        Signal {
            symbol: "BTC/USDT".to_string(),
            timeframe: Timeframe::Minute5,
            direction,
            strength: 0.8,
            reference_price: 100.0,
            generated_at: 0,
            long_score: 0.8,
            short_score: 0.1,
        }
    }

    fn instrument(increment: Decimal) -> Instrument {
        Instrument::new("BTC/USDT", increment)
    }

    fn sizer() -> PositionSizer {
        PositionSizer::default()
    }

    #[test]
    fn test_worked_example_caps_at_position_fraction() {
        // $10,000 capital, 1% risk, $100 entry, $2 stop distance:
        // risk $100 / $2 = 50 units, capped at 20% * 10000 / 100 = 20.
        let ctx = RiskContext::new(dec!(10000));
        let decision = sizer()
            .size(
                &signal(Direction::Long),
                dec!(100),
                dec!(98),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap();

        assert!(decision.approved);
        assert_eq!(decision.quantity, dec!(20));
        assert_eq!(decision.stop_loss_price, Some(dec!(98)));
        // Take profit at 2x the stop distance
        assert_eq!(decision.take_profit_price, Some(dec!(104)));
    }

    #[test]
    fn test_uncapped_when_risk_is_binding() {
        // Wide stop: risk $100 / $10 = 10 units, cap is 20
        let ctx = RiskContext::new(dec!(10000));
        let decision = sizer()
            .size(
                &signal(Direction::Long),
                dec!(100),
                dec!(90),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap();

        assert_eq!(decision.quantity, dec!(10));
    }

    #[test]
    fn test_scale_reduces_risk_amount() {
        let ctx = RiskContext::new(dec!(10000));
        let decision = sizer()
            .size(
                &signal(Direction::Long),
                dec!(100),
                dec!(90),
                dec!(0.5),
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap();

        // Half of the 10 units the full risk budget would buy
        assert_eq!(decision.quantity, dec!(5));
    }

    #[test]
    fn test_short_take_profit_below_entry() {
        let ctx = RiskContext::new(dec!(10000));
        let decision = sizer()
            .size(
                &signal(Direction::Short),
                dec!(100),
                dec!(102),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap();

        assert_eq!(decision.stop_loss_price, Some(dec!(102)));
        assert_eq!(decision.take_profit_price, Some(dec!(96)));
    }

    #[test]
    fn test_zero_stop_distance_is_an_error() {
        let ctx = RiskContext::new(dec!(10000));
        let err = sizer()
            .size(
                &signal(Direction::Long),
                dec!(100),
                dec!(100),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap_err();

        assert_eq!(
            err,
            SizingError::InvalidStopDistance {
                distance: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_nonpositive_reference_price_is_an_error() {
        let ctx = RiskContext::new(dec!(10000));
        let err = sizer()
            .size(
                &signal(Direction::Long),
                Decimal::ZERO,
                dec!(98),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap_err();

        assert!(matches!(err, SizingError::InvalidReferencePrice { .. }));
    }

    #[test]
    fn test_dust_quantity_rejected_below_minimum_size() {
        // $20 capital, 1% risk = $0.20 against a $2 stop: 0.1 units,
        // floored to zero at a whole-unit increment.
        let ctx = RiskContext::new(dec!(20));
        let decision = sizer()
            .size(
                &signal(Direction::Long),
                dec!(100),
                dec!(98),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(1)),
            )
            .unwrap();

        assert!(!decision.approved);
        assert_eq!(decision.quantity, Decimal::ZERO);
        assert_eq!(
            decision.rejection_reason,
            Some(RejectReason::BelowMinimumSize)
        );
    }

    #[test]
    fn test_quantity_floors_to_increment() {
        let ctx = RiskContext::new(dec!(10000));
        let decision = sizer()
            .size(
                &signal(Direction::Long),
                dec!(97),
                dec!(94),
                Decimal::ONE,
                &ctx,
                &instrument(dec!(0.25)),
            )
            .unwrap();

        // risk $100 / $3 = 33.333..., cap 20.6185... -> floored to 20.50
        assert_eq!(decision.quantity, dec!(20.50));
    }
}
