//! The signal pipeline.
//!
//! Composes the four stages (indicator battery, signal scorer, risk gate,
//! position sizer) for one symbol/timeframe. Pipelines for different
//! symbols run independently and share only the [`SharedRiskContext`];
//! the gate check, sizing, and cooldown bookkeeping happen inside a single
//! critical section so concurrent pipelines never race a stale snapshot.

use quantgate_core::error::EngineResult;
use quantgate_core::types::{
    BarSeries, GateVerdict, Instrument, SharedRiskContext, Signal, SizingDecision,
};
use quantgate_indicators::{IndicatorConfig, IndicatorSet};
use quantgate_risk::{PositionSizer, RiskGate, RiskLimits, SizerConfig, StopRule};
use quantgate_scoring::{ScoringProfile, SignalScorer};
use rust_decimal::Decimal;
use tracing::debug;

/// Result of pushing one bar window through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The scorer saw no tradeable setup (or coerced one to flat)
    NoTrade { signal: Signal },
    /// An actionable signal reached the risk stage
    Evaluated {
        signal: Signal,
        decision: SizingDecision,
    },
}

impl PipelineOutcome {
    /// The sizing decision, when the risk stage ran.
    pub fn decision(&self) -> Option<&SizingDecision> {
        match self {
            PipelineOutcome::Evaluated { decision, .. } => Some(decision),
            PipelineOutcome::NoTrade { .. } => None,
        }
    }

    /// The signal that produced this outcome.
    pub fn signal(&self) -> &Signal {
        match self {
            PipelineOutcome::Evaluated { signal, .. } => signal,
            PipelineOutcome::NoTrade { signal } => signal,
        }
    }
}

/// One symbol/timeframe's evaluation pipeline.
pub struct SignalPipeline {
    indicators: IndicatorSet,
    scorer: SignalScorer,
    stop_rule: StopRule,
    gate: RiskGate,
    sizer: PositionSizer,
}

impl SignalPipeline {
    /// Assemble a pipeline from its stage configurations.
    pub fn new(
        indicator_config: IndicatorConfig,
        profile: ScoringProfile,
        stop_rule: StopRule,
        limits: RiskLimits,
        sizer_config: SizerConfig,
    ) -> EngineResult<Self> {
        profile.validate()?;
        Ok(Self {
            indicators: IndicatorSet::new(indicator_config)?,
            scorer: SignalScorer::new(profile),
            stop_rule,
            gate: RiskGate::new(limits),
            sizer: PositionSizer::new(sizer_config),
        })
    }

    /// Bars needed before [`evaluate`](Self::evaluate) succeeds.
    pub fn required_lookback(&self) -> usize {
        self.indicators.required_lookback()
    }

    /// Evaluate the latest bar of a window.
    ///
    /// Pure apart from the scorer's interval state and, on approval, the
    /// context's cooldown timestamp; nothing is mutated when the signal is
    /// flat or rejected. Evaluating the identical window and context twice
    /// yields the identical outcome.
    pub fn evaluate(
        &mut self,
        series: &BarSeries,
        instrument: &Instrument,
        ctx: &SharedRiskContext,
    ) -> EngineResult<PipelineOutcome> {
        let frame = self.indicators.compute(series)?;
        let signal = self.scorer.score(series, &frame);

        if !signal.is_actionable() {
            return Ok(PipelineOutcome::NoTrade { signal });
        }

        let reference_price = decimal_from(signal.reference_price);
        let atr = decimal_from(frame.latest().atr);
        let stop_loss_price = match self
            .stop_rule
            .stop_price(reference_price, signal.direction, atr)
        {
            Some(price) => price,
            // Unreachable for actionable signals; treat as no trade
            None => return Ok(PipelineOutcome::NoTrade { signal }),
        };

        // Gate, size, and bookkeep under one lock: a concurrent pipeline
        // must not pass the same position-count or capital headroom.
        let decision = ctx.transact(|ctx| -> EngineResult<SizingDecision> {
            match self.gate.evaluate(&signal, ctx) {
                GateVerdict::Rejected(reason) => {
                    Ok(SizingDecision::rejected(&signal.symbol, reason))
                }
                GateVerdict::Approved { scale } => {
                    let decision = self.sizer.size(
                        &signal,
                        reference_price,
                        stop_loss_price,
                        scale,
                        ctx,
                        instrument,
                    )?;
                    if decision.approved {
                        ctx.record_signal(&signal.symbol, signal.generated_at);
                    }
                    Ok(decision)
                }
            }
        })?;

        debug!(
            symbol = %signal.symbol,
            approved = decision.approved,
            quantity = %decision.quantity,
            "pipeline decision"
        );

        Ok(PipelineOutcome::Evaluated { signal, decision })
    }

    /// Forget per-symbol scorer state (e.g. before a replay).
    pub fn reset(&mut self) {
        self.scorer.reset();
    }
}

/// f64 → Decimal at the scoring/risk boundary.
///
/// Non-finite inputs collapse to zero and are caught by the sizer's
/// positive-price guard.
fn decimal_from(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

impl std::fmt::Debug for SignalPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalPipeline")
            .field("lookback", &self.required_lookback())
            .field("profile", &self.scorer.profile().kind)
            .field("stop_rule", &self.stop_rule)
            .field("limits", self.gate.limits())
            .field("sizer", self.sizer.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_from_rejects_non_finite() {
        assert_eq!(decimal_from(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from(f64::INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from(1.5), Decimal::try_from(1.5).unwrap());
    }
}
