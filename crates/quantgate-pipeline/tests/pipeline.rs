//! End-to-end pipeline scenarios.

use quantgate_core::error::EngineError;
use quantgate_core::types::{
    Bar, BarSeries, Direction, Instrument, RejectReason, RiskContext, SharedRiskContext,
    Timeframe,
};
use quantgate_indicators::IndicatorConfig;
use quantgate_pipeline::{PipelineOutcome, SignalPipeline};
use quantgate_risk::{RiskLimits, SizerConfig, StopRule};
use quantgate_scoring::{ProfileKind, ScoringProfile};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const STEP: i64 = 300_000;

fn push_bar(series: &mut BarSeries, i: usize, close: f64, volume: f64) {
    series.push(Bar::new(
        (i as i64 + 1) * STEP,
        close - 0.1,
        close + 0.3,
        close - 0.4,
        close,
        volume,
    ));
}

/// Flat base, then a climb with a shallow pullback every third bar; volume
/// spikes on the final bar. Scores long with the scalping profile.
fn trending_series(bars: usize) -> BarSeries {
    let mut series = BarSeries::new("BTC/USDT", Timeframe::Minute5);
    let mut price = 100.0;
    for i in 0..bars {
        if i >= 40 {
            price += if i % 3 == 2 { -0.4 } else { 0.4 };
        }
        let volume = if i + 1 == bars { 3000.0 } else { 1000.0 };
        push_bar(&mut series, i, price, volume);
    }
    series
}

fn pipeline_with(profile: ScoringProfile, limits: RiskLimits) -> SignalPipeline {
    SignalPipeline::new(
        IndicatorConfig::default(),
        profile,
        StopRule::default(),
        limits,
        SizerConfig::default(),
    )
    .expect("valid pipeline configuration")
}

fn pipeline() -> SignalPipeline {
    pipeline_with(
        ScoringProfile::for_kind(ProfileKind::Scalping),
        RiskLimits::default(),
    )
}

fn instrument() -> Instrument {
    Instrument::new("BTC/USDT", dec!(0.01))
}

fn shared(capital: Decimal) -> SharedRiskContext {
    SharedRiskContext::new(RiskContext::new(capital))
}

#[test]
fn short_window_fails_with_insufficient_data() {
    let mut pipeline = pipeline();
    let series = trending_series(40);

    let err = pipeline
        .evaluate(&series, &instrument(), &shared(dec!(10000)))
        .unwrap_err();

    match err {
        EngineError::Indicator(inner) => {
            assert_eq!(inner.to_string(), "Insufficient data: need 55 bars, have 40");
        }
        other => panic!("expected indicator error, got {other}"),
    }
}

#[test]
fn long_setup_produces_bounded_approved_order() {
    let mut pipeline = pipeline();
    let series = trending_series(80);
    let ctx = shared(dec!(10000));

    let outcome = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();
    let decision = outcome.decision().expect("risk stage should run").clone();
    let signal = outcome.signal();

    assert_eq!(signal.direction, Direction::Long);
    assert!(decision.approved);
    assert!(decision.quantity > Decimal::ZERO);

    // Never larger than the position-fraction cap at the entry price
    let reference = Decimal::try_from(signal.reference_price).unwrap();
    let cap = dec!(0.20) * dec!(10000) / reference;
    assert!(decision.quantity <= cap);

    // Long: stop below entry, take profit above, at the 2:1 reward ratio
    let stop = decision.stop_loss_price.unwrap();
    let take_profit = decision.take_profit_price.unwrap();
    assert!(stop < reference);
    assert!(take_profit > reference);
    assert_eq!(take_profit - reference, (reference - stop) * dec!(2));

    // Approval recorded the cooldown timestamp
    assert_eq!(
        ctx.snapshot().last_signal_at("BTC/USDT"),
        Some(signal.generated_at)
    );
}

#[test]
fn daily_loss_limit_rejects_any_signal() {
    let mut pipeline = pipeline();
    let series = trending_series(80);

    // 3.5% realized today against a 3% limit
    let ctx = SharedRiskContext::new(
        RiskContext::new(dec!(10000)).with_drawdowns(dec!(0.035), dec!(0.035)),
    );

    let outcome = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();
    let decision = outcome.decision().expect("risk stage should run");

    assert!(!decision.approved);
    assert_eq!(decision.rejection_reason, Some(RejectReason::DailyLossLimit));
    // Rejection leaves no bookkeeping behind
    assert_eq!(ctx.snapshot().last_signal_at("BTC/USDT"), None);
}

#[test]
fn position_count_boundary_is_exact() {
    let series = trending_series(80);
    let limits = RiskLimits::default();

    let mut pipeline = pipeline();
    let mut ctx = RiskContext::new(dec!(10000));
    ctx.open_position_count = limits.max_positions - 1;
    let outcome = pipeline
        .evaluate(&series, &instrument(), &SharedRiskContext::new(ctx))
        .unwrap();
    assert!(outcome.decision().unwrap().approved);

    let mut pipeline = pipeline();
    let mut ctx = RiskContext::new(dec!(10000));
    ctx.open_position_count = limits.max_positions;
    let outcome = pipeline
        .evaluate(&series, &instrument(), &SharedRiskContext::new(ctx))
        .unwrap();
    assert_eq!(
        outcome.decision().unwrap().rejection_reason,
        Some(RejectReason::MaxPositions)
    );
}

#[test]
fn identical_inputs_yield_identical_decisions() {
    let mut pipeline = pipeline();
    let series = trending_series(80);
    let ctx = shared(dec!(10000));

    let first = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();
    let second = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();

    assert_eq!(first, second);
    assert!(first.decision().unwrap().approved);
}

#[test]
fn second_signal_three_bars_later_is_coerced_flat() {
    // min_signal_interval = 5 bars
    let mut profile = ScoringProfile::for_kind(ProfileKind::Scalping);
    profile.min_signal_interval = 5;
    let mut pipeline = pipeline_with(profile, RiskLimits::default());
    let ctx = shared(dec!(10000));

    let series = trending_series(80);
    let first = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();
    assert_eq!(first.signal().direction, Direction::Long);
    assert!(first.decision().unwrap().approved);

    // 3 bars later the climb resumes: still a long setup, but inside the
    // 5-bar minimum interval.
    let mut extended = trending_series(80);
    let last_close = extended.last().unwrap().close;
    push_bar(&mut extended, 80, last_close - 0.4, 1000.0);
    push_bar(&mut extended, 81, last_close, 1000.0);
    push_bar(&mut extended, 82, last_close + 0.4, 3000.0);

    let second = pipeline.evaluate(&extended, &instrument(), &ctx).unwrap();
    match second {
        PipelineOutcome::NoTrade { signal } => {
            assert_eq!(signal.direction, Direction::Flat);
            // The underlying setup was still above activation
            assert!(signal.long_score >= 0.6);
        }
        PipelineOutcome::Evaluated { .. } => panic!("expected the signal to be coerced flat"),
    }
}

#[test]
fn gate_cooldown_rejects_when_scorer_interval_disabled() {
    // No scorer-level suppression; the gate's 10-minute cooldown governs
    let mut profile = ScoringProfile::for_kind(ProfileKind::Scalping);
    profile.min_signal_interval = 0;
    let limits = RiskLimits {
        cooldown_secs: 600,
        ..Default::default()
    };
    let mut pipeline = pipeline_with(profile, limits);
    let ctx = shared(dec!(10000));

    let series = trending_series(80);
    let first = pipeline.evaluate(&series, &instrument(), &ctx).unwrap();
    assert!(first.decision().unwrap().approved);

    // One bar (5 minutes) later: long setup again, cooldown still active
    let mut extended = trending_series(80);
    let last_close = extended.last().unwrap().close;
    push_bar(&mut extended, 80, last_close + 0.4, 3000.0);

    let second = pipeline.evaluate(&extended, &instrument(), &ctx).unwrap();
    let decision = second.decision().expect("risk stage should run");
    assert!(!decision.approved);
    assert_eq!(decision.rejection_reason, Some(RejectReason::CooldownActive));
}

#[test]
fn drawdown_in_warning_band_scales_quantity_down() {
    let series = trending_series(80);

    // Lift the position-fraction cap so the risk budget is what binds
    let wide_cap = SizerConfig {
        max_position_fraction: dec!(1),
        ..Default::default()
    };
    let build = || {
        SignalPipeline::new(
            IndicatorConfig::default(),
            ScoringProfile::for_kind(ProfileKind::Scalping),
            StopRule::default(),
            RiskLimits::default(),
            wide_cap.clone(),
        )
        .expect("valid pipeline configuration")
    };

    let mut full = build();
    let outcome = full
        .evaluate(&series, &instrument(), &shared(dec!(10000)))
        .unwrap();
    let full_quantity = outcome.decision().unwrap().quantity;

    // Daily drawdown midway through the warning band: half the risk budget
    let mut scaled = build();
    let ctx = SharedRiskContext::new(
        RiskContext::new(dec!(10000)).with_drawdowns(dec!(0.0225), dec!(0.0225)),
    );
    let outcome = scaled.evaluate(&series, &instrument(), &ctx).unwrap();
    let scaled_decision = outcome.decision().unwrap().clone();

    assert!(scaled_decision.approved);
    assert!(scaled_decision.quantity < full_quantity);
    // Within a rounding increment of exactly half
    let half = full_quantity / dec!(2);
    assert!((scaled_decision.quantity - half).abs() <= dec!(0.01));
}
