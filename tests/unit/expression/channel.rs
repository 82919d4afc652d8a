use super::*;
use crate::expression::Expression;
use crate::features::{EyeState, EyebrowsState, MouthState};
use crate::foundation::time::Timestamp;
use crate::jitter::FixedJitter;

fn changes(ch: &mut ExpressionChannel, until: u64) -> Vec<(u64, FeatureState)> {
    let mut out = Vec::new();
    let mut last = ch.state();
    while ch.channel_mut().fire_next(Timestamp(until)) {
        if ch.state() != last {
            last = ch.state();
            out.push((ch.channel().now().0, last));
        }
    }
    out
}

#[test]
fn success_ramp_settles_without_blinking() {
    let mut ch = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    ch.select(ExpressionSelector::play(Expression::Success)).unwrap();
    let neutral = *catalogue::neutral();
    assert_eq!(ch.state(), neutral);
    assert_eq!(
        changes(&mut ch, 60_000),
        vec![
            (300, neutral.with_eyebrows(EyebrowsState::Raised)),
            (
                600,
                FeatureState::new(EyeState::Content, EyebrowsState::Raised, MouthState::OpenSmile)
            ),
        ]
    );
    assert_eq!(ch.pending_timers(), 0);
}

#[test]
fn godlike_blinks_back_to_heart_eyes() {
    let mut ch = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    ch.select(ExpressionSelector::play(Expression::GodlikeSuccess))
        .unwrap();
    let eyes: Vec<(u64, EyeState)> = changes(&mut ch, 5_700)
        .into_iter()
        .map(|(at, s)| (at, s.eyes))
        .collect();
    assert_eq!(
        eyes,
        vec![
            (400, EyeState::Normal),
            (800, EyeState::Happy),
            (1200, EyeState::Heart),
            (2400, EyeState::Content),
            (2550, EyeState::Heart),
            (5550, EyeState::Squint),
            (5620, EyeState::Content),
            (5700, EyeState::Heart),
        ]
    );
}

#[test]
fn talking_only_moves_the_mouth_after_settling() {
    let mut ch = ExpressionChannel::new(Box::new(FixedJitter::upper()));
    ch.select(ExpressionSelector::talking(Expression::Failure))
        .unwrap();
    let fired = changes(&mut ch, 10_000);
    let settled = *catalogue::definition(Expression::Failure);
    let after: Vec<_> = fired.iter().filter(|(at, _)| *at > 500).collect();
    assert!(after.len() > 10);
    for (_, state) in after {
        assert_eq!(state.eyes, settled.eyes);
        assert_eq!(state.eyebrows, settled.eyebrows);
        assert!(matches!(state.mouth, MouthState::Open | MouthState::Serious));
    }
}

#[test]
fn none_resets_to_neutral_and_drops_overlays() {
    let mut ch = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    ch.select(ExpressionSelector::talking(Expression::Happy))
        .unwrap();
    changes(&mut ch, 1_000);
    assert!(ch.pending_timers() > 0);

    ch.select(ExpressionSelector::None).unwrap();
    assert_eq!(ch.state(), *catalogue::neutral());
    assert_eq!(ch.pending_timers(), 0);
    assert!(!ch.is_active());
    assert!(changes(&mut ch, 100_000).is_empty());
}

#[test]
fn sleeping_behaves_like_neutral() {
    let mut a = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    let mut b = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    a.select(ExpressionSelector::play(Expression::Sleeping)).unwrap();
    b.select(ExpressionSelector::play(Expression::Neutral)).unwrap();
    assert_eq!(changes(&mut a, 20_000), changes(&mut b, 20_000));
}
