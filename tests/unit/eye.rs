use super::*;
use crate::foundation::time::Timestamp;
use crate::jitter::FixedJitter;

fn trace(ch: &mut EyeChannel, until: u64) -> Vec<(u64, EyeState)> {
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
fn selector_names_and_labels() {
    assert_eq!(EyeSelector::parse("leftTwitch").unwrap(), EyeSelector::LeftTwitch);
    assert_eq!(EyeSelector::Blink.as_str(), "blink");
    assert_eq!(EyeSelector::LeftTwitch.label(), "Left Eye Twitch");
    let err = EyeSelector::parse("wink").unwrap_err();
    assert_eq!(err.to_string(), "unknown eye selector 'wink'");
    assert_eq!(EyeSelector::parse_lossy("wink"), EyeSelector::None);
}

#[test]
fn blink_is_a_double_blink_after_startup() {
    let mut ch = EyeChannel::new(Box::new(FixedJitter::lower()));
    ch.select(EyeSelector::Blink).unwrap();
    assert_eq!(ch.state(), EyeState::Normal);
    assert_eq!(
        trace(&mut ch, 5_500),
        vec![
            (1000, EyeState::Squint),
            (1070, EyeState::Content),
            (1150, EyeState::Normal),
            (1350, EyeState::Squint),
            (1420, EyeState::Content),
            (1500, EyeState::Normal),
            (5500, EyeState::Squint),
        ]
    );
}

#[test]
fn left_twitch_starts_twitching_and_takes_extra_pair_on_coin() {
    let mut ch = EyeChannel::new(Box::new(FixedJitter::lower()));
    ch.select(EyeSelector::LeftTwitch).unwrap();
    assert_eq!(ch.state(), EyeState::LeftTwitch);
    assert_eq!(
        trace(&mut ch, 2_800),
        vec![
            (1000, EyeState::Normal),
            (1800, EyeState::LeftTwitch),
            (2100, EyeState::Normal),
            (2800, EyeState::LeftTwitch),
        ]
    );

    let mut ch = EyeChannel::new(Box::new(FixedJitter::upper()));
    ch.select(EyeSelector::LeftTwitch).unwrap();
    let last = trace(&mut ch, 5_394);
    assert_eq!(last.last(), Some(&(5394, EyeState::LeftTwitch)));
    assert!(last.contains(&(4495, EyeState::Normal)));
}

#[test]
fn none_resets_to_normal_and_clears_timers() {
    let mut ch = EyeChannel::new(Box::new(FixedJitter::lower()));
    ch.select(EyeSelector::Blink).unwrap();
    trace(&mut ch, 1_070);
    assert_eq!(ch.state(), EyeState::Content);

    ch.select(EyeSelector::None).unwrap();
    assert_eq!(ch.state(), EyeState::Normal);
    assert_eq!(ch.pending_timers(), 0);
    assert!(trace(&mut ch, 60_000).is_empty());
}

#[test]
fn reselecting_keeps_the_running_timeline() {
    let mut ch = EyeChannel::new(Box::new(FixedJitter::lower()));
    ch.select(EyeSelector::LeftTwitch).unwrap();
    trace(&mut ch, 1_000);
    assert_eq!(ch.state(), EyeState::Normal);
    ch.select(EyeSelector::LeftTwitch).unwrap();
    assert_eq!(ch.state(), EyeState::Normal);
    assert_eq!(ch.selector(), EyeSelector::LeftTwitch);
}
