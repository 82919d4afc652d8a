use strum::IntoEnumIterator;

use super::*;
use crate::features::MouthState;
use crate::foundation::time::Timestamp;
use crate::jitter::FixedJitter;

#[test]
fn selector_strings_round_trip() {
    for selector in ExpressionSelector::menu() {
        let text = selector.to_string();
        assert_eq!(ExpressionSelector::parse(&text).unwrap(), selector, "{text}");
    }
    assert_eq!(
        "successTalk".parse::<ExpressionSelector>().unwrap(),
        ExpressionSelector::talking(Expression::Success)
    );
    assert_eq!(ExpressionSelector::parse("none").unwrap(), ExpressionSelector::None);
}

#[test]
fn strict_parse_rejects_unknown_names() {
    let err = ExpressionSelector::parse("smugTalk").unwrap_err();
    assert_eq!(err.to_string(), "unknown expression selector 'smugTalk'");
    assert!(ExpressionSelector::parse("Talk").is_err());
}

#[test]
fn lossy_parse_falls_back_to_neutral_and_keeps_talk() {
    assert_eq!(
        ExpressionSelector::parse_lossy("smugTalk"),
        ExpressionSelector::talking(Expression::Neutral)
    );
    assert_eq!(
        ExpressionSelector::parse_lossy("smug"),
        ExpressionSelector::play(Expression::Neutral)
    );
    assert_eq!(ExpressionSelector::parse_lossy("none"), ExpressionSelector::None);
}

#[test]
fn bare_talk_suffix_plays_talking_neutral() {
    let selector = ExpressionSelector::parse_lossy("Talk");
    let neutral_talk = ExpressionSelector::talking(Expression::Neutral);
    assert_eq!(selector, neutral_talk);
    assert_eq!(timeline(selector).unwrap(), timeline(neutral_talk).unwrap());

    let mut ch = ExpressionChannel::new(Box::new(FixedJitter::lower()));
    ch.select(selector).unwrap();
    ch.channel_mut().advance_to(Timestamp(149));
    assert_eq!(ch.state().mouth, MouthState::Serious);
    ch.channel_mut().advance_to(Timestamp(150));
    assert_eq!(ch.state().mouth, MouthState::Open);
    ch.channel_mut().advance_to(Timestamp(300));
    assert_eq!(ch.state().mouth, MouthState::Serious);
}

#[test]
fn menu_matches_control_panel() {
    let menu = ExpressionSelector::menu();
    assert_eq!(menu.len(), 1 + 9 + 9 + 9 + 8);
    assert_eq!(menu[0].label(), "None");
    assert_eq!(menu[1].label(), "Godlike Success");
    assert_eq!(menu[10].label(), "Godlike Success (Talking)");
    assert!(menu.contains(&ExpressionSelector::play(Expression::Sleeping)));
    assert!(!menu.contains(&ExpressionSelector::talking(Expression::Sleeping)));
}

#[test]
fn tiers_and_exemptions() {
    let failures: Vec<_> = Expression::iter().filter(|e| e.is_failure_tier()).collect();
    assert_eq!(
        failures,
        vec![
            Expression::MildFailure,
            Expression::Failure,
            Expression::TerribleFailure,
            Expression::TragicFailure
        ]
    );
    assert!(Expression::Love.skips_idle_blink());
    assert!(!Expression::Neutral.skips_idle_blink());
    assert!(ExpressionSelector::play(Expression::Sleeping).is_sleeping());
    assert!(!ExpressionSelector::talking(Expression::Sleeping).is_sleeping());
}

#[test]
fn serde_uses_selector_strings() {
    let json = serde_json::to_string(&ExpressionSelector::talking(Expression::GreatSuccess)).unwrap();
    assert_eq!(json, r#""greatSuccessTalk""#);
    let back: ExpressionSelector = serde_json::from_str(r#""sleeping""#).unwrap();
    assert!(back.is_sleeping());
    assert!(serde_json::from_str::<ExpressionSelector>(r#""smug""#).is_err());
}
