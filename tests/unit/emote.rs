use super::*;
use crate::expression::Expression;

#[test]
fn surprise_without_expression() {
    let c = EmoteConfig::derive(EmoteSelector::Surprise, ExpressionSelector::None);
    assert_eq!(
        c,
        EmoteConfig {
            show_emote: true,
            z_delay: None,
            surprise_delay: Some(0.1),
            question_delay: None,
        }
    );
    assert_eq!(
        serde_json::to_string(&c).unwrap(),
        r#"{"showEmote":true,"surpriseDelay":0.1}"#
    );
}

#[test]
fn sleeping_expression_shows_zzz() {
    let sleeping = ExpressionSelector::play(Expression::Sleeping);
    let c = EmoteConfig::derive(EmoteSelector::None, sleeping);
    assert_eq!(
        serde_json::to_string(&c).unwrap(),
        r#"{"showEmote":true,"zDelay":0.2}"#
    );

    let talking = ExpressionSelector::talking(Expression::Sleeping);
    assert!(!EmoteConfig::derive(EmoteSelector::None, talking).show_emote);
}

#[test]
fn question_and_none() {
    let q = EmoteConfig::derive(EmoteSelector::Question, ExpressionSelector::None);
    assert_eq!(q.question_delay, Some(QUESTION_DELAY_SECS));
    assert!(q.show_emote);
    assert_eq!(
        EmoteConfig::derive(EmoteSelector::None, ExpressionSelector::play(Expression::Happy)),
        EmoteConfig::default()
    );
}

#[test]
fn channel_recomputes_on_either_input() {
    let mut ch = EmoteChannel::new();
    assert_eq!(ch.overlay().glyph(), None);
    ch.observe_expression(ExpressionSelector::play(Expression::Sleeping));
    assert_eq!(ch.overlay().glyph(), Some(EmoteSelector::Sleep));
    ch.select(EmoteSelector::Surprise);
    let overlay = ch.overlay();
    assert_eq!(overlay.glyph(), Some(EmoteSelector::Sleep));
    assert_eq!(overlay.config.z_delay, Some(0.2));
    assert_eq!(overlay.config.surprise_delay, Some(0.1));
    ch.observe_expression(ExpressionSelector::None);
    assert_eq!(ch.overlay().glyph(), Some(EmoteSelector::Surprise));
    ch.select(EmoteSelector::None);
    assert!(!ch.overlay().config.show_emote);
}

#[test]
fn selector_parsing() {
    assert_eq!(EmoteSelector::parse("question").unwrap(), EmoteSelector::Question);
    assert_eq!(EmoteSelector::parse_lossy("heart"), EmoteSelector::None);
    assert_eq!(
        EmoteSelector::parse("heart").unwrap_err().to_string(),
        "unknown emote selector 'heart'"
    );
    assert_eq!(EmoteSelector::Sleep.label(), "Sleep (ZZZ)");
}

#[test]
fn sleeping_expression_draws_zzz_over_any_emote() {
    let sleeping = ExpressionSelector::play(Expression::Sleeping);
    for emote in EmoteSelector::ALL {
        let overlay = EmoteOverlay {
            emote,
            config: EmoteConfig::derive(emote, sleeping),
        };
        assert_eq!(overlay.glyph(), Some(EmoteSelector::Sleep), "{emote}");
    }
    let awake = EmoteOverlay {
        emote: EmoteSelector::Question,
        config: EmoteConfig::derive(EmoteSelector::Question, ExpressionSelector::None),
    };
    assert_eq!(awake.glyph(), Some(EmoteSelector::Question));
}
