use super::*;
use crate::emote::{EmoteConfig, EmoteSelector};
use crate::features::{EyeState, EyebrowsState, FeatureState, MouthState};

fn frame(at: u64, eyes: EyeState) -> AnimationFrame {
    AnimationFrame {
        at: Timestamp(at),
        features: FeatureState::new(eyes, EyebrowsState::Serious, MouthState::Serious),
        emote: EmoteOverlay::default(),
    }
}

#[test]
fn in_memory_sink_collects_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(&AvatarConfig::default()).unwrap();
    sink.push_frame(&frame(0, EyeState::Normal)).unwrap();
    sink.push_frame(&frame(70, EyeState::Squint)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[1].at, Timestamp(70));
    assert!(sink.avatar().is_some());
}

#[test]
fn json_lines_carry_renderer_input() {
    let mut avatar = AvatarConfig::default();
    avatar
        .extra
        .insert("skinTone".to_owned(), serde_json::json!("light"));
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.begin(&avatar).unwrap();
    sink.push_frame(&frame(0, EyeState::Normal)).unwrap();
    let mut sleepy = frame(150, EyeState::Content);
    sleepy.emote = EmoteOverlay {
        emote: EmoteSelector::Sleep,
        config: EmoteConfig::derive(EmoteSelector::Sleep, Default::default()),
    };
    sink.push_frame(&sleepy).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.lines(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[1]["at"], 150);
    assert_eq!(lines[1]["avatar"]["eyes"], "content");
    assert_eq!(lines[1]["avatar"]["skinTone"], "light");
    assert_eq!(lines[1]["emote"]["emote"], "sleep");
    assert_eq!(lines[1]["emote"]["config"]["zDelay"], 0.2);
}
