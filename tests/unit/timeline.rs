use super::*;
use crate::jitter::FixedJitter;

#[test]
fn delay_bounds_cover_every_shape() {
    assert_eq!(Delay::ms(70).min(), Millis(70));
    assert_eq!(Delay::ms(70).max(), Millis(70));

    let uniform = Delay::between(200, 300);
    assert_eq!(uniform.min(), Millis(200));
    assert_eq!(uniform.max(), Millis(299));

    let wobble = Delay::Wobble {
        base: Millis(150),
        chance: 0.3,
        range: JitterRange::ms(100, 200),
    };
    assert_eq!(wobble.min(), Millis(100));
    assert_eq!(wobble.max(), Millis(199));
}

#[test]
fn wobble_uses_base_unless_coin_lands() {
    let wobble = Delay::Wobble {
        base: Millis(150),
        chance: 0.3,
        range: JitterRange::ms(100, 200),
    };
    assert_eq!(wobble.sample(&mut FixedJitter::lower()), Millis(150));
    assert_eq!(wobble.sample(&mut FixedJitter::upper()), Millis(199));
    assert_eq!(wobble.sample(&mut FixedJitter::new(0.0, true)), Millis(100));
}

#[test]
fn shifted_adds_hold_to_every_outcome() {
    let shifted = Delay::Wobble {
        base: Millis(150),
        chance: 0.3,
        range: JitterRange::ms(100, 200),
    }
    .shifted(Millis(300));
    assert_eq!(shifted.min(), Millis(400));
    assert_eq!(shifted.max(), Millis(499));
    assert_eq!(shifted.sample(&mut FixedJitter::lower()), Millis(450));
    assert_eq!(Delay::ms(10).shifted(Millis(5)), Delay::ms(15));
}

#[test]
fn builder_records_entry_and_steps_in_order() {
    let t = Timeline::builder()
        .entry(1u8)
        .emit_after(Delay::ms(10), 2)
        .maybe(0.5, |b| b.emit_after(Delay::ms(5), 3).entry(99))
        .emit(4)
        .one_shot()
        .unwrap();

    assert_eq!(t.entry(), Some(&1));
    assert_eq!(t.mode(), Mode::OneShot);
    assert!(!t.is_cyclic());
    assert_eq!(t.steps().len(), 3);
    match &t.steps()[1].action {
        Action::Maybe { chance, steps } => {
            assert_eq!(*chance, 0.5);
            assert_eq!(steps.len(), 1);
        }
        other => panic!("expected a branch, got {other:?}"),
    }
    assert_eq!(t.emitted_values(), vec![&1, &2, &3, &4]);
}

#[test]
fn overlay_values_are_reported() {
    let inner = Timeline::builder()
        .emit_after(Delay::ms(1), 'b')
        .cyclic(Delay::ZERO, Delay::ms(10))
        .unwrap();
    let outer = Timeline::builder()
        .entry('a')
        .overlay_after(Delay::ms(100), inner)
        .one_shot()
        .unwrap();
    assert_eq!(outer.emitted_values(), vec![&'a', &'b']);
}

#[test]
fn cyclic_timeline_must_advance_time() {
    let err = Timeline::builder()
        .emit(1u8)
        .cyclic(Delay::ms(100), Delay::ZERO)
        .unwrap_err();
    assert!(err.to_string().starts_with("timeline error:"));

    let err = Timeline::<u8>::builder()
        .cyclic(Delay::ZERO, Delay::ms(100))
        .unwrap_err();
    assert!(err.to_string().contains("at least one step"));

    assert!(
        Timeline::builder()
            .emit(1u8)
            .cyclic(Delay::ZERO, Delay::between(4000, 6000))
            .is_ok()
    );
}

#[test]
fn chances_outside_unit_interval_are_rejected() {
    assert!(
        Timeline::builder()
            .maybe(1.5, |b| b.emit(1u8))
            .one_shot()
            .is_err()
    );
    let bad_wobble = Delay::Wobble {
        base: Millis(10),
        chance: -0.1,
        range: JitterRange::ms(1, 2),
    };
    assert!(
        Timeline::builder()
            .emit_after(bad_wobble, 1u8)
            .one_shot()
            .is_err()
    );
}

#[test]
fn invalid_overlay_poisons_parent() {
    let inner = Timeline {
        entry: None,
        steps: vec![Step {
            delay: Delay::ZERO,
            action: Action::Emit(1u8),
        }],
        mode: Mode::Cyclic {
            initial: Delay::ZERO,
            gap: Delay::ZERO,
        },
    };
    assert!(
        Timeline::builder()
            .overlay_after(Delay::ZERO, inner)
            .one_shot()
            .is_err()
    );
}
