use super::*;
use crate::foundation::time::Millis;
use crate::jitter::{FixedJitter, SeededJitter};

fn drain(engine: &mut Engine<u8>, until: u64) -> Vec<(u64, u8)> {
    let mut out = Vec::new();
    loop {
        let mut fired = Vec::new();
        if !engine.fire_next(Timestamp(until), |v| fired.push(*v)) {
            break;
        }
        let at = engine.now().0;
        out.extend(fired.into_iter().map(|v| (at, v)));
    }
    out
}

#[test]
fn one_shot_emits_entry_then_steps_and_retires() {
    let t = Timeline::builder()
        .entry(0u8)
        .emit_after(Delay::ms(300), 1)
        .emit_after(Delay::ms(300), 2)
        .one_shot()
        .unwrap();
    let mut engine = Engine::new(FixedJitter::lower());
    let mut entry = Vec::new();
    let handle = engine.start(&t, |v| entry.push(*v));
    assert_eq!(entry, vec![0]);
    assert_eq!(engine.pending_timers(), 1);
    assert_eq!(engine.next_due(), Some(Timestamp(300)));

    assert_eq!(drain(&mut engine, 10_000), vec![(300, 1), (600, 2)]);
    assert!(!engine.is_live(&handle));
    assert_eq!(engine.pending_timers(), 0);
    assert_eq!(engine.cancel(handle), 0);
}

#[test]
fn cyclic_waits_initial_then_repeats_after_gap() {
    let t = Timeline::builder()
        .emit_after(Delay::ms(10), 1u8)
        .emit_after(Delay::ms(5), 2)
        .cyclic(Delay::ms(100), Delay::ms(50))
        .unwrap();
    let mut engine = Engine::new(FixedJitter::lower());
    let handle = engine.start(&t, |_| panic!("no entry"));
    assert_eq!(
        drain(&mut engine, 250),
        vec![(110, 1), (115, 2), (175, 1), (180, 2), (240, 1), (245, 2)]
    );
    assert!(engine.is_live(&handle));
    assert_eq!(engine.pending_timers(), 1);
    assert_eq!(engine.cancel(handle), 1);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn cancel_purges_overlay_timers_too() {
    let overlay = Timeline::builder()
        .emit_after(Delay::ms(20), 9u8)
        .cyclic(Delay::ms(10), Delay::ms(20))
        .unwrap();
    let t = Timeline::builder()
        .entry(0u8)
        .emit_after(Delay::ms(100), 1)
        .overlay_after(Delay::ms(50), overlay)
        .emit_after(Delay::ms(1_000), 2)
        .one_shot()
        .unwrap();
    let mut engine = Engine::new(FixedJitter::lower());
    let handle = engine.start(&t, |_| {});
    let fired = drain(&mut engine, 200);
    assert_eq!(fired, vec![(100, 1), (180, 9)]);
    assert_eq!(engine.pending_timers(), 2);

    assert_eq!(engine.cancel(handle), 2);
    let mut after = Vec::new();
    engine.advance_to(Timestamp(100_000), |v| after.push(*v));
    assert!(after.is_empty());
    assert_eq!(engine.now(), Timestamp(100_000));
}

#[test]
fn overlay_outlives_finished_main_track() {
    let overlay = Timeline::builder()
        .entry(5u8)
        .emit_after(Delay::ms(10), 6)
        .cyclic(Delay::ms(10), Delay::ms(10))
        .unwrap();
    let t = Timeline::builder()
        .emit_after(Delay::ms(1), 1u8)
        .overlay_after(Delay::ms(1), overlay)
        .one_shot()
        .unwrap();
    let mut engine = Engine::new(FixedJitter::lower());
    let handle = engine.start(&t, |_| {});
    assert_eq!(drain(&mut engine, 40), vec![(1, 1), (2, 5), (22, 6)]);
    assert!(engine.is_live(&handle));
    assert_eq!(engine.cancel(handle), 1);
}

#[test]
fn maybe_branch_follows_the_coin() {
    let t = Timeline::builder()
        .emit_after(Delay::ms(10), 1u8)
        .maybe(0.6, |b| b.emit_after(Delay::ms(5), 2).emit_after(Delay::ms(5), 3))
        .emit_after(Delay::ms(1), 4)
        .one_shot()
        .unwrap();

    let mut taken = Engine::new(FixedJitter::upper());
    let _h = taken.start(&t, |_| {});
    assert_eq!(drain(&mut taken, 100), vec![(10, 1), (15, 2), (20, 3), (21, 4)]);

    let mut skipped = Engine::new(FixedJitter::lower());
    let _h = skipped.start(&t, |_| {});
    assert_eq!(drain(&mut skipped, 100), vec![(10, 1), (11, 4)]);
}

#[test]
fn same_instant_steps_keep_schedule_order() {
    let t = Timeline::builder()
        .emit_after(Delay::ms(5), 1u8)
        .emit(2)
        .emit(3)
        .one_shot()
        .unwrap();
    let mut engine = Engine::new(FixedJitter::lower());
    let _h = engine.start(&t, |_| {});
    assert_eq!(drain(&mut engine, 5), vec![(5, 1), (5, 2), (5, 3)]);
}

#[test]
fn executions_are_independent() {
    let a = Timeline::builder()
        .emit_after(Delay::ms(10), 1u8)
        .cyclic(Delay::ZERO, Delay::ms(10))
        .unwrap();
    let b = Timeline::builder()
        .emit_after(Delay::ms(15), 2u8)
        .cyclic(Delay::ZERO, Delay::ms(15))
        .unwrap();
    let mut engine = Engine::new(SeededJitter::new(1));
    let ha = engine.start(&a, |_| {});
    let hb = engine.start(&b, |_| {});
    assert_ne!(ha.id(), hb.id());
    assert_eq!(engine.cancel(ha), 1);
    assert!(engine.is_live(&hb));
    let fired = drain(&mut engine, 60);
    assert_eq!(fired, vec![(15, 2), (45, 2)]);
}

#[test]
fn clock_never_moves_backwards() {
    let mut engine: Engine<u8> = Engine::new(FixedJitter::lower());
    engine.advance_to(Timestamp(500), |_| {});
    engine.advance_to(Timestamp(100), |_| {});
    assert_eq!(engine.now(), Timestamp(500));
    assert_eq!(engine.now() + Millis(1), Timestamp(501));
}
