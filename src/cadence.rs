//! Designed animation cadences.
//!
//! Every timing the built-in timelines use lives here. Ranges are half-open `[min, max)`.

use crate::foundation::time::Millis;
use crate::jitter::JitterRange;
use crate::timeline::Delay;

/// Squint frame of a blink.
pub const BLINK_SQUINT: Delay = Delay::ms(70);
/// Closed frame of a blink.
pub const BLINK_CLOSED: Delay = Delay::ms(80);
/// Pause between the two halves of a double blink.
pub const BLINK_PAUSE: Delay = Delay::between(200, 300);
/// Wait before the first blink cycle.
pub const BLINK_STARTUP: Delay = Delay::between(1000, 2500);
/// Wait between blink cycles.
pub const BLINK_GAP: JitterRange = JitterRange::ms(4000, 6000);

/// Wait before the first left-twitch cycle.
pub const TWITCH_STARTUP: Delay = Delay::between(1000, 1500);
/// Wait between left-twitch cycles.
pub const TWITCH_GAP: Delay = Delay::between(5000, 8000);
/// Normal hold before the first twitch.
pub const TWITCH_FIRST_NORMAL: Delay = Delay::between(800, 1200);
/// Twitch hold after the first relaxation.
pub const TWITCH_HOLD: Delay = Delay::between(300, 500);
/// Normal hold before the second twitch.
pub const TWITCH_SECOND_NORMAL: Delay = Delay::between(700, 1000);
/// Normal hold inside the optional third pair.
pub const TWITCH_EXTRA_NORMAL: Delay = Delay::between(200, 300);
/// Twitch hold inside the optional third pair.
pub const TWITCH_EXTRA_HOLD: Delay = Delay::between(600, 900);
/// Probability of the optional third pair.
pub const TWITCH_EXTRA_CHANCE: f64 = 0.6;

/// Lead-in before a mouth talk cycle starts toggling.
pub const TALK_LEAD_IN: Delay = Delay::ms(200);
/// Per-toggle jitter of the mouth talk cycles.
pub const TALK_TOGGLE: Delay = Delay::between(30, 230);

/// Base tick of the expression talking overlay.
pub const OVERLAY_TALK_TICK: Millis = Millis(150);
/// Probability that a talking tick is redrawn.
pub const OVERLAY_TALK_WOBBLE_CHANCE: f64 = 0.3;
/// Range a redrawn talking tick is drawn from.
pub const OVERLAY_TALK_WOBBLE: JitterRange = JitterRange::ms(100, 200);
/// Extra open-mouth hold for failure-tier expressions.
pub const OVERLAY_TALK_FAILURE_HOLD: Millis = Millis(300);

/// Wait before the first idle blink of a settled expression.
pub const IDLE_BLINK_STARTUP: Delay = Delay::between(2000, 3000);
/// Start-to-start spacing of idle blinks on a settled expression.
pub const IDLE_BLINK_PERIOD: JitterRange = JitterRange::ms(4000, 6000);
/// Length of one idle blink, squint plus closed frame.
pub const IDLE_BLINK_LENGTH: u64 = 150;
/// Wait from the end of one idle blink to the start of the next.
pub const IDLE_BLINK_GAP: Delay = Delay::between(
    IDLE_BLINK_PERIOD.min.0 - IDLE_BLINK_LENGTH,
    IDLE_BLINK_PERIOD.max.0 - IDLE_BLINK_LENGTH,
);
/// Usual wait between settling and attaching the idle blink.
pub const IDLE_BLINK_ATTACH: Delay = Delay::ms(800);

/// One expression talking tick with its occasional redraw.
pub const fn talk_tick() -> Delay {
    Delay::Wobble {
        base: OVERLAY_TALK_TICK,
        chance: OVERLAY_TALK_WOBBLE_CHANCE,
        range: OVERLAY_TALK_WOBBLE,
    }
}
