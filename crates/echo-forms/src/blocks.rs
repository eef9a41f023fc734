//! Lesion observation block generation.

use echo_core::models::record::LesionObservation;

pub const MIN_LESIONS: i64 = 1;
pub const MAX_LESIONS: i64 = 50;

pub fn clamp_lesion_count(count: i64) -> u32 {
    // Bounded to [1, 50], so the cast cannot truncate.
    count.clamp(MIN_LESIONS, MAX_LESIONS) as u32
}

/// Leading-integer parse of the raw count input. `None` for input that does
/// not start with a number, which collapses the block container.
pub fn parse_lesion_count(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Fresh, empty blocks for `count` lesions, clamped to the allowed range.
pub fn generate_blocks(count: i64) -> Vec<LesionObservation> {
    (1..=clamp_lesion_count(count))
        .map(LesionObservation::blank)
        .collect()
}
