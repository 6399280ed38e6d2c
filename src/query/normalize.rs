use chrono::{Datelike, LocalResult, NaiveDateTime, TimeZone, Utc};

use super::error::ValidationError;
use super::types::AbsoluteTimestamp;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const SECONDS_SHAPE: &str = "dddd-dd-ddTdd:dd:dd";

// chrono's `%Y`/`%m` accept signs and single digits; only the fixed-width
// forms are allowed through.
fn has_local_shape(input: &str) -> bool {
    let fits = |shape: &str| {
        input.len() == shape.len()
            && input.bytes().zip(shape.bytes()).all(|(c, s)| match s {
                b'd' => c.is_ascii_digit(),
                _ => c == s,
            })
    };
    fits(SECONDS_SHAPE) || fits(&SECONDS_SHAPE[..16])
}

/// Interpret a wall-clock string in `zone` (the process' local zone in
/// production) and pin it to a UTC instant.
///
/// A time skipped by a DST gap is rejected; a time repeated by a DST fold
/// resolves to the earlier instant.
pub fn normalize_in<Tz: TimeZone>(
    zone: &Tz,
    input: &str,
) -> Result<AbsoluteTimestamp, ValidationError> {
    let invalid = || ValidationError::InvalidTimestamp(input.to_string());
    let trimmed = input.trim();
    if !has_local_shape(trimmed) {
        return Err(invalid());
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(invalid)?;

    let local = match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return Err(invalid()),
    };

    // The rendered form only has room for a four-digit UTC year.
    let utc = local.with_timezone(&Utc);
    if !(0..=9999).contains(&utc.year()) {
        return Err(invalid());
    }

    Ok(AbsoluteTimestamp::from_utc(utc))
}
