//! Conversions from the string-typed fields of the SABnzbd queue payload
//! into plain numeric metric values.

use crate::error::{Error, Result};

pub const KIB: f64 = 1024.0;
pub const MIB: f64 = 1024.0 * 1024.0;

/// Parses a decimal string and scales it by `multiplier`.
///
/// `field` names the payload field and ends up in the error.
pub fn scaled(field: &'static str, value: &str, multiplier: f64) -> Result<f64> {
    value
        .parse::<f64>()
        .map(|v| v * multiplier)
        .map_err(|e| Error::Conversion {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// `kbpersec` to bytes per second.
pub fn kilobytes(field: &'static str, value: &str) -> Result<f64> {
    scaled(field, value, KIB)
}

/// `mb` / `mbleft` to bytes.
pub fn megabytes(field: &'static str, value: &str) -> Result<f64> {
    scaled(field, value, MIB)
}

/// Parses a clock-style `HH:MM:SS` string into a number of seconds.
///
/// Hours are unbounded, minutes and seconds must be below 60.
pub fn clock_seconds(field: &'static str, value: &str) -> Result<u64> {
    let fail = |reason: &str| Error::Conversion {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(fail("expected HH:MM:SS"));
    };

    let number = |part: &str| -> Result<u64> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("non-numeric component"));
        }
        part.parse::<u64>().map_err(|e| fail(&e.to_string()))
    };

    let hours = number(*hours)?;
    let minutes = number(*minutes)?;
    let seconds = number(*seconds)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(fail("minutes and seconds must be below 60"));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| fail("duration overflows"))
}
