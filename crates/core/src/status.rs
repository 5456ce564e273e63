//! Screening display-status derivation.
//!
//! A screening's effective status is always a pure function of its calendar
//! date, its "HH:MM" time-of-day and the current instant. The `statut`
//! column in the database is an advisory cache refreshed by the batch pass
//! in `cinebook-db`; read paths must recompute through this module and never
//! trust the stored value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Display status of a screening, serialized with the French labels the
/// frontend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningStatus {
    #[serde(rename = "à venir")]
    AVenir,
    #[serde(rename = "terminée")]
    Terminee,
}

impl ScreeningStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScreeningStatus::AVenir => "à venir",
            ScreeningStatus::Terminee => "terminée",
        }
    }

    /// Compute the status of a screening scheduled on `date` at `heure`
    /// relative to `now`.
    ///
    /// The screening instant is `date` at `heure` with seconds zeroed.
    /// Strictly before `now` means "terminée"; an exactly equal instant is
    /// still "à venir".
    pub fn compute(
        date: NaiveDate,
        heure: &str,
        now: DateTime<Utc>,
    ) -> Result<ScreeningStatus, CoreError> {
        let (hour, minute) = parse_heure(heure)?;
        let instant = date
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| CoreError::Validation(format!("Heure invalide: {heure}")))?
            .and_utc();

        if instant < now {
            Ok(ScreeningStatus::Terminee)
        } else {
            Ok(ScreeningStatus::AVenir)
        }
    }
}

impl std::fmt::Display for ScreeningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a zero-padded `"HH:MM"` time-of-day into hour and minute.
///
/// Rejects anything that is not exactly two digits, a colon, and two digits,
/// or whose hour/minute fall outside 00-23 / 00-59.
pub fn parse_heure(heure: &str) -> Result<(u32, u32), CoreError> {
    let invalid = || CoreError::Validation(format!("Heure invalide: {heure} (attendu HH:MM)"));

    let bytes = heure.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return Err(invalid());
    }

    let hour: u32 = heure[..2].parse().map_err(|_| invalid())?;
    let minute: u32 = heure[3..].parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}
