use crate::domain::error::DomainError;
use chrono::NaiveTime;

/// Normalized daily fire times: distinct, ascending, never empty.
///
/// Raw configuration entries are trimmed and blank ones dropped; whatever
/// remains must be strict zero-padded 24-hour "HH:MM". An entirely empty
/// configuration silently falls back to the default two-time schedule so the
/// service always has something to run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTable {
    times: Vec<NaiveTime>,
}

impl TimeTable {
    pub fn parse(raw: &[String]) -> Result<Self, DomainError> {
        let mut times: Vec<NaiveTime> = Vec::new();
        for entry in raw {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                continue;
            }
            let time = parse_hhmm(trimmed)
                .ok_or_else(|| DomainError::InvalidTimeFormat(trimmed.to_string()))?;
            if !times.contains(&time) {
                times.push(time);
            }
        }
        times.sort();

        if times.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { times })
    }

    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// Earliest time of day; the table is never empty.
    pub fn first(&self) -> NaiveTime {
        self.times[0]
    }

    pub fn position_of(&self, time: NaiveTime) -> Option<usize> {
        self.times.iter().position(|t| *t == time)
    }
}

impl Default for TimeTable {
    fn default() -> Self {
        Self {
            times: vec![
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            ],
        }
    }
}

/// Strict "HH:MM": exactly five characters, zero-padded, 24-hour.
fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !(bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit())
    {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
