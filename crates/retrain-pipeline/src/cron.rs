//! Cron-lite schedule parser.
//!
//! 5-field expressions: "MIN HOUR DOM MON DOW". Minute and hour
//! accept `*`, `*/N`, `N`, and comma lists; the calendar fields only
//! accept `*` (the pipeline runs daily-grained schedules). No cron
//! crate dependency.

use chrono::{DateTime, Duration, Timelike, Utc};
use retrain_core::{Result, RetrainError};

/// A parsed schedule. Parse once, ask for fire times repeatedly.
#[derive(Debug, Clone)]
pub struct Schedule {
    expression: String,
    minutes: Vec<u32>,
    hours: Vec<u32>,
}

impl Schedule {
    /// Parse a 5-field cron-lite expression.
    pub fn parse(expression: &str) -> Result<Self> {
        let parts: Vec<&str> = expression.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(RetrainError::Config(format!(
                "invalid schedule '{expression}': need 5 fields (MIN HOUR DOM MON DOW)"
            )));
        }
        for calendar_field in &parts[2..5] {
            if *calendar_field != "*" {
                return Err(RetrainError::Config(format!(
                    "invalid schedule '{expression}': only '*' is supported for DOM/MON/DOW"
                )));
            }
        }

        let minutes = parse_field(parts[0], 0, 59).ok_or_else(|| {
            RetrainError::Config(format!("invalid minute field '{}'", parts[0]))
        })?;
        let hours = parse_field(parts[1], 0, 23).ok_or_else(|| {
            RetrainError::Config(format!("invalid hour field '{}'", parts[1]))
        })?;

        Ok(Self {
            expression: expression.to_string(),
            minutes,
            hours,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Next fire time strictly after `after`. Scans minute by minute,
    /// up to 48 hours ahead — enough for any min/hour pattern.
    pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut candidate = (after + Duration::minutes(1))
            .with_second(0)
            .unwrap_or(after)
            .with_nanosecond(0)
            .unwrap_or(after);

        for _ in 0..(48 * 60) {
            if self.minutes.contains(&candidate.minute()) && self.hours.contains(&candidate.hour())
            {
                return Some(candidate);
            }
            candidate += Duration::minutes(1);
        }
        None
    }
}

/// Expand one field into its matching values within [min, max].
fn parse_field(field: &str, min: u32, max: u32) -> Option<Vec<u32>> {
    if field == "*" {
        return Some((min..=max).collect());
    }

    if let Some(step) = field.strip_prefix("*/") {
        let n: u32 = step.parse().ok()?;
        if n == 0 {
            return None;
        }
        return Some((min..=max).step_by(n as usize).collect());
    }

    if field.contains(',') {
        let values: std::result::Result<Vec<u32>, _> =
            field.split(',').map(|s| s.trim().parse()).collect();
        let values: Vec<u32> = values.ok()?;
        if values.iter().any(|v| *v < min || *v > max) {
            return None;
        }
        return Some(values);
    }

    let n: u32 = field.parse().ok()?;
    (min..=max).contains(&n).then(|| vec![n])
}
