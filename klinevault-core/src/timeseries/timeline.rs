use chrono::{DateTime, Months, Utc};

use crate::{Interval, VaultError};

/// Every tick `start + k·interval` that is strictly before `end`.
///
/// Fixed-length intervals step by a constant duration. `1mo` ticks are
/// `start + k` calendar months measured from `start`, so a start on the
/// 31st clamps to shorter months without drifting.
///
/// # Errors
/// - `InvalidInterval` if `start > end`.
/// - `InvalidArg` if a tick cannot be represented.
pub fn canonical_timeline(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Interval,
) -> Result<Vec<DateTime<Utc>>, VaultError> {
    if start > end {
        return Err(VaultError::invalid_interval(start, end));
    }
    let overflow = || VaultError::InvalidArg(format!("{interval} tick overflows after {start}"));

    let mut ticks = Vec::new();
    if let Some(step) = interval.fixed_step() {
        let span = (end - start).num_seconds();
        if let Some(n) = interval.seconds().and_then(|s| usize::try_from(span / s).ok()) {
            ticks.reserve(n + 1);
        }
        let mut t = start;
        while t < end {
            ticks.push(t);
            t = t.checked_add_signed(step).ok_or_else(overflow)?;
        }
    } else {
        let mut k: u32 = 0;
        loop {
            let t = start
                .checked_add_months(Months::new(k))
                .ok_or_else(overflow)?;
            if t >= end {
                break;
            }
            ticks.push(t);
            k = k.checked_add(1).ok_or_else(overflow)?;
        }
    }
    Ok(ticks)
}
