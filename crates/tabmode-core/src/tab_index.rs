//! Tab index arithmetic with wraparound.

use crate::error::{Result, TabmodeError};
use crate::mode::OffsetMode;

/// Turn a typed magnitude into a tab index in `0..tab_count`.
///
/// A missing magnitude counts as 1. `Absolute` (and `Idle`, where nothing
/// chose a direction) takes the magnitude as a raw 0-based index; `Left` and
/// `Right` offset from `current_index`. Out-of-range targets wrap.
pub fn resolve(
    magnitude: Option<i64>,
    mode: OffsetMode,
    current_index: usize,
    tab_count: usize,
) -> Result<usize> {
    if tab_count == 0 {
        return Err(TabmodeError::NoTabsOpen);
    }
    let magnitude = i128::from(magnitude.unwrap_or(1));
    let current = current_index as i128;
    let target = match mode {
        OffsetMode::Absolute | OffsetMode::Idle => magnitude,
        OffsetMode::Left => current - magnitude,
        OffsetMode::Right => current + magnitude,
    };
    Ok(target.rem_euclid(tab_count as i128) as usize)
}
