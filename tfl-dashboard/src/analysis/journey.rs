//! Per-mode time aggregation for journey options.

use crate::domain::{JourneyLeg, Mode};

/// Minutes spent in each mode, in the order modes first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeTotals(Vec<(Mode, i64)>);

impl ModeTotals {
    /// Total minutes for `mode` (by display name), if it appears.
    pub fn get(&self, mode: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(m, _)| m.as_str() == mode)
            .map(|(_, minutes)| *minutes)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Mode, i64)> {
        self.0.iter().map(|(m, minutes)| (m, *minutes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, mode: &Mode, minutes: i64) {
        match self.0.iter_mut().find(|(m, _)| m == mode) {
            Some((_, total)) => *total += minutes,
            None => self.0.push((mode.clone(), minutes)),
        }
    }
}

/// Sum leg durations per mode.
///
/// Each leg contributes `arrival - departure` in whole minutes, truncated
/// toward zero. Legs whose times do not parse contribute nothing and do not
/// introduce their mode.
pub fn mode_aggregate(legs: &[JourneyLeg]) -> ModeTotals {
    let mut totals = ModeTotals::default();
    for leg in legs {
        if let Some(duration) = leg.duration() {
            totals.add(&leg.mode, duration.num_minutes());
        }
    }
    totals
}
