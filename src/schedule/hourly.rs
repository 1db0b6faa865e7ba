use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use strum::EnumIter;

use crate::parser::time_range::TimeRange;

pub const SLOTS_PER_DAY: usize = 24;

/// Power status of one hour slot.
///
/// Only `Yes` and `No` are produced from the table; the rest are part of the published vocabulary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Yes,
    Maybe,
    No,
    First,
    Second,
}

/// Status of each of the 24 slots of a day.
/// Slot `k` (1-based) covers the clock hour `[k-1, k)`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HourlySchedule([SlotStatus; SLOTS_PER_DAY]);

impl Default for HourlySchedule {
    fn default() -> Self {
        Self::all_yes()
    }
}

impl HourlySchedule {
    pub fn all_yes() -> Self {
        Self([SlotStatus::Yes; SLOTS_PER_DAY])
    }

    /// Marks every hour covered by `ranges` as `No`.
    pub fn from_ranges(ranges: &[TimeRange]) -> Self {
        let mut schedule = Self::all_yes();
        for &range in ranges {
            schedule.mark(range, SlotStatus::No);
        }
        schedule
    }

    pub fn mark(&mut self, range: TimeRange, status: SlotStatus) {
        for hour in range.hours() {
            self.0[usize::from(hour)] = status;
        }
    }

    /// Status of the 1-based `slot`.
    pub fn slot(&self, slot: usize) -> Option<SlotStatus> {
        slot.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    /// `(slot, status)` pairs with 1-based slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SlotStatus)> + '_ {
        (1..).zip(self.0.iter().copied())
    }
}

impl Serialize for HourlySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SLOTS_PER_DAY))?;
        for (slot, status) in self.iter() {
            map.serialize_entry(&slot.to_string(), &status)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::{HourlySchedule, SlotStatus};
    use crate::parser::time_range::TimeRange;

    fn build(ranges: &[(u8, u8)]) -> HourlySchedule {
        HourlySchedule::from_ranges(
            &ranges
                .iter()
                .map(|&(s, e)| TimeRange::new(s, e).unwrap())
                .collect_vec(),
        )
    }

    fn off_slots(schedule: &HourlySchedule) -> Vec<usize> {
        schedule
            .iter()
            .filter(|&(_, status)| status == SlotStatus::No)
            .map(|(slot, _)| slot)
            .collect()
    }

    #[test]
    fn plain_range() {
        let schedule = build(&[(4, 8)]);
        assert_eq!(off_slots(&schedule), [5, 6, 7, 8]);
        assert_eq!(schedule.iter().count(), 24);
        assert_eq!(schedule.slot(4), Some(SlotStatus::Yes));
        assert_eq!(schedule.slot(5), Some(SlotStatus::No));
        assert_eq!(schedule.slot(0), None);
        assert_eq!(schedule.slot(25), None);
    }

    #[test]
    fn wraps_midnight() {
        assert_eq!(off_slots(&build(&[(23, 2)])), [1, 2, 24]);
    }

    #[test]
    fn end_of_day() {
        assert_eq!(off_slots(&build(&[(0, 4), (23, 24)])), [1, 2, 3, 4, 24]);
    }

    #[test]
    fn degenerate_range() {
        assert_eq!(build(&[(5, 5)]), HourlySchedule::all_yes());
        assert_eq!(build(&[]), HourlySchedule::all_yes());
    }

    #[test]
    fn overlaps_never_unmark() {
        let a = build(&[(4, 8), (6, 10)]);
        let b = build(&[(6, 10), (4, 8)]);
        assert_eq!(a, b);
        assert_eq!(off_slots(&a), (5..=10).collect_vec());
    }

    #[test]
    fn serializes_all_slots_in_order() {
        let json = serde_json::to_string(&build(&[(0, 1)])).unwrap();
        assert!(json.starts_with(r#"{"1":"no","2":"yes","3":"yes""#), "{json}");
        assert!(json.ends_with(r#""23":"yes","24":"yes"}"#), "{json}");
        let value = serde_json::to_value(build(&[(0, 1)])).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 24);
    }
}
