use serde::Serialize;
use serde_json::Value;

use crate::schedule::aggregate::AggregateResult;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DiffOutcome {
    Unchanged,
    Changed,
}

/// Key-sorted, whitespace-free JSON of `value`.
///
/// `serde_json::Map` is ordered by key, so going through [`Value`] sorts every object.
pub fn canonical_form<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(&serde_json::to_value(value)?)
}

/// Compares freshly aggregated data with the `fact.data` of the previous document.
pub fn diff(current: &AggregateResult, previous: Option<&Value>) -> serde_json::Result<DiffOutcome> {
    let Some(previous) = previous else {
        return Ok(DiffOutcome::Changed);
    };
    Ok(if canonical_form(current)? == canonical_form(previous)? {
        DiffOutcome::Unchanged
    } else {
        DiffOutcome::Changed
    })
}
