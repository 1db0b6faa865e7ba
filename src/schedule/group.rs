use std::{fmt::Display, num::ParseIntError, str::FromStr};

use getset::CopyGetters;
use outage_schedule_utils::regex;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Outage rotation group, written `GPV{queue}.{subqueue}`.
///
/// Ordered by queue first, so `GPV2.1` sorts before `GPV10.1`.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    CopyGetters,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[getset(get_copy = "pub")]
pub struct GroupId {
    queue: u32,
    subqueue: u32,
}

impl GroupId {
    /// Group of the `offset`-th column after the date column, counting from zero.
    /// Every queue spans two columns, one per subqueue.
    pub fn from_offset(offset: usize) -> Self {
        let queue = u32::try_from(offset / 2 + 1).unwrap_or(u32::MAX);
        let subqueue = (offset % 2) as u32 + 1;
        Self { queue, subqueue }
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GPV{}.{}", self.queue, self.subqueue)
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum GroupIdParseError {
    #[error("Not of the form GPV<queue>.<subqueue>: {0:?}")]
    BadFormat(String),
    #[error("Number out of range: {0}")]
    ParseIntError(#[from] ParseIntError),
}

impl FromStr for GroupId {
    type Err = GroupIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = regex!(r"^GPV([0-9]+)\.([0-9]+)$")
            .captures(s)
            .ok_or_else(|| GroupIdParseError::BadFormat(s.to_owned()))?;
        Ok(Self {
            queue: captures[1].parse()?,
            subqueue: captures[2].parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::{GroupId, GroupIdParseError};

    #[test]
    fn positional_ids() {
        let ids = (0..6).map(|i| GroupId::from_offset(i).to_string()).collect_vec();
        assert_eq!(ids, ["GPV1.1", "GPV1.2", "GPV2.1", "GPV2.2", "GPV3.1", "GPV3.2"]);
    }

    #[test]
    fn parse_round_trip() {
        let id: GroupId = "GPV6.2".parse().unwrap();
        assert_eq!((id.queue(), id.subqueue()), (6, 2));
        assert_eq!(id, GroupId::from_offset(11));
        assert!(matches!(
            "GPV6".parse::<GroupId>(),
            Err(GroupIdParseError::BadFormat(_))
        ));
    }

    #[test]
    fn numeric_order() {
        let mut ids = [GroupId::from_offset(18), GroupId::from_offset(2)];
        ids.sort();
        assert_eq!(ids.map(|id| id.to_string()), ["GPV2.1", "GPV10.1"]);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&GroupId::from_offset(3)).unwrap();
        assert_eq!(json, r#""GPV2.2""#);
        let id: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, GroupId::from_offset(3));
    }
}
