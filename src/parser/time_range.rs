use getset::CopyGetters;
use log::debug;
use outage_schedule_utils::regex;

/// Half-open interval of clock hours `[start, end)`.
///
/// `end == 24` stands for the end of the day.
/// `start > end` wraps past midnight, and `start == end` covers nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct TimeRange {
    start: u8,
    end: u8,
}

impl TimeRange {
    pub fn new(start: u8, end: u8) -> Option<Self> {
        (start < 24 && end <= 24).then_some(Self { start, end })
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn wraps_midnight(self) -> bool {
        self.start > self.end
    }

    /// Zero-based clock hours covered by this range, in clock order starting from `start`.
    pub fn hours(self) -> impl Iterator<Item = u8> {
        let (head, tail) = match self.start.cmp(&self.end) {
            std::cmp::Ordering::Equal => (0..0, 0..0),
            std::cmp::Ordering::Less => (self.start..self.end, 0..0),
            std::cmp::Ordering::Greater => (self.start..24, 0..self.end),
        };
        head.chain(tail)
    }
}

/// Extracts every `HH:MM - HH:MM` occurrence from `text`, in the order found.
///
/// Minutes are dropped, except that `23:59` as an end time means the end of the day.
/// Occurrences with hours outside of the clock are skipped.
pub fn parse_time_ranges(text: &str) -> Vec<TimeRange> {
    regex!(r"([0-9]{2}):([0-9]{2})\s*-\s*([0-9]{2}):([0-9]{2})")
        .captures_iter(text)
        .filter_map(|captures| {
            let [start_h, _start_m, end_h, end_m] =
                [1, 2, 3, 4].map(|i| captures[i].parse::<u8>().ok());
            let (start_h, mut end_h, end_m) = (start_h?, end_h?, end_m?);
            if end_h == 23 && end_m == 59 {
                end_h = 24;
            }
            let range = TimeRange::new(start_h, end_h);
            if range.is_none() {
                debug!("Ignoring out-of-clock range {:?}", &captures[0]);
            }
            range
        })
        .collect()
}
