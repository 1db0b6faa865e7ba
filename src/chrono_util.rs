use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of "now" in the timezone the schedule is published for.
pub trait Clock {
    fn now(&self) -> DateTime<Tz>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    tz: Tz,
}
impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Tz>);
impl FixedClock {
    /// Panics if the local time does not exist or is ambiguous in `tz`.
    pub fn at_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Self {
        Self(tz.from_local_datetime(&date.and_time(time)).unwrap())
    }
}
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}

/// Start of `date` in `tz`.
/// `None` if midnight was skipped by a DST transition.
pub fn local_midnight(tz: Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use chrono_tz::Europe::Kyiv;

    use super::{local_midnight, Clock, FixedClock};

    #[test]
    fn midnight_in_kyiv() {
        // 2025-11-03 00:00 EET (UTC+2) = 2025-11-02 22:00 UTC
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assert_eq!(local_midnight(Kyiv, date).unwrap().timestamp(), 1762120800);
        // Summer time (UTC+3)
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(local_midnight(Kyiv, date).unwrap().timestamp(), 1751317200);
    }

    #[test]
    fn fixed_clock_today_is_local() {
        // 00:30 local is still the previous day in UTC
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let clock = FixedClock::at_local(Kyiv, date, NaiveTime::from_hms_opt(0, 30, 0).unwrap());
        assert_eq!(clock.today(), date);
        assert_eq!(
            clock.now().with_timezone(&Utc).date_naive(),
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
        );
    }
}
