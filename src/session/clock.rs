//! Wall-clock source for token expiry checks and the reporting year.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::sync::Mutex;

use time::{OffsetDateTime, UtcOffset};

/// Current time in seconds since the Unix epoch (fractional), plus the
/// local calendar year PPR lists are filtered by.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> f64;

    /// Local offset from UTC in seconds at the current instant.
    fn utc_offset_secs(&self) -> i32 {
        0
    }

    /// Calendar year in local time.
    fn current_year(&self) -> i32 {
        year_at(self.now_secs(), self.utc_offset_secs())
    }
}

/// Calendar year of `now_secs` seen from a zone `utc_offset_secs` east of UTC.
/// Offsets outside +/-25h fall back to UTC.
#[must_use]
pub fn year_at(now_secs: f64, utc_offset_secs: i32) -> i32 {
    let offset = UtcOffset::from_whole_seconds(utc_offset_secs).unwrap_or(UtcOffset::UTC);
    #[allow(clippy::cast_possible_truncation)]
    let secs = now_secs.floor() as i64;
    OffsetDateTime::from_unix_timestamp(secs).unwrap_or(OffsetDateTime::UNIX_EPOCH).to_offset(offset).year()
}

/// `Date` in the browser, `SystemTime` and the OS zone natively.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        #[cfg(feature = "csr")]
        {
            js_sys::Date::now() / 1000.0
        }
        #[cfg(not(feature = "csr"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0.0, |d| d.as_secs_f64())
        }
    }

    fn utc_offset_secs(&self) -> i32 {
        #[cfg(feature = "csr")]
        {
            // getTimezoneOffset is minutes west of UTC.
            #[allow(clippy::cast_possible_truncation)]
            let west_minutes = js_sys::Date::new_0().get_timezone_offset() as i32;
            -west_minutes * 60
        }
        #[cfg(not(feature = "csr"))]
        {
            UtcOffset::current_local_offset().map_or(0, UtcOffset::whole_seconds)
        }
    }

    #[cfg(feature = "csr")]
    fn current_year(&self) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let year = js_sys::Date::new_0().get_full_year() as i32;
        year
    }
}

/// A clock that only moves when told to, pinned to one UTC offset.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Mutex<f64>,
    utc_offset_secs: i32,
}

impl FixedClock {
    #[must_use]
    pub fn new(now_secs: f64) -> Self {
        Self { now: Mutex::new(now_secs), utc_offset_secs: 0 }
    }

    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset_secs: i32) -> Self {
        self.utc_offset_secs = utc_offset_secs;
        self
    }

    pub fn advance(&self, secs: f64) {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner) += secs;
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }
}
