// src/domain/window.rs

use chrono::{Duration, Local, NaiveDateTime};

/// Pattern listing timestamps are published in, e.g. "2016-05-04 13:45".
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Where a listing's timestamp falls relative to a [`ScrapeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Newer than `latest`; skip it but keep scanning, older listings follow.
    TooNew,
    Within,
    /// Older than `earliest`; everything after it on the site is older still.
    TooOld,
}

/// Inclusive `[earliest, latest]` bounds.
///
/// Both ends are naive local times of the listing's region. No timezone
/// conversion happens anywhere, timestamps are compared as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeWindow {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
}

impl ScrapeWindow {
    pub fn new(earliest: NaiveDateTime, latest: NaiveDateTime) -> Self {
        Self { earliest, latest }
    }

    /// The hour ending now, evaluated when called rather than at startup.
    pub fn last_hour() -> Self {
        let now = Local::now().naive_local();
        Self::new(now - Duration::hours(1), now)
    }

    pub fn earliest(&self) -> NaiveDateTime {
        self.earliest
    }

    pub fn latest(&self) -> NaiveDateTime {
        self.latest
    }

    pub fn is_inverted(&self) -> bool {
        self.earliest > self.latest
    }

    pub fn classify(&self, ts: NaiveDateTime) -> WindowPosition {
        if ts > self.latest {
            WindowPosition::TooNew
        } else if ts < self.earliest {
            WindowPosition::TooOld
        } else {
            WindowPosition::Within
        }
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
}
