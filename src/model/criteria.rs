//! Search criteria: what the user asked for.

/// One search request: a date, a time, and a party size.
///
/// `date` is `YYYY-MM-DD` and `time` is `HH:MM` (24h). The CLI validates
/// both before building criteria; the store only reformats them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub date: String,
    pub time: String,
    pub guest_count: u32,
}

impl SearchCriteria {
    pub fn new(date: impl Into<String>, time: impl Into<String>, guest_count: u32) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            guest_count,
        }
    }

    /// The date as the API expects it: `YYYYMMDD`, every `-` removed.
    pub fn compact_date(&self) -> String {
        self.date.replace('-', "")
    }

    /// The time as the API expects it: `HHMM`.
    ///
    /// Only the first `:` is removed; `HH:MM:SS` would keep its second colon.
    pub fn compact_time(&self) -> String {
        self.time.replacen(':', "", 1)
    }

    /// The party size as the API expects it: a decimal string.
    pub fn size(&self) -> String {
        self.guest_count.to_string()
    }
}
