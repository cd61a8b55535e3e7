use std::collections::BTreeMap;

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::Sample;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Samples built from raw records, plus how many records were dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ingested {
    /// Records whose date parsed, in input order.
    pub samples: Vec<Sample>,
    /// Records dropped because their date did not parse.
    pub dropped: usize,
}

fn whole_seconds(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.timestamp(), 0)
}

fn localize(naive: NaiveDateTime, tz: Option<chrono_tz::Tz>) -> Option<DateTime<Utc>> {
    let Some(tz) = tz else {
        return whole_seconds(naive.and_utc());
    };
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => whole_seconds(dt.with_timezone(&Utc)),
        // Fall-back overlap: take the earlier instant.
        LocalResult::Ambiguous(dt1, _) => whole_seconds(dt1.with_timezone(&Utc)),
        // Spring-forward gap: the wall-clock time never happened.
        LocalResult::None => None,
    }
}

/// Parse a timestamp string into a UTC instant with whole-second resolution.
///
/// Accepts RFC 3339 (offset-qualified), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` (fractional seconds truncated), minute-resolution
/// variants, slash-separated dates and bare `YYYY-MM-DD`. Naive values are
/// read as wall-clock time in `tz`, or UTC when `tz` is `None`.
///
/// ```
/// use regula_core::parse_timestamp;
///
/// let a = parse_timestamp("2024-03-01 12:00:00", None).unwrap();
/// let b = parse_timestamp("2024-03-01T13:00:00+01:00", None).unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("not a date", None).is_none());
/// ```
#[must_use]
pub fn parse_timestamp(text: &str, tz: Option<chrono_tz::Tz>) -> Option<DateTime<Utc>> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return whole_seconds(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| localize(naive, tz))
}

/// Turn `(date text, values)` records into samples.
///
/// Records whose date does not parse are dropped and counted; order is
/// preserved otherwise. Sorting and duplicate detection happen later, when the
/// samples become a [`crate::Series`].
pub fn samples_from_records<I, S>(records: I, tz: Option<chrono_tz::Tz>) -> Ingested
where
    I: IntoIterator<Item = (S, BTreeMap<String, Option<f64>>)>,
    S: AsRef<str>,
{
    let mut out = Ingested::default();
    for (date, values) in records {
        match parse_timestamp(date.as_ref(), tz) {
            Some(ts) => out.samples.push(Sample { ts, values }),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(date = %date.as_ref(), "dropping record with unparseable date");
                out.dropped += 1;
            }
        }
    }
    out
}
