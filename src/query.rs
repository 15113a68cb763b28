//! Query options and their normalized form.
//!
//! Hosts hand partially-filled options through; normalization fills the
//! collector-conventional defaults (a 24-hour window ending now, ten
//! records, newest first) so every query carries a complete contract.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Result ordering by record timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Descending => "desc",
            Self::Ascending => "asc",
        }
    }
}

/// Caller-supplied query options; unset fields take defaults.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub start: Option<usize>,
    pub order: Option<SortOrder>,
    /// Restrict results to these record fields; `None` means all fields.
    pub fields: Option<Vec<String>>,
}

/// Options with every default applied.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedQuery {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub limit: usize,
    pub start: usize,
    pub order: SortOrder,
    pub fields: Option<Vec<String>>,
}

impl QueryOptions {
    pub fn normalize(&self) -> NormalizedQuery {
        self.normalize_at(Utc::now())
    }

    fn normalize_at(&self, now: DateTime<Utc>) -> NormalizedQuery {
        let until = self.until.unwrap_or(now);
        let from = self.from.unwrap_or_else(|| until - Duration::hours(24));
        NormalizedQuery {
            from,
            until,
            limit: self.limit.unwrap_or(DEFAULT_QUERY_LIMIT),
            start: self.start.unwrap_or(0),
            order: self.order.unwrap_or_default(),
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::{QueryOptions, SortOrder};

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    #[rstest]
    fn empty_options_take_all_defaults() {
        let normalized = QueryOptions::default().normalize_at(fixed_now());

        assert_eq!(normalized.until, fixed_now());
        assert_eq!(normalized.from, fixed_now() - Duration::hours(24));
        assert_eq!(normalized.limit, 10);
        assert_eq!(normalized.start, 0);
        assert_eq!(normalized.order, SortOrder::Descending);
        assert!(normalized.fields.is_none());
    }

    #[rstest]
    fn explicit_values_survive_normalization() {
        let until = fixed_now() - Duration::hours(1);
        let from = until - Duration::minutes(30);
        let options = QueryOptions {
            from: Some(from),
            until: Some(until),
            limit: Some(50),
            start: Some(20),
            order: Some(SortOrder::Ascending),
            fields: Some(vec!["message".to_string()]),
        };

        let normalized = options.normalize_at(fixed_now());
        assert_eq!(normalized.from, from);
        assert_eq!(normalized.until, until);
        assert_eq!(normalized.limit, 50);
        assert_eq!(normalized.start, 20);
        assert_eq!(normalized.order, SortOrder::Ascending);
        assert_eq!(normalized.fields.as_deref(), Some(&["message".to_string()][..]));
    }

    #[rstest]
    fn window_default_hangs_off_explicit_until() {
        let until = fixed_now() - Duration::days(7);
        let options = QueryOptions {
            until: Some(until),
            ..QueryOptions::default()
        };

        let normalized = options.normalize_at(fixed_now());
        assert_eq!(normalized.until, until);
        assert_eq!(normalized.from, until - Duration::hours(24));
    }

    #[rstest]
    #[case(SortOrder::Descending, "desc")]
    #[case(SortOrder::Ascending, "asc")]
    fn sort_order_wire_names(#[case] order: SortOrder, #[case] expected: &str) {
        assert_eq!(order.as_str(), expected);
    }
}
