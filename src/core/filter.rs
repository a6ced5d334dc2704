//! Store-agnostic filters for record lookups
//!
//! A [`Filter`] is a conjunction of field equalities with an optional sort
//! on a single field. Field names are the camelCase names records serialize
//! to, so the same filter can be evaluated in memory or translated into a
//! MongoDB query document.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction for [`Filter::sort_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort expression on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Equality filter over record fields
///
/// # Example
///
/// ```rust,ignore
/// let filter = Filter::eq("userId", owner.as_str())
///     .sort_by("createdAt", SortDirection::Descending);
/// let words = store.find_many(&filter).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
    sort: Option<Sort>,
}

impl Filter {
    /// Filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching records whose `field` equals `value` exactly
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Add another equality condition
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Order results by `field`
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Evaluate the conditions against a serialized record
    pub fn matches(&self, record: &Value) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            record
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|actual| actual == expected)
        })
    }

    /// Order two serialized records according to the sort expression
    ///
    /// Timestamps are compared chronologically, other strings lexically.
    /// Without a sort expression every pair compares equal.
    pub fn compare(&self, left: &Value, right: &Value) -> Ordering {
        let Some(sort) = &self.sort else {
            return Ordering::Equal;
        };

        let ordering = compare_field(left.get(&sort.field), right.get(&sort.field));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_field(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left.and_then(Value::as_str), right.and_then(Value::as_str)) {
        (Some(l), Some(r)) => match (
            l.parse::<DateTime<Utc>>(),
            r.parse::<DateTime<Utc>>(),
        ) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => l.cmp(r),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
