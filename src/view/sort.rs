//! Sort comparator over records

use super::collation::{Collation, FoldedCollation};
use super::criteria::{SortDirection, SortField};
use super::record::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Compare two records on `field`, then apply `direction`
///
/// Strings use [`FoldedCollation`]; dates compare as timestamps with missing or
/// unparseable values treated as the epoch.
pub fn compare<R: Record>(a: &R, b: &R, field: SortField, direction: SortDirection) -> Ordering {
    compare_with(a, b, field, direction, &FoldedCollation)
}

pub fn compare_with<R: Record>(
    a: &R,
    b: &R,
    field: SortField,
    direction: SortDirection,
    collation: &dyn Collation,
) -> Ordering {
    let natural = match field {
        SortField::Title => collation.compare(a.title(), b.title()),
        SortField::Author => collation.compare(a.author(), b.author()),
        SortField::PublishedDate => {
            parse_timestamp(a.published_date()).cmp(&parse_timestamp(b.published_date()))
        }
    };
    direction.apply(natural)
}

/// Stable in-place sort; records with equal keys keep their relative order
pub fn sort_all<R: Record>(items: &mut [R], field: SortField, direction: SortDirection) {
    sort_all_with(items, field, direction, &FoldedCollation)
}

pub fn sort_all_with<R: Record>(
    items: &mut [R],
    field: SortField,
    direction: SortDirection,
    collation: &dyn Collation,
) {
    match field {
        // Parse each date once instead of once per comparison.
        SortField::PublishedDate => {
            let mut keyed: Vec<(i64, usize)> = items
                .iter()
                .enumerate()
                .map(|(i, r)| (parse_timestamp(r.published_date()), i))
                .collect();
            keyed.sort_by(|(ka, _), (kb, _)| direction.apply(ka.cmp(kb)));
            apply_permutation(items, keyed.into_iter().map(|(_, i)| i).collect());
        }
        _ => items.sort_by(|a, b| compare_with(a, b, field, direction, collation)),
    }
}

fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    // order[i] is the source index of the element that belongs at i
    for i in 0..order.len() {
        let mut current = i;
        while order[current] != i {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

/// Milliseconds since the epoch for an ISO-8601 date, or 0 if absent/invalid
pub fn parse_timestamp(value: Option<&str>) -> i64 {
    value
        .and_then(parse_datetime)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Parse the date shapes the backend emits
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps. Offsets are normalised to UTC.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
