use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::{Collator, SortKey};

pub fn sort_strings<S: AsRef<str>>(items: Vec<S>, collator: &Collator, reverse: bool) -> Vec<S> {
    let keyed = items
        .into_iter()
        .map(|item| (collator.sort_key(item.as_ref()), item))
        .collect();

    sort_keyed(keyed, collator, reverse)
}

/// Sorts items by the string `key` picks out of each one. An item for which
/// `key` returns `None` fails the whole sort.
pub fn sort_by_key<T, F>(
    items: Vec<T>,
    collator: &Collator,
    reverse: bool,
    key: F,
) -> Result<Vec<T>, Error>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut keyed = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let sort_key = key(&item)
            .map(|s| collator.sort_key(s))
            .ok_or(Error::InvalidKey { field: None, index })?;

        keyed.push((sort_key, item));
    }

    Ok(sort_keyed(keyed, collator, reverse))
}

/// Sorts JSON objects by the string stored under `field`.
pub fn sort_records(
    items: Vec<Value>,
    collator: &Collator,
    field: &str,
    reverse: bool,
) -> Result<Vec<Value>, Error> {
    let mut keyed = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let Some(word) = item.get(field).and_then(Value::as_str) else {
            return Err(Error::InvalidKey {
                field: Some(field.to_owned()),
                index,
            });
        };

        keyed.push((collator.sort_key(word), item));
    }

    Ok(sort_keyed(keyed, collator, reverse))
}

// Stable in both directions: descending order mirrors the input, sorts it
// ascending, and mirrors the result, so equal items keep their input order.
fn sort_keyed<T>(mut keyed: Vec<(SortKey, T)>, collator: &Collator, reverse: bool) -> Vec<T> {
    debug!(
        items = keyed.len(),
        variant = ?collator.variant(),
        reverse,
        "sorting"
    );

    if reverse {
        keyed.reverse();
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    if reverse {
        keyed.reverse();
    }

    keyed.into_iter().map(|(_, item)| item).collect()
}
