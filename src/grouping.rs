//! Grouping of keyed header records by attribute value.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::GroupingError;
use crate::model::{AttrValue, Attributes};

/// Groups the keys of `records` by the value of `attribute`.
///
/// Returns the key groups and the distinct values, index-aligned. With `sort`
/// both lists are ordered by ascending value, otherwise values appear in the
/// order they were first seen. An empty `subset` behaves like no subset.
pub fn group_by_attribute<K, R>(
    records: &BTreeMap<K, R>,
    attribute: &str,
    subset: Option<&[K]>,
    sort: bool,
) -> Result<(Vec<Vec<K>>, Vec<AttrValue>), GroupingError>
where
    K: Ord + Clone + Debug,
    R: Attributes,
{
    let keys = select_keys(records, subset)?;

    let mut buckets: Vec<(AttrValue, Vec<K>)> = Vec::new();
    for key in keys {
        let value = lookup(records, &key, attribute)?;
        match buckets.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, members)) => members.push(key),
            None => buckets.push((value, vec![key])),
        }
    }

    if sort {
        buckets.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    Ok(buckets
        .into_iter()
        .map(|(value, members)| (members, value))
        .unzip())
}

/// Returns the keys whose `attribute` equals `target`, in key order.
pub fn group_by_value<K, R>(
    records: &BTreeMap<K, R>,
    attribute: &str,
    target: &AttrValue,
    subset: Option<&[K]>,
) -> Result<Vec<K>, GroupingError>
where
    K: Ord + Clone + Debug,
    R: Attributes,
{
    let mut matches = Vec::new();
    for key in select_keys(records, subset)? {
        if lookup(records, &key, attribute)? == *target {
            matches.push(key);
        }
    }
    Ok(matches)
}

fn select_keys<K, R>(records: &BTreeMap<K, R>, subset: Option<&[K]>) -> Result<Vec<K>, GroupingError>
where
    K: Ord + Clone + Debug,
{
    match subset {
        Some(keys) if !keys.is_empty() => {
            if let Some(missing) = keys.iter().find(|key| !records.contains_key(*key)) {
                return Err(GroupingError::KeyNotFound(format!("{missing:?}")));
            }
            Ok(keys.to_vec())
        }
        _ => Ok(records.keys().cloned().collect()),
    }
}

fn lookup<K, R>(records: &BTreeMap<K, R>, key: &K, attribute: &str) -> Result<AttrValue, GroupingError>
where
    K: Ord + Debug,
    R: Attributes,
{
    records
        .get(key)
        .and_then(|record| record.attribute(attribute))
        .ok_or_else(|| GroupingError::MissingAttribute {
            key: format!("{key:?}"),
            attribute: attribute.to_string(),
        })
}
