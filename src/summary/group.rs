use std::collections::HashMap;
use std::hash::Hash;

use crate::models::Transaction;

/// Group transactions by key, keeping groups in first-seen key order and
/// members in input order.
pub(crate) fn group_by<'a, K, F>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    key: F,
) -> Vec<(K, Vec<&'a Transaction>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Transaction) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Transaction>)> = Vec::new();

    for txn in transactions {
        let k = key(txn);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(txn),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![txn]));
            }
        }
    }

    groups
}

/// The group with the most members. Earlier groups win ties.
pub(crate) fn largest_group<K>(groups: Vec<(K, Vec<&Transaction>)>) -> Option<(K, Vec<&Transaction>)> {
    let mut best: Option<(K, Vec<&Transaction>)> = None;
    for group in groups {
        let beats = best
            .as_ref()
            .map_or(true, |(_, members)| group.1.len() > members.len());
        if beats {
            best = Some(group);
        }
    }
    best
}
