//! Aggregation stage
//!
//! A small group-by + reduce library shared by both pipelines. Keys come
//! from caller-supplied closures returning `Option<K>`: rows whose key is
//! undefined (for example no completion date, hence no period key) are
//! excluded from that grouping but still count in ungrouped totals.
//!
//! Grouped results use `BTreeMap`, so iteration order is deterministic and
//! already sorted by key. Every reduction over an empty input yields an
//! explicit no-data outcome (`None`, or an absent group), never NaN.

use std::collections::{BTreeMap, BTreeSet};

/// Mean over the supplied values; `None` when the iterator is empty.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0u64;
    for value in values {
        total += value;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)] // realistic sheet sizes
    let denominator = count as f64;
    Some(total / denominator)
}

/// Percentage of `part` over `whole`; `None` when `whole` is zero.
pub fn percent(part: f64, whole: f64) -> Option<f64> {
    (whole != 0.0).then(|| part / whole * 100.0)
}

/// Sum of `value` per group.
///
/// Rows with an undefined key are skipped entirely; rows with an undefined
/// value contribute nothing to their group's sum but still create the
/// group (a client with only unpriced sales sums to 0, it does not
/// disappear).
pub fn sum_by<T, K, KF, VF>(items: &[T], key: KF, value: VF) -> BTreeMap<K, f64>
where
    K: Ord,
    KF: Fn(&T) -> Option<K>,
    VF: Fn(&T) -> Option<f64>,
{
    let mut groups = BTreeMap::new();
    for item in items {
        let Some(k) = key(item) else { continue };
        let slot = groups.entry(k).or_insert(0.0);
        if let Some(v) = value(item) {
            *slot += v;
        }
    }
    groups
}

/// Row count per group. Rows with an undefined key are skipped.
pub fn count_by<T, K, KF>(items: &[T], key: KF) -> BTreeMap<K, u64>
where
    K: Ord,
    KF: Fn(&T) -> Option<K>,
{
    let mut groups = BTreeMap::new();
    for item in items {
        let Some(k) = key(item) else { continue };
        *groups.entry(k).or_insert(0u64) += 1;
    }
    groups
}

/// Mean of `value` per group, over rows where the value is defined.
///
/// A group whose rows all have undefined values is omitted: its mean
/// would be 0/0 and must not surface as NaN.
pub fn mean_by<T, K, KF, VF>(items: &[T], key: KF, value: VF) -> BTreeMap<K, f64>
where
    K: Ord,
    KF: Fn(&T) -> Option<K>,
    VF: Fn(&T) -> Option<f64>,
{
    let mut sums: BTreeMap<K, (f64, u64)> = BTreeMap::new();
    for item in items {
        let Some(k) = key(item) else { continue };
        let Some(v) = value(item) else { continue };
        let slot = sums.entry(k).or_insert((0.0, 0));
        slot.0 += v;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (total, count))| {
            #[allow(clippy::cast_precision_loss)]
            let denominator = count as f64;
            (k, total / denominator)
        })
        .collect()
}

/// Count of distinct defined values per group.
pub fn nunique_by<T, K, V, KF, VF>(items: &[T], key: KF, value: VF) -> BTreeMap<K, u64>
where
    K: Ord,
    V: Ord,
    KF: Fn(&T) -> Option<K>,
    VF: Fn(&T) -> Option<V>,
{
    let mut groups: BTreeMap<K, BTreeSet<V>> = BTreeMap::new();
    for item in items {
        let Some(k) = key(item) else { continue };
        let Some(v) = value(item) else { continue };
        groups.entry(k).or_default().insert(v);
    }
    groups.into_iter().map(|(k, set)| (k, set.len() as u64)).collect()
}

/// Count of distinct defined values over the whole dataset.
pub fn nunique<T, V, VF>(items: &[T], value: VF) -> u64
where
    V: Ord,
    VF: Fn(&T) -> Option<V>,
{
    items.iter().filter_map(|item| value(item)).collect::<BTreeSet<V>>().len() as u64
}

/// Two-level reduction: sum `value` per (outer, inner) pair, then average
/// the inner-group sums per outer key.
///
/// This is NOT the same as summing per outer key and dividing by the
/// number of inner groups in the dataset: an outer group only averages
/// over the inner groups it actually appears in. Capacity occupancy relies
/// on exactly this distinction.
pub fn mean_of_inner_sums<T, K1, K2, OF, IF, VF>(
    items: &[T],
    outer: OF,
    inner: IF,
    value: VF,
) -> BTreeMap<K1, f64>
where
    K1: Ord + Clone,
    K2: Ord,
    OF: Fn(&T) -> Option<K1>,
    IF: Fn(&T) -> Option<K2>,
    VF: Fn(&T) -> Option<f64>,
{
    let pair_sums = sum_by(
        items,
        |item| match (outer(item), inner(item)) {
            (Some(o), Some(i)) => Some((o, i)),
            _ => None,
        },
        value,
    );

    let mut per_outer: BTreeMap<K1, (f64, u64)> = BTreeMap::new();
    for ((o, _), total) in pair_sums {
        let slot = per_outer.entry(o).or_insert((0.0, 0));
        slot.0 += total;
        slot.1 += 1;
    }

    per_outer
        .into_iter()
        .map(|(k, (total, count))| {
            #[allow(clippy::cast_precision_loss)]
            let denominator = count as f64;
            (k, total / denominator)
        })
        .collect()
}

/// Top-N groups by reduced metric, descending.
///
/// The input map is already key-sorted, and the sort is stable, so equal
/// metrics tie-break by group key lexical order.
pub fn top_n<K: Ord + Clone>(grouped: &BTreeMap<K, f64>, n: usize) -> Vec<(K, f64)> {
    let mut ranked: Vec<(K, f64)> =
        grouped.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}
