//! Pure partition functions over an [`AlgorithmMap`].
//!
//! Each returns an ordered mapping from group key to a narrowed map; the
//! input is never mutated. An algorithm appears in a subgroup only when it
//! has data there, except for [`filter_by_noise`], which keeps every
//! algorithm (possibly with an empty list) so the renderers still see the
//! full ordering.

use std::collections::BTreeMap;

use crate::data::dataset::{AlgorithmMap, DataSetList, FuncGroup, NoiseGroup};

/// Partition each algorithm's datasets by noise classification.
pub fn by_noise(map: &AlgorithmMap) -> BTreeMap<NoiseGroup, AlgorithmMap> {
    let mut out: BTreeMap<NoiseGroup, AlgorithmMap> = BTreeMap::new();
    for (alg, list) in map {
        for (group, sub) in list.by_noise() {
            out.entry(group).or_default().insert(alg.clone(), sub);
        }
    }
    out
}

/// Partition each algorithm's datasets by function group. Function ids
/// outside the suite belong to no group and are dropped from this view.
pub fn by_func_group(map: &AlgorithmMap) -> BTreeMap<FuncGroup, AlgorithmMap> {
    let mut out: BTreeMap<FuncGroup, AlgorithmMap> = BTreeMap::new();
    for (alg, list) in map {
        for (group, sub) in list.by_func_group() {
            out.entry(group).or_default().insert(alg.clone(), sub);
        }
    }
    out
}

/// Partition each algorithm's datasets by dimension.
pub fn by_dim(map: &AlgorithmMap) -> BTreeMap<u32, AlgorithmMap> {
    let mut out: BTreeMap<u32, AlgorithmMap> = BTreeMap::new();
    for (alg, list) in map {
        for (dim, sub) in list.by_dim() {
            out.entry(dim).or_default().insert(alg.clone(), sub);
        }
    }
    out
}

/// Apply the `--noisy` / `--noise-free` narrowing. One flag keeps only the
/// matching classification (an algorithm without matching data keeps an
/// empty list); both flags or neither pass the map through untouched.
pub fn filter_by_noise(map: &AlgorithmMap, noisy: bool, noise_free: bool) -> AlgorithmMap {
    let keep = match (noisy, noise_free) {
        (true, false) => NoiseGroup::Noisy,
        (false, true) => NoiseGroup::Noiseless,
        _ => return map.clone(),
    };
    map.iter()
        .map(|(alg, list)| {
            let sub = list.by_noise().remove(&keep).unwrap_or_default();
            (alg.clone(), sub)
        })
        .collect()
}

/// Function ids present anywhere in the map, sorted and deduplicated.
pub fn func_ids(map: &AlgorithmMap) -> Vec<u32> {
    let mut ids: Vec<u32> = map
        .values()
        .flat_map(|list| list.iter().map(|ds| ds.func_id))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
