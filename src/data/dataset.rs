//! In-memory model of one benchmark experiment.
//!
//! A [`DataSet`] is one algorithm's runs on one (function, dimension) pair
//! across instances; everything is immutable once loaded. ERT (expected
//! running time) is the summary statistic every renderer consumes: total
//! evaluations spent across all trials divided by the number of trials that
//! reached the target.

use std::collections::BTreeMap;
use std::fmt;

/// Noise classification of a benchmark function.
///
/// The key strings appear verbatim in output filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoiseGroup {
    Noiseless,
    Noisy,
}

impl NoiseGroup {
    pub fn of_func(func_id: u32) -> Self {
        if (101..=130).contains(&func_id) {
            Self::Noisy
        } else {
            Self::Noiseless
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Noiseless => "noiselessall",
            Self::Noisy => "nzall",
        }
    }
}

impl fmt::Display for NoiseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fixed partition of the benchmark function ids into groups sharing
/// mathematical properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FuncGroup {
    Separable,
    LowConditioning,
    HighConditioning,
    MultiModal,
    MultiModalWeak,
    ModerateNoise,
    SevereNoise,
    SevereNoiseMultiModal,
}

impl FuncGroup {
    /// Group of a function id, `None` for ids outside the suite.
    pub fn of_func(func_id: u32) -> Option<Self> {
        match func_id {
            1..=5 => Some(Self::Separable),
            6..=9 => Some(Self::LowConditioning),
            10..=14 => Some(Self::HighConditioning),
            15..=19 => Some(Self::MultiModal),
            20..=24 => Some(Self::MultiModalWeak),
            101..=106 => Some(Self::ModerateNoise),
            107..=121 => Some(Self::SevereNoise),
            122..=130 => Some(Self::SevereNoiseMultiModal),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Separable => "separ",
            Self::LowConditioning => "lcond",
            Self::HighConditioning => "hcond",
            Self::MultiModal => "multi",
            Self::MultiModalWeak => "mult2",
            Self::ModerateNoise => "nzmod",
            Self::SevereNoise => "nzsev",
            Self::SevereNoiseMultiModal => "nzsmm",
        }
    }
}

impl fmt::Display for FuncGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One restart-free run on one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub instance: u32,
    /// Monotone improvement records `(evaluations, best Δf)` from the
    /// runtime file. May be empty when only the index entry survived.
    pub records: Vec<(u64, f64)>,
    /// Evaluations spent in total, from the index entry.
    pub final_evals: u64,
    /// Best Δf at the end of the trial, from the index entry.
    pub final_df: f64,
}

impl Trial {
    /// Evaluations needed to reach `target`, `None` if the trial never did.
    pub fn evals_to_target(&self, target: f64) -> Option<u64> {
        for &(evals, df) in &self.records {
            if df <= target {
                return Some(evals);
            }
        }
        // The index entry is authoritative for the final state even when the
        // runtime records stop short of it.
        if self.final_df <= target {
            return Some(self.final_evals);
        }
        None
    }

    /// Evaluations spent by the whole trial.
    pub fn max_evals(&self) -> u64 {
        self.records
            .last()
            .map(|&(evals, _)| evals)
            .unwrap_or(0)
            .max(self.final_evals)
    }
}

/// One algorithm's runs on one (function, dimension) pair across instances.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Display name, derived from the input folder name.
    pub alg_name: String,
    /// Algorithm id recorded in the index file.
    pub alg_id: String,
    pub func_id: u32,
    pub dim: u32,
    /// Final target precision of the experiment.
    pub precision: f64,
    /// Instance id of each trial, in trial order; duplicates allowed.
    pub instances: Vec<u32>,
    pub trials: Vec<Trial>,
}

impl DataSet {
    pub fn noise_group(&self) -> NoiseGroup {
        NoiseGroup::of_func(self.func_id)
    }

    pub fn func_group(&self) -> Option<FuncGroup> {
        FuncGroup::of_func(self.func_id)
    }

    /// Expected running time to reach `target`: evaluations summed over all
    /// trials (unsuccessful ones contribute their full budget), divided by
    /// the number of successful trials. `+inf` when no trial succeeds.
    pub fn ert(&self, target: f64) -> f64 {
        let mut evals_sum = 0.0;
        let mut successes = 0usize;
        for trial in &self.trials {
            match trial.evals_to_target(target) {
                Some(evals) => {
                    evals_sum += evals as f64;
                    successes += 1;
                }
                None => evals_sum += trial.max_evals() as f64,
            }
        }
        if successes == 0 {
            f64::INFINITY
        } else {
            evals_sum / successes as f64
        }
    }

    /// Trials that reached the experiment's final precision.
    pub fn success_count(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| t.evals_to_target(self.precision).is_some())
            .count()
    }

    /// Trial count per instance id.
    pub fn instance_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for &instance in &self.instances {
            *counts.entry(instance).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on f{} {}-D ({} trials)",
            self.alg_name,
            self.func_id,
            self.dim,
            self.trials.len()
        )
    }
}

/// Ordered collection of datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSetList(pub Vec<DataSet>);

impl DataSetList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, ds: DataSet) {
        self.0.push(ds);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataSet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Partition by noise classification.
    pub fn by_noise(&self) -> BTreeMap<NoiseGroup, DataSetList> {
        let mut out: BTreeMap<NoiseGroup, DataSetList> = BTreeMap::new();
        for ds in self.iter() {
            out.entry(ds.noise_group()).or_default().push(ds.clone());
        }
        out
    }

    /// Partition by function group; ids outside the suite are dropped.
    pub fn by_func_group(&self) -> BTreeMap<FuncGroup, DataSetList> {
        let mut out: BTreeMap<FuncGroup, DataSetList> = BTreeMap::new();
        for ds in self.iter() {
            if let Some(group) = ds.func_group() {
                out.entry(group).or_default().push(ds.clone());
            }
        }
        out
    }

    /// Partition by dimension.
    pub fn by_dim(&self) -> BTreeMap<u32, DataSetList> {
        let mut out: BTreeMap<u32, DataSetList> = BTreeMap::new();
        for ds in self.iter() {
            out.entry(ds.dim).or_default().push(ds.clone());
        }
        out
    }

    /// Function ids present, sorted and deduplicated.
    pub fn func_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.iter().map(|ds| ds.func_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl FromIterator<DataSet> for DataSetList {
    fn from_iter<T: IntoIterator<Item = DataSet>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DataSetList {
    type Item = &'a DataSet;
    type IntoIter = std::slice::Iter<'a, DataSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Algorithm display name → its datasets. A `BTreeMap` so iteration is
/// stable; the input-folder ordering lives separately in the sorted
/// algorithm list and drives all rendering.
pub type AlgorithmMap = BTreeMap<String, DataSetList>;

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(instance: u32, records: &[(u64, f64)], final_evals: u64, final_df: f64) -> Trial {
        Trial {
            instance,
            records: records.to_vec(),
            final_evals,
            final_df,
        }
    }

    fn dataset(func_id: u32, dim: u32, trials: Vec<Trial>) -> DataSet {
        let instances = trials.iter().map(|t| t.instance).collect();
        DataSet {
            alg_name: "ALG".into(),
            alg_id: "alg".into(),
            func_id,
            dim,
            precision: 1e-8,
            instances,
            trials,
        }
    }

    #[test]
    fn noise_groups_by_func_id() {
        assert_eq!(NoiseGroup::of_func(1), NoiseGroup::Noiseless);
        assert_eq!(NoiseGroup::of_func(24), NoiseGroup::Noiseless);
        assert_eq!(NoiseGroup::of_func(101), NoiseGroup::Noisy);
        assert_eq!(NoiseGroup::of_func(130), NoiseGroup::Noisy);
        assert_eq!(NoiseGroup::of_func(131), NoiseGroup::Noiseless);
    }

    #[test]
    fn func_group_table_boundaries() {
        assert_eq!(FuncGroup::of_func(1), Some(FuncGroup::Separable));
        assert_eq!(FuncGroup::of_func(5), Some(FuncGroup::Separable));
        assert_eq!(FuncGroup::of_func(6), Some(FuncGroup::LowConditioning));
        assert_eq!(FuncGroup::of_func(10), Some(FuncGroup::HighConditioning));
        assert_eq!(FuncGroup::of_func(15), Some(FuncGroup::MultiModal));
        assert_eq!(FuncGroup::of_func(20), Some(FuncGroup::MultiModalWeak));
        assert_eq!(FuncGroup::of_func(24), Some(FuncGroup::MultiModalWeak));
        assert_eq!(FuncGroup::of_func(25), None);
        assert_eq!(FuncGroup::of_func(100), None);
        assert_eq!(FuncGroup::of_func(101), Some(FuncGroup::ModerateNoise));
        assert_eq!(FuncGroup::of_func(107), Some(FuncGroup::SevereNoise));
        assert_eq!(
            FuncGroup::of_func(122),
            Some(FuncGroup::SevereNoiseMultiModal)
        );
        assert_eq!(FuncGroup::of_func(131), None);
    }

    #[test]
    fn evals_to_target_walks_records() {
        let t = trial(1, &[(10, 1.0), (100, 1e-3), (500, 1e-9)], 500, 1e-9);
        assert_eq!(t.evals_to_target(10.0), Some(10));
        assert_eq!(t.evals_to_target(1e-2), Some(500));
        assert_eq!(t.evals_to_target(1e-3), Some(100));
        assert_eq!(t.evals_to_target(1e-8), Some(500));
        assert_eq!(t.evals_to_target(1e-12), None);
    }

    #[test]
    fn evals_to_target_falls_back_to_index_entry() {
        // Records stop early; the index entry knows the trial finished lower.
        let t = trial(1, &[(10, 1.0)], 900, 1e-9);
        assert_eq!(t.evals_to_target(1e-8), Some(900));
        assert_eq!(t.max_evals(), 900);
    }

    #[test]
    fn ert_hand_computed() {
        // Two successes (100 and 300 evals) and one failure spending 1000.
        let ds = dataset(
            1,
            5,
            vec![
                trial(1, &[(100, 1e-9)], 100, 1e-9),
                trial(2, &[(300, 1e-9)], 300, 1e-9),
                trial(3, &[(1000, 1.0)], 1000, 1.0),
            ],
        );
        let ert = ds.ert(1e-8);
        assert!((ert - (100.0 + 300.0 + 1000.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn ert_is_infinite_without_successes() {
        let ds = dataset(1, 5, vec![trial(1, &[(1000, 1.0)], 1000, 1.0)]);
        assert!(ds.ert(1e-8).is_infinite());
        assert_eq!(ds.success_count(), 0);
    }

    #[test]
    fn instance_counts_tally_duplicates() {
        let ds = dataset(
            1,
            2,
            vec![
                trial(1, &[], 10, 1.0),
                trial(1, &[], 10, 1.0),
                trial(2, &[], 10, 1.0),
            ],
        );
        let counts = ds.instance_counts();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&1));
    }

    #[test]
    fn list_partitions_share_key_values() {
        let list: DataSetList = vec![
            dataset(1, 2, vec![trial(1, &[], 10, 1.0)]),
            dataset(10, 2, vec![trial(1, &[], 10, 1.0)]),
            dataset(101, 5, vec![trial(1, &[], 10, 1.0)]),
        ]
        .into_iter()
        .collect();

        let by_noise = list.by_noise();
        assert_eq!(by_noise[&NoiseGroup::Noiseless].len(), 2);
        assert_eq!(by_noise[&NoiseGroup::Noisy].len(), 1);

        let by_dim = list.by_dim();
        assert_eq!(by_dim[&2].len(), 2);
        assert_eq!(by_dim[&5].len(), 1);
        for (dim, sub) in &by_dim {
            assert!(sub.iter().all(|ds| ds.dim == *dim));
        }

        let by_group = list.by_func_group();
        assert_eq!(by_group[&FuncGroup::Separable].len(), 1);
        assert_eq!(by_group[&FuncGroup::HighConditioning].len(), 1);
        assert_eq!(by_group[&FuncGroup::ModerateNoise].len(), 1);

        assert_eq!(list.func_ids(), vec![1, 10, 101]);
    }
}
