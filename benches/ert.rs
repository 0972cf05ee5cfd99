//! Benchmarks for ERT computation and dataset grouping.
//!
//! Run:
//! - cargo bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bbob_postproc::data::dataset::{AlgorithmMap, DataSet, DataSetList, Trial};
use bbob_postproc::data::groups;
use bbob_postproc::settings::SUMMARIZED_TARGETS;

const DIMS: [u32; 5] = [2, 3, 5, 10, 20];

fn build_dataset(func_id: u32, dim: u32, trials_len: usize) -> DataSet {
    let mut trials = Vec::with_capacity(trials_len);
    for i in 0..trials_len {
        let base = (i as u64 + 1) * 37;
        let records: Vec<(u64, f64)> = (0..20)
            .map(|k| (base + k * 50, 10f64.powi(1 - k as i32)))
            .collect();
        let (final_evals, final_df) = *records.last().unwrap();
        trials.push(Trial {
            instance: (i % 5 + 1) as u32,
            records,
            final_evals,
            final_df,
        });
    }
    DataSet {
        alg_name: "BENCH".into(),
        alg_id: "bench".into(),
        func_id,
        dim,
        precision: 1e-8,
        instances: trials.iter().map(|t| t.instance).collect(),
        trials,
    }
}

fn build_map(n_algs: usize) -> AlgorithmMap {
    let mut map = AlgorithmMap::new();
    for a in 0..n_algs {
        let mut list = DataSetList::new();
        for fid in 1..=24u32 {
            for &dim in &DIMS {
                list.push(build_dataset(fid, dim, 15));
            }
        }
        map.insert(format!("ALG{a}"), list);
    }
    map
}

fn bench_ert(c: &mut Criterion) {
    let ds = build_dataset(1, 5, 15);
    c.bench_function("ert_all_targets", |b| {
        b.iter(|| {
            for &target in &SUMMARIZED_TARGETS {
                black_box(ds.ert(black_box(target)));
            }
        })
    });
}

fn bench_grouping(c: &mut Criterion) {
    let map = build_map(4);
    c.bench_function("group_by_noise_then_dim", |b| {
        b.iter(|| {
            for (_, sub) in groups::by_noise(black_box(&map)) {
                black_box(groups::by_dim(&sub));
            }
        })
    });
    c.bench_function("group_by_func_group", |b| {
        b.iter(|| black_box(groups::by_func_group(black_box(&map))))
    });
}

criterion_group!(benches, bench_ert, bench_grouping);
criterion_main!(benches);
