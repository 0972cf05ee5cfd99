//! Orchestrator: drives load → filter → group → render in sequence.
//!
//! Everything is constructed once during the load/group phase and consumed
//! read-only by the renderers; the only mutation is the noise narrowing
//! applied before grouping starts. A failure in any phase aborts the run.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

use tracing::{debug, warn};

use crate::cli::Args;
use crate::data::dataset::DataSetList;
use crate::data::{groups, loader};
use crate::render;
use crate::settings::{
    DIMS_OF_INTEREST, INSTANCES_OF_INTEREST, SCALING_TARGET, SUMMARIZED_TARGETS, TABLE_TARGETS,
};

/// Run the whole post-processing pipeline. Returns `Ok(())` both on success
/// and on the early exit for missing data; usage errors never reach here
/// (clap reports them), everything else propagates.
pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let phases = args.phases();
    let outdir = &args.output_dir;

    println!(
        "BBOB post-processing: generating output data in folder {}",
        outdir.display()
    );

    // Idempotent; a pre-existing directory from an earlier run is fine.
    fs::create_dir_all(outdir)?;

    let Some(loaded) = loader::load_folders(&args.folders)? else {
        return Ok(());
    };
    debug!(
        datasets = loaded.all.len(),
        algorithms = loaded.sorted_algs.len(),
        "data loaded"
    );

    let by_alg = groups::filter_by_noise(&loaded.by_alg, args.noisy, args.noise_free);
    check_instance_counts(&loaded.all);

    let style = args.settings.style();
    let order = &loaded.sorted_algs;

    if phases.profiles {
        // Two sweeps over the same data sliced differently; the label keeps
        // their output files apart.
        for (ng, sub) in groups::by_noise(&by_alg) {
            for (dim, entries) in groups::by_dim(&sub) {
                let label = format!("{dim:02}D_{}", ng.key());
                render::profiles::render(
                    &entries,
                    &SUMMARIZED_TARGETS,
                    order,
                    &style,
                    outdir,
                    &label,
                )?;
            }
        }
        for (fg, sub) in groups::by_func_group(&by_alg) {
            for (dim, entries) in groups::by_dim(&sub) {
                let label = format!("{dim:02}D_{}", fg.key());
                render::profiles::render(
                    &entries,
                    &SUMMARIZED_TARGETS,
                    order,
                    &style,
                    outdir,
                    &label,
                )?;
            }
        }
        println!("ECDFs of ERT figures done.");
    }

    if phases.tables {
        for (_ng, sub) in groups::by_noise(&by_alg) {
            for (_dim, entries) in groups::by_dim(&sub) {
                render::tables::render(&entries, order, &TABLE_TARGETS, outdir)?;
            }
        }
        println!("Comparison tables done.");
    }

    if phases.figures {
        render::scaling::render(&by_alg, order, SCALING_TARGET, &style, outdir)?;
        println!("Scaling figures done.");
    }

    Ok(())
}

/// Data-sufficiency check: for the dimensions of interest, every dataset
/// should record the reference instances with the reference trial counts.
/// Validation only; mismatches warn and rendering proceeds regardless.
fn check_instance_counts(all: &DataSetList) {
    let expected: BTreeMap<u32, usize> = INSTANCES_OF_INTEREST.iter().copied().collect();
    for ds in all {
        if !DIMS_OF_INTEREST.contains(&ds.dim) {
            continue;
        }
        if ds.instance_counts() != expected {
            warn!(
                algorithm = %ds.alg_name,
                func = ds.func_id,
                dim = ds.dim,
                "data does not list the expected instances of function F{}",
                ds.func_id
            );
        }
    }
}
