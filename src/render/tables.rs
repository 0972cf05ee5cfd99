//! Comparison tables as TeX fragments.
//!
//! One file per (noise-group, dimension) slice. Each function present gets
//! a `tabular` block: target values as columns, one row per algorithm in
//! the fixed ordering, ERT per cell and a trailing `#succ` column counting
//! trials that reached the experiment's final precision.

use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data::dataset::{AlgorithmMap, DataSet};

/// Render the tables of one already-narrowed (noise-group, dimension) map.
/// Dimension and noise group are read off the data; all datasets of the
/// slice share them.
pub fn render(
    map: &AlgorithmMap,
    order: &[String],
    targets: &[f64],
    outdir: &Path,
) -> Result<(), Box<dyn Error>> {
    let Some(first) = map.values().flat_map(|list| list.iter()).next() else {
        return Ok(());
    };
    let dim = first.dim;
    let noise = first.noise_group();

    let mut func_ids: Vec<u32> = map
        .values()
        .flat_map(|list| list.iter().map(|ds| ds.func_id))
        .collect();
    func_ids.sort_unstable();
    func_ids.dedup();

    let mut out = String::new();
    out.push_str(&format!(
        "% Comparison tables, {dim}-D, {noise} functions.\n\
         % ERT to reach Fopt + Delta f; #succ counts trials reaching the final precision.\n"
    ));

    for &fid in &func_ids {
        out.push('\n');
        push_function_table(&mut out, map, order, targets, fid, dim);
    }

    let out_path = outdir.join(format!("pptable_{dim:02}D_{}.tex", noise.key()));
    fs::write(&out_path, out)?;
    debug!(path = %out_path.display(), functions = func_ids.len(), "comparison table written");
    Ok(())
}

fn push_function_table(
    out: &mut String,
    map: &AlgorithmMap,
    order: &[String],
    targets: &[f64],
    fid: u32,
    dim: u32,
) {
    let cols = targets.len();
    out.push_str(&format!(
        "\\begin{{tabular}}{{l|{}|r}}\n",
        "r".repeat(cols)
    ));
    out.push_str(&format!(
        "\\multicolumn{{{}}}{{c}}{{f{fid}, {dim}-D}} \\\\\n\\hline\n",
        cols + 2
    ));

    out.push_str("$\\Delta f$");
    for &target in targets {
        out.push_str(&format!(" & {:.0e}", target));
    }
    out.push_str(" & \\#succ \\\\\n\\hline\n");

    for alg in order {
        let Some(ds) = map
            .get(alg)
            .and_then(|list| list.iter().find(|ds| ds.func_id == fid))
        else {
            continue;
        };
        push_algorithm_row(out, alg, ds, targets);
    }

    out.push_str("\\hline\n\\end{tabular}\n");
}

fn push_algorithm_row(out: &mut String, alg: &str, ds: &DataSet, targets: &[f64]) {
    out.push_str(&tex_escape(alg));
    for &target in targets {
        out.push_str(" & ");
        out.push_str(&fmt_ert(ds.ert(target)));
    }
    out.push_str(&format!(
        " & {}/{} \\\\\n",
        ds.success_count(),
        ds.trials.len()
    ));
}

/// Compact scientific notation for ERT values; unreached targets render as
/// infinity.
fn fmt_ert(ert: f64) -> String {
    if ert.is_finite() {
        format!("{ert:.1e}")
    } else {
        "$\\infty$".to_string()
    }
}

/// Algorithm names come from folder names and may carry TeX specials.
fn tex_escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' | '#' | '%' | '&' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
