//! Reader for BBOB result folders.
//!
//! Each input folder holds one algorithm's experiment: `*.info` index files
//! (anywhere below the folder) made of three-line blocks
//!
//! ```text
//! funcId = 3, DIM = 5, Precision = 1.000e-08, algId = 'CMA-ES'
//! % free-form comment
//! data_f3/bbobexp_f3_DIM5.dat, 1:5387|-8.9e-09, 2:5147|-4.4e-09, ...
//! ```
//!
//! The third line names the runtime file (relative to the index file)
//! followed by one `instance:evaluations|Δf` entry per trial. The runtime
//! file carries whitespace-separated improvement rows; a `%` line opens a
//! new trial, and trials pair positionally with the index entries.
//!
//! Cosmetic damage is tolerated with a logged warning; unreadable files and
//! structurally broken index headers abort the load.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::data::dataset::{AlgorithmMap, DataSet, DataSetList, Trial};
use crate::error::DataError;

/// Everything the loader hands to the orchestrator.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Flat list of every dataset found, in load order.
    pub all: DataSetList,
    /// Algorithm display names in input-folder order; drives all rendering.
    pub sorted_algs: Vec<String>,
    /// Display name → that algorithm's datasets.
    pub by_alg: AlgorithmMap,
}

/// Load every input folder. Returns `Ok(None)` when a folder yields no
/// datasets at all: the run ends early with no output, which is not an
/// error.
pub fn load_folders(folders: &[PathBuf]) -> Result<Option<LoadedData>, DataError> {
    let mut all = DataSetList::new();
    let mut sorted_algs = Vec::new();
    let mut by_alg = AlgorithmMap::new();

    for folder in folders {
        let alg_name = display_name(folder);
        let mut info_files = Vec::new();
        collect_info_files(folder, &mut info_files)?;
        info_files.sort();

        let mut count = 0usize;
        for info_path in &info_files {
            for ds in parse_info_file(info_path, &alg_name)? {
                count += 1;
                all.push(ds.clone());
                by_alg.entry(alg_name.clone()).or_default().push(ds);
            }
        }

        if count == 0 {
            warn!(folder = %folder.display(), "no benchmark data found, nothing to do");
            return Ok(None);
        }
        debug!(folder = %folder.display(), algorithm = %alg_name, count, "loaded datasets");

        if !sorted_algs.contains(&alg_name) {
            sorted_algs.push(alg_name);
        }
    }

    Ok(Some(LoadedData {
        all,
        sorted_algs,
        by_alg,
    }))
}

/// Algorithm display name: the folder's last path component.
fn display_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

fn collect_info_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DataError> {
    let entries = fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_info_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "info") {
            out.push(path);
        }
    }
    Ok(())
}

struct Header {
    func_id: u32,
    dim: u32,
    precision: f64,
    alg_id: String,
}

fn is_header(line: &str) -> bool {
    line.contains("funcId") && line.contains('=')
}

fn parse_info_file(path: &Path, alg_name: &str) -> Result<Vec<DataSet>, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let lines: Vec<&str> = text.lines().collect();

    let mut datasets = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if !is_header(line) {
            i += 1;
            continue;
        }
        let header = parse_header(path, i + 1, line)?;

        // Skip comment/blank lines to the data line of this block.
        let mut j = i + 1;
        while j < lines.len() {
            let l = lines[j].trim();
            if l.is_empty() || l.starts_with('%') {
                j += 1;
            } else {
                break;
            }
        }
        if j >= lines.len() || is_header(lines[j].trim()) {
            warn!(path = %path.display(), line = i + 1, "index block without data line, skipped");
            i = j;
            continue;
        }

        if let Some(ds) = parse_data_line(path, j + 1, lines[j].trim(), &header, alg_name) {
            datasets.push(ds);
        }
        i = j + 1;
    }
    Ok(datasets)
}

fn parse_header(path: &Path, line_no: usize, line: &str) -> Result<Header, DataError> {
    let mut func_id = None;
    let mut dim = None;
    let mut precision = 1e-8;
    let mut alg_id = String::new();

    for piece in line.split(',') {
        let Some((key, value)) = piece.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "funcId" => func_id = value.parse::<u32>().ok(),
            "DIM" => dim = value.parse::<u32>().ok(),
            "Precision" => {
                if let Ok(p) = value.parse::<f64>() {
                    precision = p;
                }
            }
            "algId" => alg_id = value.trim_matches(|c| c == '\'' || c == '"').to_string(),
            _ => {}
        }
    }

    let func_id = func_id
        .ok_or_else(|| DataError::malformed(path, line_no, "missing or unparsable funcId"))?;
    let dim =
        dim.ok_or_else(|| DataError::malformed(path, line_no, "missing or unparsable DIM"))?;
    Ok(Header {
        func_id,
        dim,
        precision,
        alg_id,
    })
}

/// Parse one `datafile, inst:evals|df, ...` line into a dataset. Returns
/// `None` when the line lists no usable trials.
fn parse_data_line(
    path: &Path,
    line_no: usize,
    line: &str,
    header: &Header,
    alg_name: &str,
) -> Option<DataSet> {
    let mut pieces = line.split(',');
    let dat_rel = pieces.next()?.trim();

    let mut entries: Vec<(u32, u64, f64)> = Vec::new();
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let Some((inst, rest)) = piece.split_once(':') else {
            warn!(path = %path.display(), line = line_no, entry = piece, "unparsable trial entry, skipped");
            continue;
        };
        let Some((evals, df)) = rest.split_once('|') else {
            warn!(path = %path.display(), line = line_no, entry = piece, "trial entry without final Δf, skipped");
            continue;
        };
        let parsed = (
            inst.trim().parse::<u32>(),
            evals.trim().parse::<f64>(),
            df.trim().parse::<f64>(),
        );
        match parsed {
            (Ok(inst), Ok(evals), Ok(df)) if evals >= 0.0 => {
                entries.push((inst, evals as u64, df));
            }
            _ => {
                warn!(path = %path.display(), line = line_no, entry = piece, "unparsable trial entry, skipped");
            }
        }
    }

    if entries.is_empty() {
        warn!(path = %path.display(), line = line_no, "data line without trial entries, skipped");
        return None;
    }

    let dat_path = resolve_dat_path(path, dat_rel);
    let record_sets = match load_dat_file(&dat_path) {
        Some(sets) => sets,
        None => {
            warn!(path = %dat_path.display(), "runtime file missing or unreadable, using index entries only");
            Vec::new()
        }
    };
    if !record_sets.is_empty() && record_sets.len() != entries.len() {
        warn!(
            path = %dat_path.display(),
            index_trials = entries.len(),
            runtime_trials = record_sets.len(),
            "trial count mismatch between index and runtime file"
        );
    }

    let mut trials = Vec::with_capacity(entries.len());
    for (idx, &(instance, final_evals, final_df)) in entries.iter().enumerate() {
        let records = record_sets.get(idx).cloned().unwrap_or_default();
        trials.push(Trial {
            instance,
            records,
            final_evals,
            final_df,
        });
    }

    Some(DataSet {
        alg_name: alg_name.to_string(),
        alg_id: header.alg_id.clone(),
        func_id: header.func_id,
        dim: header.dim,
        precision: header.precision,
        instances: entries.iter().map(|&(inst, _, _)| inst).collect(),
        trials,
    })
}

/// Runtime paths are written with `/` (or `\` from Windows runs) relative to
/// the index file.
fn resolve_dat_path(info_path: &Path, dat_rel: &str) -> PathBuf {
    let normalized = dat_rel.replace('\\', "/");
    let mut path = info_path.parent().map(PathBuf::from).unwrap_or_default();
    for comp in normalized.split('/').filter(|c| !c.is_empty()) {
        path.push(comp);
    }
    path
}

/// Split a runtime file into per-trial `(evaluations, best Δf)` records.
/// `None` when the file cannot be read at all.
fn load_dat_file(path: &Path) -> Option<Vec<Vec<(u64, f64)>>> {
    let text = fs::read_to_string(path).ok()?;
    let mut sets: Vec<Vec<(u64, f64)>> = Vec::new();
    let mut current: Vec<(u64, f64)> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('%') {
            if !current.is_empty() {
                sets.push(std::mem::take(&mut current));
            }
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 {
            warn!(path = %path.display(), row = line, "short runtime row, skipped");
            continue;
        }
        match (cols[0].parse::<f64>(), cols[2].parse::<f64>()) {
            (Ok(evals), Ok(df)) if evals >= 0.0 => current.push((evals as u64, df)),
            _ => warn!(path = %path.display(), row = line, "unparsable runtime row, skipped"),
        }
    }
    if !current.is_empty() {
        sets.push(current);
    }
    Some(sets)
}
