//! ECDF-of-ERT performance profiles.
//!
//! One figure per (group, dimension) slice: for every algorithm, the
//! empirical cumulative distribution of ERT/dimension over all
//! (dataset, target) pairs of the slice. Pairs whose target is never
//! reached keep the curve below 1.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::data::dataset::AlgorithmMap;
use crate::style::PlotStyle;

const FIGURE_SIZE: (u32, u32) = (1200, 900);

/// Render one profile figure for an already-narrowed map. `label` encodes
/// which sweep produced the slice (`{dim:02}D_{group}`) and lands in the
/// filename, so the noise-group and function-group sweeps never collide.
pub fn render(
    map: &AlgorithmMap,
    targets: &[f64],
    order: &[String],
    style: &PlotStyle,
    outdir: &Path,
    label: &str,
) -> Result<(), Box<dyn Error>> {
    // Per algorithm: the finite ERT/dim values and the total pair count.
    let mut curves: Vec<(usize, &str, Vec<f64>, usize)> = Vec::new();
    for (idx, alg) in order.iter().enumerate() {
        let Some(list) = map.get(alg) else {
            continue;
        };
        if list.is_empty() {
            continue;
        }
        let total = list.len() * targets.len();
        let mut values: Vec<f64> = Vec::new();
        for ds in list {
            for &target in targets {
                let ert = ds.ert(target) / ds.dim as f64;
                if ert.is_finite() {
                    values.push(ert);
                }
            }
        }
        values.sort_by(f64::total_cmp);
        curves.push((idx, alg.as_str(), values, total));
    }
    if curves.is_empty() {
        return Ok(());
    }

    let finite = curves.iter().flat_map(|(_, _, v, _)| v.iter().copied());
    let (x_lo, x_hi) = x_range(finite);

    let out_path = outdir.join(format!("ppperfprof_{label}.svg"));
    let root = SVGBackend::new(&out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("ECDF of ERT, {label}"),
            ("sans-serif", style.title_size as i32),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), 0.0f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc("ERT / dimension")
        .y_desc("proportion of (function, target) pairs")
        .axis_desc_style(("sans-serif", style.axis_label_size as i32))
        .label_style(("sans-serif", style.tick_label_size as i32))
        .draw()?;

    for (idx, alg, values, total) in &curves {
        let line = style.line(*idx);
        let color = RGBColor(line.rgb.0, line.rgb.1, line.rgb.2);
        let stroke = ShapeStyle::from(&color).stroke_width(style.stroke_width);
        let points = ecdf_points(values, *total, x_lo, x_hi);

        let anno = match line.dash {
            None => chart.draw_series(LineSeries::new(points, stroke))?,
            Some((len, gap)) => chart.draw_series(DashedLineSeries::new(
                points,
                len as i32,
                gap as i32,
                stroke,
            ))?,
        };
        anno.label(alg.to_string()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], stroke)
        });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", style.legend_size as i32))
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Step polyline of the ECDF: flat from `x_lo`, a vertical step of `1/total`
/// at each solved value, flat out to `x_hi` at the final level.
fn ecdf_points(sorted_values: &[f64], total: usize, x_lo: f64, x_hi: f64) -> Vec<(f64, f64)> {
    let total = total.max(1) as f64;
    let mut points = Vec::with_capacity(sorted_values.len() * 2 + 2);
    points.push((x_lo, 0.0));
    for (i, &v) in sorted_values.iter().enumerate() {
        points.push((v, i as f64 / total));
        points.push((v, (i + 1) as f64 / total));
    }
    let level = sorted_values.len() as f64 / total;
    points.push((x_hi, level));
    points
}

fn x_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (1.0, 1e7);
    }
    let lo = (lo * 0.8).max(1e-2);
    let hi = (hi * 1.5).max(lo * 10.0);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{DataSet, Trial};
    use std::fs;
    use std::path::PathBuf;

    fn unique_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "bbob_postproc_profiles_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    fn dataset(alg: &str, func_id: u32, evals: u64) -> DataSet {
        DataSet {
            alg_name: alg.into(),
            alg_id: alg.to_lowercase(),
            func_id,
            dim: 5,
            precision: 1e-8,
            instances: vec![1],
            trials: vec![Trial {
                instance: 1,
                records: vec![(evals, 1e-9)],
                final_evals: evals,
                final_df: 1e-9,
            }],
        }
    }

    #[test]
    fn ecdf_steps_are_monotone_and_bounded() {
        let points = ecdf_points(&[2.0, 5.0, 9.0], 6, 1.0, 100.0);
        assert_eq!(points.first(), Some(&(1.0, 0.0)));
        assert_eq!(points.last(), Some(&(100.0, 0.5)));
        for pair in points.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
            assert!(pair[1].1 >= pair[0].1);
        }
    }

    #[test]
    fn unsolved_pairs_never_reach_one() {
        let points = ecdf_points(&[3.0], 2, 1.0, 10.0);
        assert!(points.iter().all(|&(_, y)| y <= 0.5));
    }

    #[test]
    fn writes_one_svg_per_call() {
        let dir = unique_dir("svg");
        fs::create_dir_all(&dir).unwrap();

        let mut map = AlgorithmMap::new();
        map.insert("A".into(), vec![dataset("A", 1, 100)].into_iter().collect());
        map.insert("B".into(), vec![dataset("B", 1, 400)].into_iter().collect());
        let order = vec!["A".to_string(), "B".to_string()];

        render(
            &map,
            &[1e-1, 1e-8],
            &order,
            &PlotStyle::grayscale(),
            &dir,
            "05D_noiselessall",
        )
        .unwrap();

        let out = dir.join("ppperfprof_05D_noiselessall.svg");
        let meta = fs::metadata(&out).expect("figure written");
        assert!(meta.len() > 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_slice_writes_nothing() {
        let dir = unique_dir("empty");
        fs::create_dir_all(&dir).unwrap();

        let map = AlgorithmMap::new();
        render(
            &map,
            &[1e-8],
            &["A".to_string()],
            &PlotStyle::color(),
            &dir,
            "02D_separ",
        )
        .unwrap();
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
