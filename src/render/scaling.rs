//! ERT scaling figures: ERT/dimension against dimension, one figure per
//! function, all algorithms overlaid at a single fixed target precision.
//!
//! Uses an enlarged-font copy of the run's style; these figures are shrunk
//! hard in the report layout.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::data::dataset::AlgorithmMap;
use crate::data::groups;
use crate::style::PlotStyle;

const FIGURE_SIZE: (u32, u32) = (900, 900);

pub fn render(
    map: &AlgorithmMap,
    order: &[String],
    target: f64,
    style: &PlotStyle,
    outdir: &Path,
) -> Result<(), Box<dyn Error>> {
    let style = style.enlarged();
    let func_ids = groups::func_ids(map);
    for fid in &func_ids {
        render_function(map, order, *fid, target, &style, outdir)?;
    }
    debug!(functions = func_ids.len(), "scaling figures written");
    Ok(())
}

fn render_function(
    map: &AlgorithmMap,
    order: &[String],
    fid: u32,
    target: f64,
    style: &PlotStyle,
    outdir: &Path,
) -> Result<(), Box<dyn Error>> {
    // One (dimension, ERT/dim) series per algorithm, finite points only.
    let mut series: Vec<(usize, &str, Vec<(f64, f64)>)> = Vec::new();
    let mut dims: Vec<u32> = Vec::new();
    for (idx, alg) in order.iter().enumerate() {
        let Some(list) = map.get(alg) else {
            continue;
        };
        let mut points: Vec<(f64, f64)> = Vec::new();
        for ds in list {
            if ds.func_id != fid {
                continue;
            }
            dims.push(ds.dim);
            let ert = ds.ert(target) / ds.dim as f64;
            if ert.is_finite() {
                points.push((ds.dim as f64, ert));
            }
        }
        if points.is_empty() {
            continue;
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        series.push((idx, alg.as_str(), points));
    }
    dims.sort_unstable();
    dims.dedup();
    if dims.is_empty() {
        return Ok(());
    }

    let x_lo = dims[0] as f64 / 1.5;
    let x_hi = *dims.last().unwrap() as f64 * 1.5;
    let (y_lo, y_hi) = y_range(&series);

    let out_path = outdir.join(format!("ppfigs_f{fid:03}.svg"));
    let root = SVGBackend::new(&out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("f{fid}, ERT/D at df = {target:.0e}"),
            ("sans-serif", style.title_size as i32),
        )
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("dimension")
        .y_desc("ERT / dimension")
        .axis_desc_style(("sans-serif", style.axis_label_size as i32))
        .label_style(("sans-serif", style.tick_label_size as i32))
        .draw()?;

    for (idx, alg, points) in &series {
        let line = style.line(*idx);
        let color = RGBColor(line.rgb.0, line.rgb.1, line.rgb.2);
        let stroke = ShapeStyle::from(&color).stroke_width(style.stroke_width);

        let anno = match line.dash {
            None => chart.draw_series(LineSeries::new(points.clone(), stroke))?,
            Some((len, gap)) => chart.draw_series(DashedLineSeries::new(
                points.clone(),
                len as i32,
                gap as i32,
                stroke,
            ))?,
        };
        anno.label(alg.to_string()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], stroke)
        });

        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, color.filled())),
        )?;
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", style.legend_size as i32))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn y_range(series: &[(usize, &str, Vec<(f64, f64)>)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, _, points) in series {
        for &(_, y) in points {
            lo = lo.min(y);
            hi = hi.max(y);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (1.0, 1e6);
    }
    let lo = (lo * 0.5).max(1e-2);
    let hi = (hi * 2.0).max(lo * 10.0);
    (lo, hi)
}
