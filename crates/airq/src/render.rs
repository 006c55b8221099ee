use crate::prelude::*;
use airq_core::encoding::Rgb;
use airq_core::plot::PlotSpec;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;

/// Canvas size in pixels (a 10x6 figure at 100 dpi)
pub const CANVAS: (u32, u32) = (1000, 600);

/// Width reserved on the right for the colorbar
const COLORBAR_WIDTH: i32 = 160;

/// Colorbar label font size, also the minimum vertical room per label
const LABEL_HEIGHT: i32 = 12;

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// y axis range with some headroom; flat or empty data still gets a span
fn y_range(spec: &PlotSpec) -> (f64, f64) {
    match spec.y_bounds() {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Label every n-th colorbar entry so labels never overlap
fn label_stride(entries: usize, height: i32) -> usize {
    if entries == 0 || height <= 0 {
        return 1;
    }
    let per_label = height as usize / LABEL_HEIGHT as usize;
    entries.div_ceil(per_label.max(1)).max(1)
}

/// Draw the scatter plot and its colorbar into an SVG file
pub fn render_plot(spec: &PlotSpec, path: &Path) -> Result<()> {
    log::info!(
        "rendering {} points over {} parameters to {}",
        spec.points.len(),
        spec.x_categories.len(),
        path.display()
    );

    let root = SVGBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let (plot_area, bar_area) = root.split_horizontally(CANVAS.0 as i32 - COLORBAR_WIDTH);

    let categories = spec.x_categories.len().max(1);
    let (y_lo, y_hi) = y_range(spec);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..categories).into_segmented(), y_lo..y_hi)?;

    let label_for = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            spec.x_categories.get(*i).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories)
        .x_label_formatter(&label_for)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;

    chart.draw_series(spec.points.iter().filter_map(|p| {
        let rgb = spec.location_color(p.location_code)?;
        Some(Circle::new(
            (SegmentValue::CenterOf(p.x), p.y),
            5,
            color(rgb).filled(),
        ))
    }))?;

    draw_colorbar(spec, &bar_area)?;

    root.present()?;
    Ok(())
}

/// Discrete colorbar: one swatch per location code, labeled with its name
fn draw_colorbar<DB>(spec: &PlotSpec, area: &DrawingArea<DB, plotters::coord::Shift>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (_, height) = area.dim_in_pixel();
    let top = 60;
    let bottom = height as i32 - 60;
    let swatch_x = (10, 30);

    area.draw(&Text::new(
        spec.colorbar_label.clone(),
        (swatch_x.0, top - 25),
        ("sans-serif", 16),
    ))
    .map_err(|e| eyre!("Failed to draw colorbar label: {e:?}"))?;

    if spec.colorbar.is_empty() {
        return Ok(());
    }

    let entries = spec.colorbar.len();
    let span = (bottom - top).max(1);
    let edge = |code: usize| top + (code as i64 * span as i64 / entries as i64) as i32;
    let stride = label_stride(entries, span);

    for (code, entry) in spec.colorbar.iter().enumerate() {
        let (y0, y1) = (edge(code), edge(code + 1));
        area.draw(&Rectangle::new(
            [(swatch_x.0, y0), (swatch_x.1, y1.max(y0 + 1))],
            color(entry.color).filled(),
        ))
        .map_err(|e| eyre!("Failed to draw colorbar: {e:?}"))?;

        if code % stride != 0 {
            continue;
        }
        area.draw(&Text::new(
            entry.location.clone(),
            (swatch_x.1 + 6, (y0 + y1) / 2 - LABEL_HEIGHT / 2),
            ("sans-serif", LABEL_HEIGHT),
        ))
        .map_err(|e| eyre!("Failed to draw colorbar: {e:?}"))?;
    }

    area.draw(&Rectangle::new(
        [(swatch_x.0, top), (swatch_x.1, edge(entries))],
        BLACK.stroke_width(1),
    ))
    .map_err(|e| eyre!("Failed to draw colorbar: {e:?}"))?;

    Ok(())
}
