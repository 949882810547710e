/// Chart rendering
///
/// Draws the two report panels into one PNG: incidents per year on the left,
/// the busiest countries on the right.

use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;

use crate::config::ReportConfig;
use crate::core::aggregate::Aggregates;

const TAB_RED: RGBColor = RGBColor(214, 39, 40);
const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
const NAVY: RGBColor = RGBColor(0, 0, 128);

const FONT: &str = "sans-serif";

/// Pixel sizes scaled to the canvas height; the base values suit a 600px tall figure
#[derive(Debug, Clone, Copy)]
struct Scale(f64);

impl Scale {
    fn px(self, base: f64) -> u32 {
        (base * self.0).round().max(1.0) as u32
    }
}

/// Render both panels and write the image.
///
/// # Arguments
///
/// * `aggregates` - Counts to plot
/// * `config` - Chart size and the number of countries to show
/// * `output` - Destination PNG path, overwritten if present
pub fn render_chart(aggregates: &Aggregates, config: &ReportConfig, output: &Path) -> Result<()> {
    let (width, height) = (config.chart.width, config.chart.height);
    let scale = Scale(height as f64 / 600.0);

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    draw_yearly(&panels[0], &aggregates.yearly, scale)?;
    draw_countries(&panels[1], aggregates.countries.top(config.top_countries), scale)?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;
    info!("Chart written to {} ({}x{})", output.display(), width, height);

    Ok(())
}

/// Line chart of incidents per year with a marker on every year
fn draw_yearly<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    yearly: &BTreeMap<i32, usize>,
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let first = yearly.keys().next().copied().unwrap_or(1970);
    let last = yearly.keys().next_back().copied().unwrap_or(first);
    let max_count = yearly.values().copied().max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Attacks by Islamist-extremist groups per year (1970-2009)",
            (FONT, scale.px(16.0)),
        )
        .margin(scale.px(12.0))
        .x_label_area_size(scale.px(45.0))
        .y_label_area_size(scale.px(60.0))
        .build_cartesian_2d((first - 1)..(last + 1), 0usize..headroom(max_count))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of attacks")
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .label_style((FONT, scale.px(12.0)))
        .axis_desc_style((FONT, scale.px(13.0)))
        .draw()?;

    let points: Vec<(i32, usize)> = yearly.iter().map(|(year, count)| (*year, *count)).collect();
    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        TAB_RED.stroke_width(scale.px(2.0)),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, scale.px(4.0), TAB_RED.filled())),
    )?;

    Ok(())
}

/// Bar chart of the busiest countries with rotated names
fn draw_countries<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    countries: &[(String, usize)],
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let max_count = countries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let bars = countries.len().max(1) as u32;

    let mut chart = ChartBuilder::on(area)
        .caption("Top 10 countries", (FONT, scale.px(16.0)))
        .margin(scale.px(12.0))
        .x_label_area_size(scale.px(120.0))
        .y_label_area_size(scale.px(60.0))
        .build_cartesian_2d((0u32..bars).into_segmented(), 0usize..headroom(max_count))?;

    let country_label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(index) => countries
            .get(*index as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .x_desc("Country")
        .y_desc("Number of attacks")
        .x_labels(countries.len())
        .x_label_formatter(&country_label)
        .x_label_style((FONT, scale.px(12.0)).into_font().transform(FontTransform::Rotate90))
        .y_label_style((FONT, scale.px(12.0)))
        .axis_desc_style((FONT, scale.px(13.0)))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let gap = scale.px(8.0);
    let bar = |index: usize, count: usize, style: ShapeStyle| {
        let index = index as u32;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0),
                (SegmentValue::Exact(index + 1), count),
            ],
            style,
        );
        rect.set_margin(0, 0, gap, gap);
        rect
    };

    chart.draw_series(
        countries
            .iter()
            .enumerate()
            .map(|(index, (_, count))| bar(index, *count, TAB_BLUE.filled())),
    )?;
    chart.draw_series(
        countries
            .iter()
            .enumerate()
            .map(|(index, (_, count))| bar(index, *count, NAVY.stroke_width(scale.px(1.0)))),
    )?;

    Ok(())
}

/// Upper bound of the count axis, leaving a tenth of room above the tallest value
fn headroom(max_count: usize) -> usize {
    max_count + max_count / 10 + 1
}

/// Hand the saved chart to the platform's image viewer.
///
/// Skipped when stdout is not a terminal; a viewer that fails to start is
/// logged and otherwise ignored.
pub fn show_chart(path: &Path) {
    if !std::io::stdout().is_terminal() {
        debug!("Not a terminal, skipping chart viewer");
        return;
    }

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();
    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(path).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg(path).spawn();
    #[cfg(not(any(unix, target_os = "windows")))]
    let result: std::io::Result<std::process::Child> = Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no image viewer for this platform",
    ));

    if let Err(e) = result {
        warn!("Failed to open chart viewer for {}: {}", path.display(), e);
    }
}
