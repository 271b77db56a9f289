// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! PNG rendering of the comparison charts with plotters.

use super::{
    format_thousands, palette_color, CacheMode, ChartData, ScenarioGroup, CHART_AVG_RPS_FILE,
    CHART_CACHE_FILE, CHART_RPS_FILE,
};
use crate::error::{ReportError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const RPS_SIZE: (u32, u32) = (2100, 1200);
const AVG_SIZE: (u32, u32) = (1500, 900);
const CACHE_SIZE: (u32, u32) = (2100, 900);

const FONT: &str = "sans-serif";

/// Fraction of a cluster slot covered by bars.
const CLUSTER_SPAN: f64 = 0.8;

/// Headroom above the tallest bar.
const Y_HEADROOM: f64 = 1.15;

/// Distance from a slot centre within which an axis label is printed.
const LABEL_TOLERANCE: f64 = 1e-6;

pub(super) fn render_all(data: &ChartData, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let charts: [(&str, fn(&ChartData, &Path) -> DrawResult<()>); 3] = [
        (CHART_RPS_FILE, draw_rps_chart),
        (CHART_AVG_RPS_FILE, draw_average_chart),
        (CHART_CACHE_FILE, draw_cache_chart),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (file, draw) in charts {
        let path = output_dir.join(file);
        draw(data, &path).map_err(|e| ReportError::Chart {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "rendered chart");
        written.push(path);
    }
    Ok(written)
}

fn draw_rps_chart(data: &ChartData, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, RPS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_grouped_bars(
        &root,
        "Performance Comparison - Requests per Second",
        28,
        &data.scenario_groups(),
        data,
        Some("Scenario"),
    )?;
    root.present()?;
    Ok(())
}

fn draw_average_chart(data: &ChartData, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, AVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let averages: Vec<f64> = data
        .systems
        .iter()
        .map(|s| data.average_positive(s))
        .collect();
    let y_max = y_axis_max(averages.iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Performance by System",
            (FONT, 28).into_font().style(FontStyle::Bold),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(slot_range(averages.len()), 0.0..y_max)?;

    let formatter = |x: &f64| label_at(&data.systems, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(averages.len().max(1))
        .x_label_formatter(&formatter)
        .y_desc("Average Requests/sec")
        .x_desc("System")
        .draw()?;

    chart.draw_series(averages.iter().enumerate().map(|(i, &v)| {
        let left = i as f64 - CLUSTER_SPAN / 2.0;
        Rectangle::new([(left, 0.0), (left + CLUSTER_SPAN, v)], rgb(i).filled())
    }))?;

    let annotation = TextStyle::from((FONT, 18).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let lift = y_max * 0.01;
    chart.draw_series(averages.iter().enumerate().map(|(i, &v)| {
        Text::new(
            format_thousands(v),
            (i as f64, v + lift),
            annotation.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_cache_chart(data: &ChartData, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, CACHE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    for (panel, mode) in panels.iter().zip(CacheMode::ALL) {
        draw_grouped_bars(panel, mode.title(), 22, &data.cache_groups(mode), data, None)?;
    }

    root.present()?;
    Ok(())
}

/// One cluster per group, one bar per system, legend by system.
fn draw_grouped_bars<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    title_size: u32,
    groups: &[ScenarioGroup],
    data: &ChartData,
    x_desc: Option<&str>,
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_max = y_axis_max(groups.iter().flat_map(|g| {
        data.systems
            .iter()
            .map(move |s| data.throughput(s, &g.scenario))
    }));

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, title_size).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(180)
        .y_label_area_size(100)
        .build_cartesian_2d(slot_range(groups.len()), 0.0..y_max)?;

    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
    let formatter = |x: &f64| label_at(&labels, *x);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(groups.len().max(1))
            .x_label_formatter(&formatter)
            .x_label_style((FONT, 16).into_font().transform(FontTransform::Rotate90))
            .y_desc("Requests/sec");
        if let Some(desc) = x_desc {
            mesh.x_desc(desc);
        }
        mesh.draw()?;
    }

    let bar_width = CLUSTER_SPAN / data.systems.len().max(1) as f64;
    for (i, system) in data.systems.iter().enumerate() {
        let color = rgb(i);
        chart
            .draw_series(groups.iter().enumerate().map(|(slot, g)| {
                let left = slot as f64 - CLUSTER_SPAN / 2.0 + bar_width * i as f64;
                let value = data.throughput(system, &g.scenario);
                Rectangle::new([(left, 0.0), (left + bar_width, value)], color.filled())
            }))?
            .label(system.to_uppercase())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// X range with one unit-wide slot per cluster, centred on the slot index.
///
/// With `x_labels(slots)` the integer key points land on slot centres.
fn slot_range(slots: usize) -> Range<f64> {
    -0.5..slots.max(1) as f64 - 0.5
}

fn label_at(labels: &[String], x: f64) -> String {
    let slot = x.round();
    if slot < 0.0 || (x - slot).abs() > LABEL_TOLERANCE {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

fn y_axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0, f64::max);
    if max > 0.0 {
        max * Y_HEADROOM
    } else {
        1.0
    }
}

fn rgb(index: usize) -> RGBColor {
    let (r, g, b) = palette_color(index);
    RGBColor(r, g, b)
}
