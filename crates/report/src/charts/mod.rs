// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comparison charts.
//!
//! [`ChartData`] is the backend-independent model behind the three
//! charts: sorted axes, a system → scenario → throughput lookup, and the
//! cached/uncached split. Drawing lives in `render` and is compiled only
//! with the `charts` feature; without it [`ChartRenderer`] is a no-op.

#[cfg(feature = "charts")]
mod render;

use crate::error::Result;
use crate::record::ResultRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Grouped bars per scenario.
pub const CHART_RPS_FILE: &str = "chart_rps.png";
/// Average throughput per system.
pub const CHART_AVG_RPS_FILE: &str = "chart_avg_rps.png";
/// Cached vs. uncached side-by-side panels.
pub const CHART_CACHE_FILE: &str = "chart_cache_comparison.png";

/// Bar colors, cycled by system index.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (0x2e, 0xcc, 0x71),
    (0x34, 0x98, 0xdb),
    (0xe7, 0x4c, 0x3c),
    (0x9b, 0x59, 0xb6),
];

/// Palette entry for the system at `index`.
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Cache behaviour a scenario was run with, taken from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheMode {
    /// Name ends in the `cached` segment.
    Cached,
    /// Name ends in the `uncached` segment.
    Uncached,
}

impl CacheMode {
    /// Panel order of the comparison chart.
    pub const ALL: [CacheMode; 2] = [CacheMode::Cached, CacheMode::Uncached];

    /// Name segment that marks this mode.
    pub fn tag(self) -> &'static str {
        match self {
            CacheMode::Cached => "cached",
            CacheMode::Uncached => "uncached",
        }
    }

    /// Panel title.
    pub fn title(self) -> &'static str {
        match self {
            CacheMode::Cached => "Cached Scenarios",
            CacheMode::Uncached => "Uncached Scenarios",
        }
    }

    /// Classify a scenario by its final `-`-separated segment.
    ///
    /// Returns the mode and the display label with the tag removed.
    /// Only an exact `cached`/`uncached` segment counts, so
    /// `static-uncached` is never classified as cached.
    pub fn classify(scenario: &str) -> Option<(CacheMode, &str)> {
        let (base, tag) = match scenario.rsplit_once('-') {
            Some((base, tag)) => (base, tag),
            None => (scenario, scenario),
        };
        let mode = CacheMode::ALL.into_iter().find(|m| m.tag() == tag)?;
        Some((mode, base))
    }
}

/// One cluster of bars: a scenario and the label shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioGroup {
    /// Axis label.
    pub label: String,
    /// Scenario key into [`ChartData`].
    pub scenario: String,
}

/// Backend-independent data behind the charts.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    /// Distinct systems, ascending. Fixes legend and color order.
    pub systems: Vec<String>,
    /// Distinct scenarios, ascending. Fixes cluster order.
    pub scenarios: Vec<String>,
    throughput: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ChartData {
    /// Build chart data from records.
    ///
    /// Several records for the same system and scenario are averaged.
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut systems = BTreeSet::new();
        let mut scenarios = BTreeSet::new();
        let mut samples: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();

        for record in records {
            systems.insert(record.system.clone());
            scenarios.insert(record.scenario.clone());
            let entry = samples
                .entry((record.system.as_str(), record.scenario.as_str()))
                .or_insert((0.0, 0));
            entry.0 += record.throughput();
            entry.1 += 1;
        }

        let mut throughput: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for ((system, scenario), (sum, count)) in samples {
            if count > 1 {
                warn!(
                    system,
                    scenario,
                    count,
                    "duplicate results for system and scenario, charting their average"
                );
            }
            throughput
                .entry(system.to_string())
                .or_default()
                .insert(scenario.to_string(), sum / count as f64);
        }

        Self {
            systems: systems.into_iter().collect(),
            scenarios: scenarios.into_iter().collect(),
            throughput,
        }
    }

    /// Throughput for a system under a scenario, 0 when not measured.
    pub fn throughput(&self, system: &str, scenario: &str) -> f64 {
        self.throughput
            .get(system)
            .and_then(|by_scenario| by_scenario.get(scenario))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean of a system's positive throughput values, 0 if it has none.
    pub fn average_positive(&self, system: &str) -> f64 {
        let values: Vec<f64> = self
            .throughput
            .get(system)
            .map(|by_scenario| by_scenario.values().copied().filter(|v| *v > 0.0).collect())
            .unwrap_or_default();
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    /// Largest charted value, 0 when there is none.
    pub fn max_throughput(&self) -> f64 {
        self.throughput
            .values()
            .flat_map(|by_scenario| by_scenario.values().copied())
            .fold(0.0, f64::max)
    }

    /// Every scenario, labelled with its own name.
    pub fn scenario_groups(&self) -> Vec<ScenarioGroup> {
        self.scenarios
            .iter()
            .map(|s| ScenarioGroup {
                label: s.clone(),
                scenario: s.clone(),
            })
            .collect()
    }

    /// Scenarios run with `mode`, labelled without the cache tag.
    pub fn cache_groups(&self, mode: CacheMode) -> Vec<ScenarioGroup> {
        self.scenarios
            .iter()
            .filter_map(|s| match CacheMode::classify(s) {
                Some((m, base)) if m == mode => Some(ScenarioGroup {
                    label: base.to_string(),
                    scenario: s.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// Format a value with thousands separators and no decimals.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Renders the comparison charts into a reports directory.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    enabled: bool,
}

impl ChartRenderer {
    /// Create a renderer. A disabled renderer never writes anything.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether the drawing backend was compiled in.
    pub fn is_available() -> bool {
        cfg!(feature = "charts")
    }

    /// Whether [`render`](Self::render) will produce files.
    pub fn is_active(&self) -> bool {
        self.enabled && Self::is_available()
    }

    /// Render all charts into `output_dir` and return the written paths.
    ///
    /// Returns an empty list without error when the renderer is disabled
    /// or the backend is unavailable.
    pub fn render(&self, records: &[ResultRecord], output_dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.is_active() {
            return Ok(Vec::new());
        }
        let data = ChartData::from_records(records);
        render_all(&data, output_dir)
    }
}

#[cfg(feature = "charts")]
fn render_all(data: &ChartData, output_dir: &Path) -> Result<Vec<PathBuf>> {
    render::render_all(data, output_dir)
}

#[cfg(not(feature = "charts"))]
fn render_all(_data: &ChartData, _output_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(Vec::new())
}
