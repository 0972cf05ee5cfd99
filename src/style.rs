//! Visual style presets for figures and tables.
//!
//! The original tool switched between whole settings modules and mutated
//! global plotting state before each phase. Here a preset is a plain
//! `PlotStyle` value handed to every renderer; the scaling figures derive an
//! enlarged copy with [`PlotStyle::enlarged`] instead of touching shared
//! state.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Name of a visual preset, as accepted by `--settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsName {
    /// Colored lines (default).
    Color,
    /// Shades of gray, distinguished by dash pattern.
    Grayscale,
    /// Black lines only, distinguished by dash pattern.
    BlackWhite,
}

impl SettingsName {
    pub fn style(self) -> PlotStyle {
        match self {
            Self::Color => PlotStyle::color(),
            Self::Grayscale => PlotStyle::grayscale(),
            Self::BlackWhite => PlotStyle::black_white(),
        }
    }
}

/// One algorithm's line appearance. `dash` is `(length, gap)` in pixels;
/// `None` draws a solid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub rgb: (u8, u8, u8),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<(u32, u32)>,
}

impl LineStyle {
    const fn solid(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: (r, g, b),
            dash: None,
        }
    }

    const fn dashed(r: u8, g: u8, b: u8, dash: (u32, u32)) -> Self {
        Self {
            rgb: (r, g, b),
            dash: Some(dash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    #[serde(default = "PlotStyle::default_title_size")]
    pub title_size: u32,
    #[serde(default = "PlotStyle::default_axis_label_size")]
    pub axis_label_size: u32,
    #[serde(default = "PlotStyle::default_tick_label_size")]
    pub tick_label_size: u32,
    #[serde(default = "PlotStyle::default_legend_size")]
    pub legend_size: u32,
    #[serde(default = "PlotStyle::default_stroke_width")]
    pub stroke_width: u32,
    #[serde(default = "PlotStyle::default_lines")]
    pub lines: Vec<LineStyle>,
}

impl PlotStyle {
    fn default_title_size() -> u32 {
        20
    }
    fn default_axis_label_size() -> u32 {
        15
    }
    fn default_tick_label_size() -> u32 {
        12
    }
    fn default_legend_size() -> u32 {
        13
    }
    fn default_stroke_width() -> u32 {
        2
    }
    fn default_lines() -> Vec<LineStyle> {
        COLOR_LINES.to_vec()
    }

    pub fn color() -> Self {
        Self {
            title_size: Self::default_title_size(),
            axis_label_size: Self::default_axis_label_size(),
            tick_label_size: Self::default_tick_label_size(),
            legend_size: Self::default_legend_size(),
            stroke_width: Self::default_stroke_width(),
            lines: COLOR_LINES.to_vec(),
        }
    }

    pub fn grayscale() -> Self {
        Self {
            lines: GRAYSCALE_LINES.to_vec(),
            ..Self::color()
        }
    }

    pub fn black_white() -> Self {
        Self {
            lines: BLACK_WHITE_LINES.to_vec(),
            ..Self::color()
        }
    }

    /// Line appearance of the algorithm at position `idx` in the fixed
    /// ordering. Cycles when there are more algorithms than palette entries.
    pub fn line(&self, idx: usize) -> LineStyle {
        self.lines[idx % self.lines.len()]
    }

    /// Enlarged-font copy used by the scaling figures.
    pub fn enlarged(&self) -> Self {
        Self {
            title_size: 24,
            axis_label_size: 20,
            tick_label_size: 20,
            legend_size: 20,
            stroke_width: self.stroke_width + 1,
            lines: self.lines.clone(),
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::color()
    }
}

const COLOR_LINES: [LineStyle; 7] = [
    LineStyle::solid(0, 0, 255),
    LineStyle::solid(0, 128, 0),
    LineStyle::solid(255, 0, 0),
    LineStyle::solid(0, 192, 192),
    LineStyle::solid(192, 0, 192),
    LineStyle::solid(224, 160, 0),
    LineStyle::solid(0, 0, 0),
];

const GRAYSCALE_LINES: [LineStyle; 6] = [
    LineStyle::solid(0, 0, 0),
    LineStyle::solid(90, 90, 90),
    LineStyle::solid(150, 150, 150),
    LineStyle::dashed(0, 0, 0, (8, 4)),
    LineStyle::dashed(90, 90, 90, (8, 4)),
    LineStyle::dashed(150, 150, 150, (8, 4)),
];

const BLACK_WHITE_LINES: [LineStyle; 5] = [
    LineStyle::solid(0, 0, 0),
    LineStyle::dashed(0, 0, 0, (10, 4)),
    LineStyle::dashed(0, 0, 0, (4, 4)),
    LineStyle::dashed(0, 0, 0, (2, 3)),
    LineStyle::dashed(0, 0, 0, (12, 2)),
];
