//! Graph types and data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y_scale: AxisScale,
    pub legend: LegendPlacement,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 1670,
            height: 827,
            x_label: Some("Date".to_string()),
            y_label: Some("Views".to_string()),
            y_scale: AxisScale::Linear,
            legend: LegendPlacement::Inside,
            style: StyleConfig::default(),
        }
    }
}

/// Y axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScale {
    Linear,
    /// Base 10; values below 1 are drawn at 1.
    Log,
}

/// Where the legend goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPlacement {
    /// Upper left corner of the plot area.
    Inside,
    /// A column right of the plot area.
    Outside,
}

/// Line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One labelled line on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub line_style: LineStyle,
}

impl TimeSeries {
    /// Create a series from its points
    pub fn new(label: impl Into<String>, points: Vec<(NaiveDate, f64)>, line_style: LineStyle) -> Self {
        Self {
            label: label.into(),
            points,
            line_style,
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name.
    pub family: String,
    /// Size in pixels.
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Space around the plot area, in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Outer margin of the chart.
    pub top: u32,
    /// Height of the x label area.
    pub bottom: u32,
    /// Width of the y label area.
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            bottom: 60,
            left: 90,
        }
    }
}

/// Fonts, margins and line widths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Caption font.
    pub title_font: FontConfig,
    /// Axis and legend font.
    pub label_font: FontConfig,
    /// Plot area margins.
    pub margins: MarginConfig,
    /// Stroke width of the data lines.
    pub line_width: u32,
    /// Width of the legend column when the legend is outside.
    pub legend_width: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 24,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            line_width: 1,
            legend_width: 320,
        }
    }
}
