//! Line chart rendering with plotters

use crate::types::{AxisScale, GraphConfig, LegendPlacement, LineStyle, TimeSeries};
use crate::utils::{dash_segments, date_to_x, format_views, x_label};
use dino_common::{PageviewsError, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const DASH_PIECES: usize = 4;
const LEGEND_ROW_HEIGHT: i32 = 22;
const LEGEND_SWATCH: i32 = 24;

/// Ten hue cycle, enough for a top-10 chart without repeats.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Time series line charts written to PNG files
#[derive(Debug, Default, Clone, Copy)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self
    }

    /// Render `series` as one chart at `path`
    pub fn render_to_file(&self, config: &GraphConfig, series: &[TimeSeries], path: &Path) -> Result<()> {
        if series.is_empty() {
            return Err(PageviewsError::graph(format!(
                "No series to draw for '{}'",
                config.title
            )));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let plotted: Vec<Vec<(f64, f64)>> = series
            .iter()
            .map(|s| project_points(s, config.y_scale))
            .collect();
        let (x_range, y_range) = data_ranges(&plotted, config.y_scale);

        let (plot_area, legend_area) = match config.legend {
            LegendPlacement::Inside => (root.clone(), None),
            LegendPlacement::Outside => {
                let plot_width = config.width.saturating_sub(config.style.legend_width);
                let (plot, legend) = root.split_horizontally(plot_width);
                (plot, Some(legend))
            }
        };

        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(x_range, y_range)?;

        let log_scale = config.y_scale == AxisScale::Log;
        let y_formatter = |y: &f64| {
            if log_scale {
                format_views(10f64.powf(*y))
            } else {
                format_views(*y)
            }
        };
        let x_formatter = |x: &f64| x_label(*x);
        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style((
                config.style.label_font.family.as_str(),
                config.style.label_font.size,
            ))
            .draw()?;

        for (i, (s, points)) in series.iter().zip(plotted).enumerate() {
            let style = line_color(i).stroke_width(config.style.line_width);
            draw_line(&mut chart, s, points, style)?;
        }

        match legend_area {
            None => {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK.mix(0.3))
                    .label_font((
                        config.style.label_font.family.as_str(),
                        config.style.label_font.size,
                    ))
                    .draw()?;
            }
            Some(area) => Self::draw_outside_legend(&area, config, series)?,
        }

        root.present()?;
        info!("Successfully rendered line chart to {}", path.display());
        Ok(())
    }

    fn draw_outside_legend(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        config: &GraphConfig,
        series: &[TimeSeries],
    ) -> Result<()> {
        let font = (
            config.style.label_font.family.as_str(),
            config.style.label_font.size,
        );
        #[allow(clippy::cast_possible_wrap)]
        let top = config.style.margins.top as i32 + 40;

        for (i, s) in series.iter().enumerate() {
            let style = line_color(i).stroke_width(config.style.line_width.max(2));
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let y = top + i as i32 * LEGEND_ROW_HEIGHT;

            match s.line_style {
                LineStyle::Solid => {
                    area.draw(&PathElement::new(vec![(10, y), (10 + LEGEND_SWATCH, y)], style))?;
                }
                LineStyle::Dashed => {
                    let dash = LEGEND_SWATCH / 3;
                    area.draw(&PathElement::new(vec![(10, y), (10 + dash, y)], style))?;
                    area.draw(&PathElement::new(
                        vec![(10 + 2 * dash, y), (10 + LEGEND_SWATCH, y)],
                        style,
                    ))?;
                }
            }
            area.draw(&Text::new(
                s.label.clone(),
                (16 + LEGEND_SWATCH, y - LEGEND_ROW_HEIGHT / 3),
                font,
            ))?;
        }
        Ok(())
    }
}

/// Color of the `index`-th line; the palette repeats after ten.
pub fn line_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn draw_line<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>, series: &TimeSeries, points: Vec<(f64, f64)>, style: ShapeStyle) -> Result<()> {
    let legend_style = style;
    match series.line_style {
        LineStyle::Solid => {
            chart
                .draw_series(LineSeries::new(points, style))?
                .label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], legend_style));
        }
        LineStyle::Dashed => {
            let dashes = dash_segments(&points, DASH_PIECES);
            chart
                .draw_series(dashes.into_iter().map(|d| PathElement::new(d.to_vec(), style)))?
                .label(series.label.clone())
                .legend(move |(x, y)| {
                    let dash = LEGEND_SWATCH / 3;
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(0, 0), (dash, 0)], legend_style)
                        + PathElement::new(vec![(2 * dash, 0), (LEGEND_SWATCH, 0)], legend_style)
                });
        }
    }
    Ok(())
}

/// Chart coordinates of a series; log charts plot `log10(max(v, 1))`.
pub fn project_points(series: &TimeSeries, scale: AxisScale) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .map(|&(date, value)| {
            let y = match scale {
                AxisScale::Linear => value,
                AxisScale::Log => value.max(1.0).log10(),
            };
            (date_to_x(date), y)
        })
        .collect()
}

/// Axis ranges covering every point, padded.
pub fn data_ranges(plotted: &[Vec<(f64, f64)>], scale: AxisScale) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in plotted.iter().flatten() {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() {
        return (0.0..1.0, 0.0..1.0);
    }
    if (x_max - x_min).abs() < f64::EPSILON {
        x_min -= 1.0 / 12.0;
        x_max += 1.0 / 12.0;
    }

    let y_range = match scale {
        // Counts start at zero.
        AxisScale::Linear => 0.0..(y_max.max(1.0) * 1.1),
        AxisScale::Log => y_min.floor()..(y_max.ceil().max(y_min.floor() + 1.0)),
    };

    (x_min..x_max, y_range)
}
