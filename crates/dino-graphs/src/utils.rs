//! Axis and line helpers shared by the renderer.

use chrono::{Datelike, NaiveDate};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Continuous x value of a date: the year plus the elapsed fraction of it, by month.
pub fn date_to_x(date: NaiveDate) -> f64 {
    let day_fraction = f64::from(date.day0()) / 31.0;
    f64::from(date.year()) + (f64::from(date.month0()) + day_fraction) / 12.0
}

/// `Jan 2016` style label for an x value produced by [`date_to_x`].
pub fn x_label(x: f64) -> String {
    let year = x.floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let month = (((x - year) * 12.0) + 1e-6).floor().clamp(0.0, 11.0) as usize;
    #[allow(clippy::cast_possible_truncation)]
    let year = year as i32;
    format!("{} {year}", MONTH_ABBR[month])
}

/// Compact view count: `950`, `12.5K`, `3.2M`.
pub fn format_views(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Dash pieces of a polyline: every segment is cut into `pieces` equal
/// parts and every other part is kept, starting with the first.
pub fn dash_segments(points: &[(f64, f64)], pieces: usize) -> Vec<[(f64, f64); 2]> {
    let pieces = pieces.max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / pieces as f64;

    points
        .windows(2)
        .flat_map(|pair| {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            (0..pieces).step_by(2).map(move |i| {
                #[allow(clippy::cast_precision_loss)]
                let t0 = i as f64 * step;
                let t1 = t0 + step;
                [
                    (x0 + (x1 - x0) * t0, y0 + (y1 - y0) * t0),
                    (x0 + (x1 - x0) * t1, y0 + (y1 - y0) * t1),
                ]
            })
        })
        .collect()
}
