//! Two-panel SVG chart of the effective tax rate: quarterly values with a
//! trailing moving average, and annual values with an OLS trend line.

use std::fmt::Write as _;
use std::path::Path;

use crate::trend::LinearTrend;
use crate::{ObservationDate, Series};

const WIDTH: f64 = 960.0;
const PANEL_HEIGHT: f64 = 340.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const TITLE_HEIGHT: f64 = 40.0;
const AXIS_HEIGHT: f64 = 44.0;

/// Window of the trailing moving average drawn on the quarterly panel.
pub const MOVING_AVERAGE_WINDOW: usize = 4;

const QUARTERLY_COLOR: &str = "#1f77b4";
const OVERLAY_COLOR: &str = "#d62728";
const ANNUAL_COLOR: &str = "#2ca02c";

/// Render the chart and write it to `path`.
pub fn render_rate_chart(
    quarterly: Option<&Series>,
    annual: Option<&Series>,
    path: &Path,
) -> std::io::Result<()> {
    std::fs::write(path, rate_chart_svg(quarterly, annual))
}

/// Build the SVG document. Empty or absent series render a placeholder
/// panel instead of failing.
pub fn rate_chart_svg(quarterly: Option<&Series>, annual: Option<&Series>) -> String {
    let height = PANEL_HEIGHT * 2.0;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="{WIDTH}" height="{height}" fill="white"/>"#);

    draw_quarterly_panel(&mut svg, 0.0, quarterly.filter(|series| !series.is_empty()));
    draw_annual_panel(
        &mut svg,
        PANEL_HEIGHT,
        annual.filter(|series| !series.is_empty()),
    );

    svg.push_str("</svg>\n");
    svg
}

fn draw_quarterly_panel(svg: &mut String, offset_y: f64, series: Option<&Series>) {
    let title = "Effective Corporate Tax Rate (Quarterly)";
    let Some(series) = series else {
        draw_placeholder(svg, offset_y, title);
        return;
    };

    let scale = PlotScale::for_series(offset_y, series, &[]);
    draw_frame(svg, &scale, title);
    draw_polyline(svg, &scale, series, QUARTERLY_COLOR, 1.5);

    if let Ok(ma) = series.moving_average("ma", MOVING_AVERAGE_WINDOW) {
        if !ma.is_empty() {
            draw_polyline(svg, &scale, &ma, OVERLAY_COLOR, 2.0);
        }
    }

    draw_legend(
        svg,
        &scale,
        &[
            (QUARTERLY_COLOR, false, String::from("Quarterly")),
            (OVERLAY_COLOR, false, String::from("4-Quarter MA")),
        ],
    );
}

fn draw_annual_panel(svg: &mut String, offset_y: f64, series: Option<&Series>) {
    let title = "Effective Corporate Tax Rate (Annual)";
    let Some(series) = series else {
        draw_placeholder(svg, offset_y, title);
        return;
    };

    let trend = LinearTrend::fit_series(series);
    let trend_endpoints = trend.map(|t| [t.predict(0.0), t.predict((series.len() - 1) as f64)]);

    let extra = trend_endpoints.map(|ends| ends.to_vec()).unwrap_or_default();
    let scale = PlotScale::for_series(offset_y, series, &extra);
    draw_frame(svg, &scale, title);
    draw_polyline(svg, &scale, series, ANNUAL_COLOR, 2.0);

    for obs in series.iter() {
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.2}" cy="{:.2}" r="2.5" fill="{ANNUAL_COLOR}"/>"#,
            scale.x(day(obs.date)),
            scale.y(obs.value),
        );
    }

    let mut legend = vec![(ANNUAL_COLOR, false, String::from("Annual"))];
    if let (Some(trend), Some([y_first, y_last])) = (trend, trend_endpoints) {
        let first = series.first().expect("non-empty series has a first point");
        let last = series.last().expect("non-empty series has a last point");
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{OVERLAY_COLOR}" stroke-width="1.5" stroke-dasharray="6 4" opacity="0.8"/>"#,
            scale.x(day(first.date)),
            scale.y(y_first),
            scale.x(day(last.date)),
            scale.y(y_last),
        );
        legend.push((
            OVERLAY_COLOR,
            true,
            format!("Trend: {:.2}% per year", trend.slope),
        ));
    }

    draw_legend(svg, &scale, &legend);
}

/// Pixel mapping from (julian day, value) space to one panel's plot area.
struct PlotScale {
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
    day_min: f64,
    day_span: f64,
    v_min: f64,
    v_span: f64,
    first_year: i32,
    last_year: i32,
}

impl PlotScale {
    fn for_series(offset_y: f64, series: &Series, extra_values: &[f64]) -> Self {
        let first = series.first().expect("scaled series is non-empty");
        let last = series.last().expect("scaled series is non-empty");

        let day_min = day(first.date);
        let day_span = (day(last.date) - day_min).max(1.0);

        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;
        for value in series.values().iter().chain(extra_values) {
            v_min = v_min.min(*value);
            v_max = v_max.max(*value);
        }
        let pad = ((v_max - v_min) * 0.05).max(0.5);
        let v_min = v_min - pad;
        let v_span = (v_max + pad) - v_min;

        Self {
            x0: MARGIN_LEFT,
            y0: offset_y + TITLE_HEIGHT,
            w: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            h: PANEL_HEIGHT - TITLE_HEIGHT - AXIS_HEIGHT,
            day_min,
            day_span,
            v_min,
            v_span,
            first_year: first.date.year(),
            last_year: last.date.year(),
        }
    }

    fn x(&self, day: f64) -> f64 {
        self.x0 + (day - self.day_min) / self.day_span * self.w
    }

    fn y(&self, value: f64) -> f64 {
        self.y0 + (1.0 - (value - self.v_min) / self.v_span) * self.h
    }
}

fn day(date: ObservationDate) -> f64 {
    date.into_inner().to_julian_day() as f64
}

fn draw_frame(svg: &mut String, scale: &PlotScale, title: &str) {
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" font-size="16" font-weight="bold" text-anchor="middle">{title}</text>"#,
        scale.x0 + scale.w / 2.0,
        scale.y0 - 14.0,
    );

    let _ = writeln!(
        svg,
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#cccccc"/>"##,
        scale.x0, scale.y0, scale.w, scale.h,
    );

    // Horizontal gridlines with value labels, five divisions.
    for step in 0..=5 {
        let value = scale.v_min + scale.v_span * step as f64 / 5.0;
        let y = scale.y(value);
        let _ = writeln!(
            svg,
            r##"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#eeeeee"/>"##,
            scale.x0,
            scale.x0 + scale.w,
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end">{value:.1}</text>"#,
            scale.x0 - 6.0,
            y + 4.0,
        );
    }

    // Vertical gridlines at decade boundaries.
    let mut tick_year = scale.first_year.div_euclid(10) * 10;
    if tick_year < scale.first_year {
        tick_year += 10;
    }
    while tick_year <= scale.last_year {
        let tick_day = day(ObservationDate::year_end(tick_year - 1)) + 1.0;
        let x = scale.x(tick_day);
        let _ = writeln!(
            svg,
            r##"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="#eeeeee"/>"##,
            scale.y0,
            scale.y0 + scale.h,
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" font-size="11" text-anchor="middle">{tick_year}</text>"#,
            scale.y0 + scale.h + 16.0,
        );
        tick_year += 10;
    }

    // Y axis label.
    let label_y = scale.y0 + scale.h / 2.0;
    let _ = writeln!(
        svg,
        r#"<text x="18" y="{label_y:.2}" font-size="12" text-anchor="middle" transform="rotate(-90 18 {label_y:.2})">Effective Tax Rate (%)</text>"#,
    );
}

fn draw_polyline(svg: &mut String, scale: &PlotScale, series: &Series, color: &str, stroke_width: f64) {
    let mut points = String::new();
    for obs in series.iter() {
        let _ = write!(
            points,
            "{:.2},{:.2} ",
            scale.x(day(obs.date)),
            scale.y(obs.value),
        );
    }

    let _ = writeln!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}"/>"#,
        points.trim_end(),
    );
}

fn draw_legend(svg: &mut String, scale: &PlotScale, entries: &[(&str, bool, String)]) {
    let x = scale.x0 + scale.w - 210.0;
    let mut y = scale.y0 + 16.0;

    for (color, dashed, label) in entries {
        let dash_attr = if *dashed {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-width="2"{dash_attr}/>"#,
            y - 4.0,
            x + 26.0,
            y - 4.0,
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{y:.2}" font-size="12">{label}</text>"#,
            x + 32.0,
        );
        y += 18.0;
    }
}

fn draw_placeholder(svg: &mut String, offset_y: f64, title: &str) {
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" font-size="16" font-weight="bold" text-anchor="middle">{title}</text>"#,
        WIDTH / 2.0,
        offset_y + TITLE_HEIGHT - 14.0,
    );
    let _ = writeln!(
        svg,
        r##"<text x="{:.2}" y="{:.2}" font-size="13" fill="#888888" text-anchor="middle">no data available</text>"##,
        WIDTH / 2.0,
        offset_y + PANEL_HEIGHT / 2.0,
    );
}
