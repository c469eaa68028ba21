//! Draws a [`ChartSpec`] onto a canvas with plotters.
//!
//! The component is stateless: every render redraws the whole chart from its
//! props onto the canvas whose element id is `surface_id`.

use plotters::prelude::*;
use plotters::style::RGBAColor;
use plotters_canvas::CanvasBackend;
use shared::{ChartKind, ChartSpec};
use thiserror::Error;
use yew::prelude::*;

use crate::services::logging::Logger;

const DEFAULT_SERIES_COLOR: RGBAColor = RGBAColor(102, 126, 234, 1.0);
const AXIS_LABEL_COLOR: RGBColor = RGBColor(102, 126, 234);
/// Share of a category slot covered by its bars
const BAR_GROUP_WIDTH: f64 = 0.7;
/// Sampled points per segment of a curved line
const CURVE_STEPS: usize = 12;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no canvas with id '{0}'")]
    MissingSurface(String),

    #[error("chart drawing failed: {0}")]
    Draw(String),
}

fn draw_error<E: std::fmt::Debug>(error: E) -> ChartError {
    ChartError::Draw(format!("{:?}", error))
}

#[derive(Properties, PartialEq)]
pub struct ChartPresenterProps {
    pub spec: ChartSpec,
    pub surface_id: AttrValue,
    pub title: AttrValue,
    #[prop_or(600)]
    pub width: u32,
    #[prop_or(300)]
    pub height: u32,
}

pub struct ChartPresenter;

impl Component for ChartPresenter {
    type Message = ();
    type Properties = ChartPresenterProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="chart-card">
                <h3 class="chart-title">{props.title.clone()}</h3>
                <canvas
                    id={props.surface_id.clone()}
                    class="chart-canvas"
                    width={props.width.to_string()}
                    height={props.height.to_string()}
                ></canvas>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let props = ctx.props();
        if let Err(e) = render_chart(&props.surface_id, &props.spec) {
            Logger::warn_with_component("chart_presenter", &e.to_string());
        }
    }
}

/// Draw `spec` on the canvas element with id `surface_id`
pub fn render_chart(surface_id: &str, spec: &ChartSpec) -> Result<(), ChartError> {
    let backend =
        CanvasBackend::new(surface_id).ok_or_else(|| ChartError::MissingSurface(surface_id.to_string()))?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let (y_min, y_max) = spec.value_range();
    let baseline = 0.0_f64.clamp(y_min, y_max);
    let categories = spec.labels.len().max(1);

    let labels = &spec.labels;
    let x_formatter = |x: &f64| category_label(labels, *x);

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(categories as f64 - 0.5), y_min..y_max)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .label_style(("sans-serif", 12, &AXIS_LABEL_COLOR))
        .axis_style(&RGBColor(230, 230, 230))
        .bold_line_style(&RGBColor(245, 245, 245))
        .light_line_style(&RGBColor(250, 250, 250))
        .draw()
        .map_err(draw_error)?;

    let series_count = spec.series.len().max(1);
    for (series_index, series) in spec.series.iter().enumerate() {
        let stroke = series.style.border_color.as_deref().and_then(parse_css_color);
        let fill = series.style.background_color.as_deref().and_then(parse_css_color);
        let coords: Vec<(f64, f64)> = spec
            .points(series_index)
            .iter()
            .map(|point| (point.index as f64, point.value))
            .collect();

        match spec.kind {
            ChartKind::Line => {
                let line = stroke.or(fill).unwrap_or(DEFAULT_SERIES_COLOR);
                let path = smooth_path(&coords, series.style.tension);

                if series.style.fill {
                    let area = fill.unwrap_or_else(|| line.mix(0.1));
                    chart
                        .draw_series(AreaSeries::new(path.iter().copied(), baseline, area.filled()))
                        .map_err(draw_error)?;
                }

                chart
                    .draw_series(LineSeries::new(path.iter().copied(), line.stroke_width(3)))
                    .map_err(draw_error)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(3)));

                chart
                    .draw_series(coords.iter().map(|&point| Circle::new(point, 4, line.filled())))
                    .map_err(draw_error)?;
            }
            ChartKind::Bar => {
                let color = fill.or(stroke).unwrap_or(DEFAULT_SERIES_COLOR);
                let (left, right) = bar_span(series_index, series_count);

                chart
                    .draw_series(
                        coords
                            .iter()
                            .map(|&(x, y)| Rectangle::new([(x + left, baseline), (x + right, y)], color.filled())),
                    )
                    .map_err(draw_error)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            }
        }
    }

    if spec.options.show_legend && !spec.series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_error)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
pub fn parse_css_color(value: &str) -> Option<RGBAColor> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    let lower = value.to_ascii_lowercase();
    let (inner, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.strip_suffix(')')?.split(',').map(str::trim).collect();
    if parts.len() != if has_alpha { 4 } else { 3 } {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let alpha = if has_alpha {
        parts[3].parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))?
    } else {
        1.0
    };
    Some(RGBAColor(r, g, b, alpha))
}

fn parse_hex_color(hex: &str) -> Option<RGBAColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(RGBAColor(digit(0)?, digit(1)?, digit(2)?, 1.0))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(RGBAColor(pair(0)?, pair(2)?, pair(4)?, 1.0))
        }
        _ => None,
    }
}

/// Axis label for an x position; only whole category indexes get one
pub fn category_label(labels: &[String], x: f64) -> String {
    let nearest = x.round();
    if nearest < 0.0 || (x - nearest).abs() > 1e-6 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Horizontal extent of one series' bar, relative to its category centre
pub fn bar_span(series_index: usize, series_count: usize) -> (f64, f64) {
    let width = BAR_GROUP_WIDTH / series_count.max(1) as f64;
    let left = -BAR_GROUP_WIDTH / 2.0 + series_index as f64 * width;
    (left, left + width)
}

/// Sample a curve through `points`; tension 0 keeps straight segments.
///
/// Each segment is a cubic Bezier whose control points follow the
/// neighbouring points, so the curve still passes through every data point.
pub fn smooth_path(points: &[(f64, f64)], tension: f64) -> Vec<(f64, f64)> {
    if tension <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let k = tension.min(1.0) / 3.0;
    let last = points.len() - 1;
    let mut path = Vec::with_capacity(last * CURVE_STEPS + 1);
    path.push(points[0]);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        let c1 = (p1.0 + (p2.0 - p0.0) * k, p1.1 + (p2.1 - p0.1) * k);
        let c2 = (p2.0 - (p3.0 - p1.0) * k, p2.1 - (p3.1 - p1.1) * k);

        for step in 1..=CURVE_STEPS {
            let s = step as f64 / CURVE_STEPS as f64;
            path.push(cubic_bezier(p1, c1, c2, p2, s));
        }
    }
    path
}

fn cubic_bezier(p1: (f64, f64), c1: (f64, f64), c2: (f64, f64), p2: (f64, f64), s: f64) -> (f64, f64) {
    let u = 1.0 - s;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * s, 3.0 * u * s * s, s * s * s);
    (
        a * p1.0 + b * c1.0 + c * c2.0 + d * p2.0,
        a * p1.1 + b * c1.1 + c * c2.1 + d * p2.1,
    )
}
