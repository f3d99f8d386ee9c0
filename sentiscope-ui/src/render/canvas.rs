//! Canvas Chart Widget
//!
//! Draws a core `ChartDescription` onto an HTML5 canvas: vertical and
//! horizontal bars (grouped, signed), doughnuts and radars. Destruction
//! clears the drawing surface, which is all the teardown a raw canvas
//! needs.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use sentiscope::bindings::{ChartDescription, ChartKind, Series, SeriesColor};
use sentiscope::lifecycle::{Widget, WidgetRenderFailure};

const BACKGROUND: &str = "#ffffff";
const GRID: &str = "#e5e7eb";
const AXIS_TEXT: &str = "#6b7280";
const NO_DATA_TEXT: &str = "#9ca3af";

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 28.0;
const MARGIN_BOTTOM: f64 = 52.0;

/// A chart drawn onto one canvas slot.
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
}

impl CanvasChart {
    /// Validate the description and draw it.
    pub fn create(
        canvas: HtmlCanvasElement,
        desc: &ChartDescription,
    ) -> Result<Self, WidgetRenderFailure> {
        let slot = canvas.id();

        if desc.series.is_empty() {
            return Err(WidgetRenderFailure::new(slot, "descriptor has no series"));
        }
        for series in &desc.series {
            if series.values.len() != desc.labels.len() {
                return Err(WidgetRenderFailure::new(
                    slot.clone(),
                    format!(
                        "series '{}' has {} values for {} labels",
                        series.name,
                        series.values.len(),
                        desc.labels.len()
                    ),
                ));
            }
            if let SeriesColor::PerValue(colors) = &series.color {
                if colors.len() != series.values.len() {
                    return Err(WidgetRenderFailure::new(
                        slot.clone(),
                        format!("series '{}' has a color/value count mismatch", series.name),
                    ));
                }
            }
        }

        let ctx = context(&canvas).map_err(|e| WidgetRenderFailure::new(&slot, e))?;
        let chart = Self { canvas };

        chart.clear(&ctx);
        match desc.kind {
            ChartKind::Bar => chart.draw_bars(&ctx, desc),
            ChartKind::Doughnut => chart.draw_doughnut(&ctx, desc),
            ChartKind::Radar => chart.draw_radar(&ctx, desc),
        }

        Ok(chart)
    }

    /// A canvas slot with nothing to show: centered placeholder text.
    pub fn create_placeholder(
        canvas: HtmlCanvasElement,
        message: &str,
    ) -> Result<Self, WidgetRenderFailure> {
        let slot = canvas.id();
        let ctx = context(&canvas).map_err(|e| WidgetRenderFailure::new(slot, e))?;
        let chart = Self { canvas };

        chart.clear(&ctx);
        let (width, height) = chart.dims();
        ctx.set_fill_style_str(NO_DATA_TEXT);
        ctx.set_font("14px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(message, width / 2.0, height / 2.0);
        ctx.set_text_align("start");

        Ok(chart)
    }

    fn dims(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&self, ctx: &CanvasRenderingContext2d) {
        let (width, height) = self.dims();
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);
    }

    /// Vertical or horizontal bars, grouped by series, negative values
    /// growing away from the zero line.
    fn draw_bars(&self, ctx: &CanvasRenderingContext2d, desc: &ChartDescription) {
        let (width, height) = self.dims();
        let chart_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let chart_h = height - MARGIN_TOP - MARGIN_BOTTOM;

        let (min, max) = value_range(desc);
        let span = max - min;

        if desc.series.len() > 1 {
            self.draw_legend(ctx, &desc.series, width);
        }

        // Grid + value-axis labels.
        ctx.set_line_width(1.0);
        ctx.set_font("11px sans-serif");
        for i in 0..=5 {
            let t = i as f64 / 5.0;
            ctx.set_stroke_style_str(GRID);
            ctx.set_fill_style_str(AXIS_TEXT);
            ctx.begin_path();

            if desc.options.horizontal {
                let x = MARGIN_LEFT + t * chart_w;
                ctx.move_to(x, MARGIN_TOP);
                ctx.line_to(x, height - MARGIN_BOTTOM);
                ctx.stroke();
                let value = min + t * span;
                let _ = ctx.fill_text(&format!("{:.1}", value), x - 10.0, height - MARGIN_BOTTOM + 16.0);
            } else {
                let y = MARGIN_TOP + t * chart_h;
                ctx.move_to(MARGIN_LEFT, y);
                ctx.line_to(width - MARGIN_RIGHT, y);
                ctx.stroke();
                let value = max - t * span;
                let _ = ctx.fill_text(&format!("{:.1}", value), 8.0, y + 4.0);
            }
        }

        let groups = desc.labels.len() as f64;
        let series_count = desc.series.len() as f64;

        if desc.options.horizontal {
            let zero_x = MARGIN_LEFT + ((0.0 - min) / span) * chart_w;
            let row_h = chart_h / groups;
            let bar_h = (row_h * 0.7 / series_count).max(2.0);

            for (label_idx, label) in desc.labels.iter().enumerate() {
                let row_top = MARGIN_TOP + label_idx as f64 * row_h;

                ctx.set_fill_style_str(AXIS_TEXT);
                ctx.set_text_align("right");
                let _ = ctx.fill_text(
                    &shorten(label, 14),
                    MARGIN_LEFT - 6.0,
                    row_top + row_h / 2.0 + 4.0,
                );
                ctx.set_text_align("start");

                for (series_idx, series) in desc.series.iter().enumerate() {
                    let value = series.values[label_idx];
                    let value_x = MARGIN_LEFT + ((value - min) / span) * chart_w;
                    let y = row_top + row_h * 0.15 + series_idx as f64 * bar_h;

                    ctx.set_fill_style_str(series_color(series, label_idx));
                    ctx.fill_rect(
                        zero_x.min(value_x),
                        y,
                        (value_x - zero_x).abs().max(1.0),
                        bar_h - 1.0,
                    );
                }
            }
        } else {
            let zero_y = MARGIN_TOP + ((max - 0.0) / span) * chart_h;
            let group_w = chart_w / groups;
            let bar_w = (group_w * 0.7 / series_count).max(2.0);

            for (label_idx, label) in desc.labels.iter().enumerate() {
                let group_left = MARGIN_LEFT + label_idx as f64 * group_w;

                ctx.set_fill_style_str(AXIS_TEXT);
                ctx.set_text_align("center");
                let _ = ctx.fill_text(
                    &shorten(label, 12),
                    group_left + group_w / 2.0,
                    height - MARGIN_BOTTOM + 16.0,
                );
                ctx.set_text_align("start");

                for (series_idx, series) in desc.series.iter().enumerate() {
                    let value = series.values[label_idx];
                    let value_y = MARGIN_TOP + ((max - value) / span) * chart_h;
                    let x = group_left + group_w * 0.15 + series_idx as f64 * bar_w;

                    ctx.set_fill_style_str(series_color(series, label_idx));
                    ctx.fill_rect(
                        x,
                        zero_y.min(value_y),
                        bar_w - 1.0,
                        (value_y - zero_y).abs().max(1.0),
                    );
                }
            }
        }

        if let Some(title) = &desc.options.axis_title {
            ctx.set_fill_style_str(AXIS_TEXT);
            ctx.set_font("11px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(&shorten(title, 70), width / 2.0, height - 6.0);
            ctx.set_text_align("start");
        }
    }

    fn draw_doughnut(&self, ctx: &CanvasRenderingContext2d, desc: &ChartDescription) {
        let (width, height) = self.dims();
        let series = &desc.series[0];
        let total: f64 = series.values.iter().sum();
        if total <= 0.0 {
            return;
        }

        let cx = width * 0.38;
        let cy = height / 2.0;
        let outer = (width.min(height) / 2.0 - 16.0).max(10.0);
        let inner = outer * 0.55;

        let mut angle = -std::f64::consts::FRAC_PI_2;
        for (i, value) in series.values.iter().enumerate() {
            let sweep = value / total * std::f64::consts::TAU;

            ctx.set_fill_style_str(series_color(series, i));
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, outer, angle, angle + sweep);
            let _ = ctx.arc_with_anticlockwise(cx, cy, inner, angle + sweep, angle, true);
            ctx.close_path();
            ctx.fill();

            angle += sweep;
        }

        // Legend with value and share, to the right of the ring.
        ctx.set_font("12px sans-serif");
        let legend_x = width * 0.68;
        for (i, label) in desc.labels.iter().enumerate() {
            let y = cy - (desc.labels.len() as f64 / 2.0 - i as f64 - 0.5) * 20.0;
            let value = series.values[i];

            ctx.set_fill_style_str(series_color(series, i));
            ctx.fill_rect(legend_x, y - 9.0, 10.0, 10.0);

            ctx.set_fill_style_str(AXIS_TEXT);
            let _ = ctx.fill_text(
                &format!("{}: {:.0} ({:.1}%)", label, value, value / total * 100.0),
                legend_x + 16.0,
                y,
            );
        }
    }

    fn draw_radar(&self, ctx: &CanvasRenderingContext2d, desc: &ChartDescription) {
        let (width, height) = self.dims();
        let axes = desc.labels.len();
        if axes < 3 {
            // A radar needs a polygon; fall back to the placeholder text.
            ctx.set_fill_style_str(NO_DATA_TEXT);
            ctx.set_font("14px sans-serif");
            let _ = ctx.fill_text("Datos insuficientes", width / 2.0 - 60.0, height / 2.0);
            return;
        }

        let cx = width / 2.0;
        let cy = height / 2.0 + 6.0;
        let radius = (width.min(height) / 2.0 - 36.0).max(10.0);

        let max_value = desc
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
            .max(f64::EPSILON);

        let angle_of = |i: usize| -> f64 {
            -std::f64::consts::FRAC_PI_2 + i as f64 / axes as f64 * std::f64::consts::TAU
        };

        // Rings and spokes.
        ctx.set_stroke_style_str(GRID);
        ctx.set_line_width(1.0);
        for ring in 1..=4 {
            let r = radius * ring as f64 / 4.0;
            ctx.begin_path();
            for i in 0..=axes {
                let a = angle_of(i % axes);
                let (x, y) = (cx + r * a.cos(), cy + r * a.sin());
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }

        ctx.set_font("11px sans-serif");
        for i in 0..axes {
            let a = angle_of(i);
            ctx.begin_path();
            ctx.move_to(cx, cy);
            ctx.line_to(cx + radius * a.cos(), cy + radius * a.sin());
            ctx.stroke();

            ctx.set_fill_style_str(AXIS_TEXT);
            ctx.set_text_align("center");
            let _ = ctx.fill_text(
                &shorten(&desc.labels[i], 12),
                cx + (radius + 18.0) * a.cos(),
                cy + (radius + 14.0) * a.sin() + 4.0,
            );
            ctx.set_text_align("start");
        }

        // One translucent polygon per series.
        for series in &desc.series {
            let color = series_color(series, 0);
            ctx.set_stroke_style_str(color);
            ctx.set_fill_style_str(color);
            ctx.set_line_width(2.0);

            ctx.begin_path();
            for i in 0..=axes {
                let idx = i % axes;
                let a = angle_of(idx);
                let r = radius * (series.values[idx] / max_value);
                let (x, y) = (cx + r * a.cos(), cy + r * a.sin());
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.set_global_alpha(0.15);
            ctx.fill();
            ctx.set_global_alpha(1.0);
            ctx.stroke();
        }

        self.draw_legend(ctx, &desc.series, width);
    }

    /// Series swatches along the top edge.
    fn draw_legend(&self, ctx: &CanvasRenderingContext2d, series: &[Series], width: f64) {
        ctx.set_font("11px sans-serif");
        let mut x = MARGIN_LEFT;
        for s in series {
            if x > width - 90.0 {
                break;
            }
            ctx.set_fill_style_str(series_color(s, 0));
            ctx.fill_rect(x, 8.0, 10.0, 10.0);
            ctx.set_fill_style_str(AXIS_TEXT);
            let _ = ctx.fill_text(&shorten(&s.name, 18), x + 14.0, 17.0);
            x += 14.0 + 7.0 * s.name.chars().count().min(18) as f64 + 18.0;
        }
    }
}

impl Widget for CanvasChart {
    fn destroy(&mut self) {
        if let Ok(ctx) = context(&self.canvas) {
            let (width, height) = (self.canvas.width() as f64, self.canvas.height() as f64);
            ctx.clear_rect(0.0, 0.0, width, height);
        }
    }
}

/// 2d context or a human-readable reason.
pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|_| "canvas 2d context unavailable".to_string())?
        .ok_or_else(|| "canvas 2d context unavailable".to_string())?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "canvas 2d context has an unexpected type".to_string())
}

fn value_range(desc: &ChartDescription) -> (f64, f64) {
    if let Some((min, max)) = desc.options.value_range {
        return (min, max);
    }

    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for series in &desc.series {
        for &value in &series.values {
            min = min.min(value);
            max = max.max(value);
        }
    }

    // Headroom so the tallest bar does not touch the frame.
    let span = max - min;
    if span <= 0.0 {
        (min, min + 1.0)
    } else {
        (
            if min < 0.0 { min - span * 0.05 } else { min },
            max + span * 0.05,
        )
    }
}

fn series_color(series: &Series, index: usize) -> &str {
    match &series.color {
        SeriesColor::Uniform(color) => color,
        SeriesColor::PerValue(colors) => colors
            .get(index)
            .map(|c| c.as_str())
            .unwrap_or("#9ca3af"),
    }
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{prefix}…")
    }
}
