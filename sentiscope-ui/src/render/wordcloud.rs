//! Word Cloud Widget
//!
//! A raw-canvas widget: words from the upstream ranking laid out in rows,
//! font size scaled by frequency, colors cycled from the dashboard palette.
//! Not a chart-library instance, so destruction is an explicit clear of the
//! drawing surface.

use web_sys::HtmlCanvasElement;

use sentiscope::bindings::{palette, WordWeight};
use sentiscope::lifecycle::{Widget, WidgetRenderFailure};

use super::canvas::context;

const BACKGROUND: &str = "#f9fafb";
const MIN_FONT: f64 = 13.0;
const MAX_FONT: f64 = 42.0;
const PADDING: f64 = 12.0;

pub struct WordCloudCanvas {
    canvas: HtmlCanvasElement,
}

impl WordCloudCanvas {
    pub fn create(
        canvas: HtmlCanvasElement,
        words: &[WordWeight],
    ) -> Result<Self, WidgetRenderFailure> {
        let slot = canvas.id();
        if words.is_empty() {
            return Err(WidgetRenderFailure::new(slot, "word cloud without words"));
        }

        let ctx = context(&canvas).map_err(|e| WidgetRenderFailure::new(&slot, e))?;
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);

        let max_weight = words
            .iter()
            .map(|w| w.weight)
            .fold(0.0_f64, f64::max)
            .max(f64::EPSILON);

        // Row layout in ranking order: biggest words first, wrap at the
        // right edge, stop when the canvas runs out of height.
        let mut x = PADDING;
        let mut y = PADDING + MAX_FONT;
        let mut row_height = 0.0_f64;

        for (i, word) in words.iter().enumerate() {
            let size = MIN_FONT + (MAX_FONT - MIN_FONT) * (word.weight / max_weight);
            ctx.set_font(&format!("{:.0}px Inter, sans-serif", size));

            let word_width = ctx
                .measure_text(&word.word)
                .map(|m| m.width())
                .unwrap_or(size * word.word.chars().count() as f64 * 0.6);

            if x + word_width > width - PADDING {
                x = PADDING;
                y += row_height + 8.0;
                row_height = 0.0;
            }
            if y > height - PADDING {
                break;
            }

            ctx.set_fill_style_str(palette::WORDCLOUD[i % palette::WORDCLOUD.len()]);
            let _ = ctx.fill_text(&word.word, x, y);

            x += word_width + 14.0;
            row_height = row_height.max(size);
        }

        Ok(Self { canvas })
    }
}

impl Widget for WordCloudCanvas {
    fn destroy(&mut self) {
        if let Ok(ctx) = context(&self.canvas) {
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            ctx.clear_rect(0.0, 0.0, width, height);
        }
    }
}
