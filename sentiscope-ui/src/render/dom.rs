//! DOM Panel Widget
//!
//! Non-canvas widget slots (the emotion ratio meter, stat lists, the
//! metrics table and no-data placeholders) render as HTML into their
//! anchor element. Destruction empties the anchor, which satisfies the
//! same capability interface the canvas widgets use.

use web_sys::Element;

use sentiscope::bindings::{MeterSpec, StatLine, TableSpec, WidgetSpec};
use sentiscope::lifecycle::{Widget, WidgetRenderFailure};
use sentiscope::text::escape_html;

pub struct DomPanel {
    element: Element,
}

impl DomPanel {
    pub fn create(element: Element, spec: &WidgetSpec) -> Result<Self, WidgetRenderFailure> {
        let slot = element.id();

        let html = match spec {
            WidgetSpec::Meter(meter) => meter_html(meter),
            WidgetSpec::Stats(lines) => stats_html(lines),
            WidgetSpec::Table(table) => table_html(table),
            WidgetSpec::NoData(reason) => no_data_html(reason),
            WidgetSpec::Chart(_) | WidgetSpec::WordCloud(_) => {
                return Err(WidgetRenderFailure::new(
                    slot,
                    "chart descriptor bound to a non-canvas slot",
                ));
            }
        };

        element.set_inner_html(&html);
        Ok(Self { element })
    }
}

impl Widget for DomPanel {
    fn destroy(&mut self) {
        self.element.set_inner_html("");
    }
}

fn meter_html(meter: &MeterSpec) -> String {
    format!(
        r#"<div class="ratio-meter">
  <div class="ratio-bar">
    <div class="ratio-positive" style="width: {pos:.1}%"></div>
    <div class="ratio-negative" style="width: {neg:.1}%"></div>
  </div>
  <div class="ratio-counts">
    <span class="positive">{pos_count:.0} positivas ({pos:.1}%)</span>
    <span class="negative">{neg_count:.0} negativas ({neg:.1}%)</span>
  </div>
  <div class="ratio-value">Ratio negativo/positivo: {ratio:.2}</div>
</div>"#,
        pos = meter.percent_positive,
        neg = meter.percent_negative,
        pos_count = meter.positive_count,
        neg_count = meter.negative_count,
        ratio = meter.ratio,
    )
}

fn stats_html(lines: &[StatLine]) -> String {
    let rows: String = lines
        .iter()
        .map(|line| {
            format!(
                r#"<div class="stat-line"><span class="stat-label">{}</span><span class="stat-value">{}</span></div>"#,
                escape_html(&line.label),
                escape_html(&line.value)
            )
        })
        .collect();
    format!(r#"<div class="stat-list">{rows}</div>"#)
}

fn table_html(table: &TableSpec) -> String {
    let head: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c)))
        .collect();

    let body: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(
        r#"<table class="metrics-table"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>"#
    )
}

fn no_data_html(reason: &str) -> String {
    format!(r#"<p class="no-data">{}</p>"#, escape_html(reason))
}
