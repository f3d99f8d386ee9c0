//! Render Pass
//!
//! Runs the full binding catalogue against the active document and mounts
//! one widget per slot through the lifecycle manager: destroy everything,
//! then rebuild each slot from its fresh description. A missing anchor is
//! skipped with a console warning; a broken descriptor is contained to its
//! slot by the manager.

pub mod canvas;
pub mod dom;
pub mod wordcloud;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};

use sentiscope::bindings::{WidgetSpec, CATALOGUE};
use sentiscope::lifecycle::{ChartLifecycleManager, Widget, WidgetRenderFailure};
use sentiscope::model::AnalysisDocument;

use canvas::CanvasChart;
use dom::DomPanel;
use wordcloud::WordCloudCanvas;

/// Destroy every mounted widget and rebuild all slots from `doc`.
pub fn render_pass(manager: &mut ChartLifecycleManager, doc: &AnalysisDocument) {
    manager.destroy_all();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    for binding in CATALOGUE.iter() {
        let spec = binding.build(doc);

        match document.get_element_by_id(binding.slot) {
            Some(element) => {
                manager.mount_with(binding.slot, || create_widget(element, spec));
            }
            None => {
                web_sys::console::warn_1(
                    &format!("anchor #{} not found, slot skipped", binding.slot).into(),
                );
            }
        }
    }

    web_sys::console::log_1(&format!("render pass complete: {} widgets", manager.live_count()).into());
}

/// Build the widget matching the anchor kind and the descriptor kind.
fn create_widget(
    element: Element,
    spec: WidgetSpec,
) -> Result<Box<dyn Widget>, WidgetRenderFailure> {
    let slot = element.id();

    match element.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => match spec {
            WidgetSpec::Chart(desc) => {
                CanvasChart::create(canvas, &desc).map(|w| Box::new(w) as Box<dyn Widget>)
            }
            WidgetSpec::WordCloud(words) => {
                WordCloudCanvas::create(canvas, &words).map(|w| Box::new(w) as Box<dyn Widget>)
            }
            WidgetSpec::NoData(reason) => CanvasChart::create_placeholder(canvas, &reason)
                .map(|w| Box::new(w) as Box<dyn Widget>),
            WidgetSpec::Meter(_) | WidgetSpec::Stats(_) | WidgetSpec::Table(_) => Err(
                WidgetRenderFailure::new(slot, "panel descriptor bound to a canvas slot"),
            ),
        },
        Err(element) => {
            DomPanel::create(element, &spec).map(|w| Box::new(w) as Box<dyn Widget>)
        }
    }
}
