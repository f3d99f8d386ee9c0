//! Sidebar: dataset selector, analysis metadata, section navigation and the
//! JSON export action.

use leptos::*;
use wasm_bindgen::JsCast;

use sentiscope::text::export_filename;

use crate::state::expect_state;

/// Section ids shown in the navigation, in page order.
pub const SECTIONS: [(&str, &str); 4] = [
    ("resumen", "Resumen Ejecutivo"),
    ("interpretacion", "Interpretación IA"),
    ("visualizaciones", "Visualizaciones"),
    ("conclusiones", "Conclusiones"),
];

#[component]
pub fn Sidebar(active_section: RwSignal<&'static str>) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="brand">
                <span class="brand-icon">"📊"</span>
                <span class="brand-name">"Sentiscope"</span>
            </div>

            <DatasetSelector />
            <MetadataPanel />
            <NavLinks active_section />
            <ExportButton />
        </aside>
    }
}

/// Dataset selector populated from the registry, in declared order. A
/// change activates the chosen dataset and re-renders everything.
#[component]
fn DatasetSelector() -> impl IntoView {
    let state = expect_state();

    let on_change = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        state.switch_dataset(&id);
    };

    view! {
        <div class="selector-block">
            <label for="dataset-selector">"Fuente de datos"</label>
            <select id="dataset-selector" on:change=on_change>
                {move || {
                    state.registry.with(|registry| {
                        let active = registry.active_id().map(|s| s.to_string());
                        registry
                            .available_ids()
                            .into_iter()
                            .map(|id| {
                                let id = id.to_string();
                                let name = registry
                                    .display_name(&id)
                                    .unwrap_or(&id)
                                    .to_string();
                                let selected = active.as_deref() == Some(id.as_str());
                                view! {
                                    <option value=id.clone() selected=selected>{name}</option>
                                }
                            })
                            .collect_view()
                    })
                }}
            </select>
        </div>
    }
}

/// Topic, size, date and model of the active analysis.
#[component]
fn MetadataPanel() -> impl IntoView {
    let state = expect_state();

    let field = move |pick: fn(&sentiscope::model::AnalysisDocument) -> String| {
        state
            .active_document()
            .map(|doc| pick(&doc))
            .unwrap_or_else(|| "—".to_string())
    };

    view! {
        <div class="metadata-panel">
            <MetaRow label="Tema">
                {move || field(|doc| {
                    if doc.metadata.topic.is_empty() {
                        "Sin tema".to_string()
                    } else {
                        doc.metadata.topic.clone()
                    }
                })}
            </MetaRow>
            <MetaRow label="Comentarios">
                {move || field(|doc| doc.metadata.total_comments.to_string())}
            </MetaRow>
            <MetaRow label="Fecha de análisis">
                {move || field(|doc| {
                    doc.metadata
                        .analysis_date
                        .as_deref()
                        .map(spanish_date)
                        .unwrap_or_else(|| "—".to_string())
                })}
            </MetaRow>
            <MetaRow label="Modelo LLM">
                {move || field(|doc| {
                    doc.llm_interpretation
                        .model_used
                        .clone()
                        .unwrap_or_else(|| "N/A".to_string())
                })}
            </MetaRow>
        </div>
    }
}

#[component]
fn MetaRow(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="meta-row">
            <span class="meta-label">{label}</span>
            <span class="meta-value">{children()}</span>
        </div>
    }
}

/// Navigation links: exactly one active section at a time, scrolled into
/// view on selection.
#[component]
fn NavLinks(active_section: RwSignal<&'static str>) -> impl IntoView {
    view! {
        <nav class="section-nav">
            {SECTIONS
                .into_iter()
                .map(|(id, label)| {
                    let on_click = move |_| {
                        active_section.set(id);
                        if let Some(section) = web_sys::window()
                            .and_then(|w| w.document())
                            .and_then(|d| d.get_element_by_id(id))
                        {
                            section.scroll_into_view();
                        }
                    };

                    view! {
                        <button
                            class="nav-link"
                            class:active=move || active_section.get() == id
                            on:click=on_click
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// Serialize the active document to pretty JSON and offer it as a
/// client-side download named from the topic slug.
#[component]
fn ExportButton() -> impl IntoView {
    let state = expect_state();

    let on_click = move |_| {
        let Some(doc) = state.active_document() else {
            return;
        };

        match serde_json::to_string_pretty(&doc) {
            Ok(json) => {
                if let Err(e) = download_json(&json, &export_filename(&doc.metadata.topic)) {
                    web_sys::console::error_1(&format!("export failed: {e}").into());
                    state.show_error("No se pudo exportar el dataset");
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("export serialization failed: {e}").into());
                state.show_error("No se pudo exportar el dataset");
            }
        }
    };

    view! {
        <button class="export-button" on:click=on_click>
            "⬇ Descargar JSON"
        </button>
    }
}

/// Blob + object URL + synthetic anchor click, revoked afterwards.
fn download_json(json: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(json));
    let blob = web_sys::Blob::new_with_str_sequence(&parts)
        .map_err(|_| "blob creation failed".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "object url creation failed".to_string())?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "anchor creation failed".to_string())?
        .dyn_into()
        .map_err(|_| "anchor has an unexpected type".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor)
        .map_err(|_| "anchor attach failed".to_string())?;
    anchor.click();
    anchor.remove();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// "2025-11-03T10:30:00Z" -> "3 de noviembre de 2025".
fn spanish_date(rfc3339: &str) -> String {
    use chrono::Datelike;

    let Ok(date) = chrono::DateTime::parse_from_rfc3339(rfc3339) else {
        return rfc3339.to_string();
    };

    let month = match date.month() {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        12 => "diciembre",
        _ => "",
    };

    format!("{} de {} de {}", date.day(), month, date.year())
}
