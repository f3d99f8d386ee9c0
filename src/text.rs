//! Narrative Text Utilities
//!
//! The LLM interpretation is a free-form narrative with `###` headings,
//! not a contractually structured format. Highlight extraction here is
//! best-effort substring sniffing with documented fallbacks; it must never
//! fail a render pass. The marker phrases live in [`HighlightMarkers`] as
//! configuration because upstream wording changes are expected.

use regex::Regex;

/// Heading marker the narrative uses between sections.
const SECTION_MARKER: &str = "###";

/// Shown when a marker is absent from the narrative.
pub const FALLBACK_TEXT: &str = "Ver interpretación completa";

/// Appended when a section body had to be cut to its budget.
pub const ELLIPSIS: &str = "...";

/// Character budget for the short highlight boxes.
pub const HIGHLIGHT_BUDGET: usize = 200;

/// Character budget for the longer conclusion blocks.
pub const CONCLUSION_BUDGET: usize = 500;

/// Marker substrings used to locate narrative sections.
#[derive(Debug, Clone)]
pub struct HighlightMarkers {
    pub predominant: String,
    pub positive_aspects: String,
    pub negative_aspects: String,
    pub patterns: String,
    pub insights: String,
    pub recommendations: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            predominant: "sentimiento predominante".to_string(),
            positive_aspects: "sentimientos positivos".to_string(),
            negative_aspects: "sentimientos negativos".to_string(),
            patterns: "Patrones o tendencias".to_string(),
            insights: "Insights interesantes".to_string(),
            recommendations: "Recomendaciones".to_string(),
        }
    }
}

/// Truncate to at most `budget` characters, appending an ellipsis only when
/// something was actually cut. Operates on characters, not bytes, so
/// accented narrative text never splits a UTF-8 boundary.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(budget) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

/// First line of body text of the section matching `marker`, truncated to
/// `budget` characters. `None` when no section matches or the matching
/// section has no body line.
pub fn extract_highlight(narrative: &str, marker: &str, budget: usize) -> Option<String> {
    section_body(narrative, marker).and_then(|body| {
        let line = body.lines().next()?.trim();
        if line.is_empty() {
            return None;
        }
        Some(truncate_chars(line, budget))
    })
}

/// Whole body of the section matching `marker`, truncated to `budget`
/// characters.
pub fn extract_block(narrative: &str, marker: &str, budget: usize) -> Option<String> {
    section_body(narrative, marker).and_then(|body| {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        Some(truncate_chars(body, budget))
    })
}

/// Like [`extract_highlight`] but never empty-handed.
pub fn highlight_or_fallback(narrative: &str, marker: &str, budget: usize) -> String {
    extract_highlight(narrative, marker, budget).unwrap_or_else(|| FALLBACK_TEXT.to_string())
}

/// Like [`extract_block`] but never empty-handed.
pub fn block_or_fallback(narrative: &str, marker: &str, budget: usize) -> String {
    extract_block(narrative, marker, budget).unwrap_or_else(|| FALLBACK_TEXT.to_string())
}

/// Body (everything after the heading line) of the first section whose text
/// contains `marker`.
fn section_body<'a>(narrative: &'a str, marker: &str) -> Option<&'a str> {
    narrative
        .split(SECTION_MARKER)
        .find(|section| section.contains(marker))
        .and_then(|section| section.split_once('\n'))
        .map(|(_, body)| body)
}

/// Filename-safe slug of a dataset topic: runs of non-word characters
/// collapse into single underscores.
pub fn slug(topic: &str) -> String {
    let re = Regex::new(r"\W+").expect("static pattern");
    let collapsed = re.replace_all(topic, "_");
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        "dataset".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download name for an exported document.
pub fn export_filename(topic: &str) -> String {
    format!("analisis_{}.json", slug(topic))
}

/// Escape text for interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the narrative's light markdown conventions (`###` headings,
/// `**bold**`, `*` bullet lines, blank-line paragraphs) into HTML. This is
/// a display convenience, not a markdown implementation: anything it does
/// not recognize stays plain escaped text.
pub fn render_interpretation_html(narrative: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut list_items: Vec<String> = Vec::new();

    fn flush_paragraph(html: &mut String, paragraph: &mut Vec<String>) {
        if !paragraph.is_empty() {
            html.push_str("<p>");
            html.push_str(&paragraph.join(" "));
            html.push_str("</p>");
            paragraph.clear();
        }
    }

    fn flush_list(html: &mut String, items: &mut Vec<String>) {
        if !items.is_empty() {
            html.push_str("<ul>");
            for item in items.iter() {
                html.push_str("<li>");
                html.push_str(item);
                html.push_str("</li>");
            }
            html.push_str("</ul>");
            items.clear();
        }
    }

    for line in narrative.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_list(&mut html, &mut list_items);
            flush_paragraph(&mut html, &mut paragraph);
        } else if let Some(heading) = trimmed.strip_prefix("### ") {
            flush_list(&mut html, &mut list_items);
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str("<h3>");
            html.push_str(&bold_spans(heading));
            html.push_str("</h3>");
        } else if let Some(item) = trimmed.strip_prefix("* ") {
            flush_paragraph(&mut html, &mut paragraph);
            list_items.push(bold_spans(item));
        } else {
            flush_list(&mut html, &mut list_items);
            paragraph.push(bold_spans(trimmed));
        }
    }

    flush_list(&mut html, &mut list_items);
    flush_paragraph(&mut html, &mut paragraph);
    html
}

/// Escape a line and turn `**span**` pairs into `<strong>` elements.
fn bold_spans(line: &str) -> String {
    let pieces: Vec<&str> = line.split("**").collect();
    if pieces.len() % 2 == 0 {
        // Unbalanced markers: leave the literal text alone.
        return escape_html(line);
    }

    let mut html = String::new();
    for (i, piece) in pieces.into_iter().enumerate() {
        let piece = escape_html(piece);
        if i % 2 == 1 {
            html.push_str("<strong>");
            html.push_str(&piece);
            html.push_str("</strong>");
        } else {
            html.push_str(&piece);
        }
    }
    html
}
