//! # Message Renderer
//!
//! Turns a transcript [`Message`] into styled ratatui [`Text`].
//!
//! The backend emits a deliberately small markup subset: line breaks,
//! `**bold**`, and `*italic*`. Anything else (headers, links, code fences)
//! passes through as literal text, so a full markdown parser would do more
//! harm than good here. The inline scanner below handles exactly that subset
//! and nothing more.
//!
//! Unterminated markers stay literal: `a **b` renders as `a **b`. Since the
//! output is a span tree rather than markup, content can never break the
//! rendering, so no escaping is needed.
//!
//! Below the body, replies carry their retrieval context:
//!
//! ```text
//! Sources (2):
//! • FB-1042 [Coastal Livelihoods] [Seaweed Cultivation] [Rameswaram] ... 87.3%
//! • FB-0981 [Coastal Livelihoods] [Net Mending] ... 64.0%
//! Found 2 relevant results (filters: course)
//! ```

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::api::{Metadata, Source};
use crate::core::state::Message;

/// Render a message's body, sources, and metadata into a span tree.
pub fn render(message: &Message) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = message
        .text
        .lines()
        .map(|line| Line::from(parse_inline(line)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::default());
    }

    if !message.sources.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Sources ({}):", message.sources.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for source in &message.sources {
            lines.push(source_line(source));
        }
    }

    if let Some(metadata) = &message.metadata {
        if let Some(line) = metadata_line(metadata) {
            lines.push(line);
        }
    }

    Text::from(lines)
}

/// One bullet per source: id in bold, then a bracketed tag for each field
/// the record carries, in a fixed order, then content types and relevance.
fn source_line(source: &Source) -> Line<'static> {
    let mut spans = vec![Span::raw("• ")];

    if !source.feedback_id.is_empty() {
        spans.push(Span::styled(
            source.feedback_id.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    // Field order is fixed so sources scan consistently. Empty fields are
    // skipped rather than rendered as empty brackets.
    let tags = [
        &source.project,
        &source.course,
        &source.centre,
        &source.batch,
        &source.date,
        &source.trainer,
        &source.logged_by,
    ];
    for tag in tags {
        if !tag.is_empty() {
            spans.push(Span::styled(
                format!(" [{tag}]"),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }

    if !source.content_types.is_empty() {
        spans.push(Span::raw(format!(" {}", source.content_types.join(", "))));
    }

    spans.push(Span::styled(
        format!(" {:.1}%", source.relevance_score * 100.0),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    Line::from(spans)
}

/// Summary line under the sources. Nothing is rendered when the metadata
/// carries no information at all.
fn metadata_line(metadata: &Metadata) -> Option<Line<'static>> {
    if metadata.is_empty() {
        return None;
    }

    let mut text = format!("Found {} relevant results", metadata.relevant_count);
    if !metadata.filters_applied.is_empty() {
        let keys: Vec<&str> = metadata.filters_applied.keys().map(String::as_str).collect();
        text.push_str(&format!(" (filters: {})", keys.join(", ")));
    }

    Some(Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    )))
}

/// Scan one line for `**bold**` pairs, then `*italic*` within the remainder.
/// Bold segments may themselves contain italics.
fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after_marker = &rest[start + 2..];
        match after_marker.find("**") {
            Some(end) => {
                parse_italic(&rest[..start], Modifier::empty(), &mut spans);
                parse_italic(&after_marker[..end], Modifier::BOLD, &mut spans);
                rest = &after_marker[end + 2..];
            }
            // Unterminated `**` stays literal, along with everything after it.
            None => break,
        }
    }

    parse_italic(rest, Modifier::empty(), &mut spans);
    spans
}

/// Scan for `*italic*` pairs, emitting spans with `base` plus ITALIC for the
/// marked segments. A lone `*` (or an adjacent pair left over from an
/// unterminated `**`) stays literal.
fn parse_italic(text: &str, base: Modifier, spans: &mut Vec<Span<'static>>) {
    let mut rest = text;

    while let Some(start) = rest.find('*') {
        let after_marker = &rest[start + 1..];
        match after_marker.find('*') {
            // `**` with nothing between is not emphasis, keep it literal.
            Some(0) => {
                push_span(spans, &rest[..start + 1], base);
                push_span(spans, "*", base);
                rest = &after_marker[1..];
            }
            Some(end) => {
                push_span(spans, &rest[..start], base);
                push_span(spans, &after_marker[..end], base | Modifier::ITALIC);
                rest = &after_marker[end + 1..];
            }
            None => break,
        }
    }

    push_span(spans, rest, base);
}

fn push_span(spans: &mut Vec<Span<'static>>, text: &str, modifier: Modifier) {
    if text.is_empty() {
        return;
    }
    spans.push(Span::styled(
        text.to_string(),
        Style::default().add_modifier(modifier),
    ));
}
