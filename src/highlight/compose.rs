//! Annotated HTML rendering of scene text with highlighted byte ranges.

use crate::foundation::core::ByteRange;

/// Class applied to marks that do not carry their own.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "timeline-highlight";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendering knobs for [`compose_marks`].
pub struct HighlightOptions {
    /// CSS class for marks without an explicit class.
    pub class: String,
    /// Grow each mark backward over spaces and tabs on its own line.
    pub extend_indent: bool,
    /// Grow each mark over one trailing `,` and then one line break.
    pub absorb_trailing: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            class: DEFAULT_HIGHLIGHT_CLASS.to_owned(),
            extend_indent: true,
            absorb_trailing: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One highlighted span.
pub struct Mark {
    /// Byte range of the span before indent/trailing growth.
    pub range: ByteRange,
    /// Overrides [`HighlightOptions::class`].
    pub class: Option<String>,
}

impl Mark {
    /// Mark using the default class.
    pub fn new(range: ByteRange) -> Self {
        Self { range, class: None }
    }

    /// Mark with its own class.
    pub fn with_class(range: ByteRange, class: impl Into<String>) -> Self {
        Self {
            range,
            class: Some(class.into()),
        }
    }
}

/// Render `text` as HTML with every range wrapped in a highlight span, using default options.
pub fn compose_highlights(text: &str, ranges: &[ByteRange]) -> String {
    let marks: Vec<Mark> = ranges.iter().copied().map(Mark::new).collect();
    compose_marks(text, &marks, &HighlightOptions::default())
}

/// Render `text` as HTML with each mark wrapped in `<span class="...">`.
///
/// Marks are applied in start order. A mark overlapping text that was already emitted is
/// clipped to the remainder, and a mark with nothing left is dropped. Marks that fall
/// outside the text or off a char boundary are skipped. Everything is escaped with
/// [`escape_html`].
pub fn compose_marks(text: &str, marks: &[Mark], options: &HighlightOptions) -> String {
    let mut ordered: Vec<&Mark> = marks.iter().collect();
    ordered.sort_by_key(|m| m.range.start);

    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut emitted = 0usize;

    for mark in ordered {
        let Some((start, end)) = visual_span(text, mark.range, options) else {
            tracing::trace!(start = mark.range.start, end = mark.range.end, "skipping mark");
            continue;
        };
        let start = start.max(emitted);
        if start >= end {
            continue;
        }

        push_escaped(&mut out, &text[emitted..start]);
        let class = mark.class.as_deref().unwrap_or(&options.class);
        out.push_str("<span class=\"");
        push_attr(&mut out, class);
        out.push_str("\">");
        push_escaped(&mut out, &text[start..end]);
        out.push_str("</span>");
        emitted = end;
    }

    push_escaped(&mut out, &text[emitted..]);
    out
}

/// The span actually painted for `range`, or `None` when the range is unusable.
fn visual_span(text: &str, range: ByteRange, options: &HighlightOptions) -> Option<(usize, usize)> {
    if range.start > range.end
        || range.end > text.len()
        || !text.is_char_boundary(range.start)
        || !text.is_char_boundary(range.end)
    {
        return None;
    }

    let bytes = text.as_bytes();
    let mut start = range.start;
    if options.extend_indent {
        while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
            start -= 1;
        }
    }

    let mut end = range.end;
    if options.absorb_trailing {
        if bytes.get(end) == Some(&b',') {
            end += 1;
        }
        if text[end..].starts_with("\r\n") {
            end += 2;
        } else if bytes.get(end) == Some(&b'\n') {
            end += 1;
        }
    }

    Some((start, end))
}

/// Escape text for display inside an HTML block that preserves layout.
///
/// `& < > " '` become entities, every space becomes `&nbsp;` and every `\n` becomes
/// `<br/>`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            ' ' => out.push_str("&nbsp;"),
            '\n' => out.push_str("<br/>"),
            _ => out.push(c),
        }
    }
}

fn push_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/highlight/compose.rs"]
mod tests;
