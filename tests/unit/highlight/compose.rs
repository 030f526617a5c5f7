use super::*;

fn span(class: &str, body: &str) -> String {
    format!("<span class=\"{class}\">{body}</span>")
}

fn hl(body: &str) -> String {
    span(DEFAULT_HIGHLIGHT_CLASS, body)
}

fn plain() -> HighlightOptions {
    HighlightOptions {
        extend_indent: false,
        absorb_trailing: false,
        ..HighlightOptions::default()
    }
}

#[test]
fn no_ranges_only_escapes() {
    assert_eq!(compose_highlights("a <b>", &[]), "a&nbsp;&lt;b&gt;");
    assert_eq!(compose_highlights("", &[]), "");
}

#[test]
fn escape_html_covers_markup_and_layout() {
    assert_eq!(
        escape_html("a & b <i>\"x\" 'y'\nz"),
        "a&nbsp;&amp;&nbsp;b&nbsp;&lt;i&gt;&quot;x&quot;&nbsp;&#039;y&#039;<br/>z"
    );
}

#[test]
fn range_grows_over_indent_comma_and_newline() {
    let text = "[\n  {\"a\": 1},\n  {\"b\": 2}\n]";
    let start = text.find('{').unwrap();
    let end = text.find('}').unwrap() + 1;
    let out = compose_highlights(text, &[ByteRange { start, end }]);
    assert_eq!(
        out,
        format!(
            "[<br/>{}&nbsp;&nbsp;{{&quot;b&quot;:&nbsp;2}}<br/>]",
            hl("&nbsp;&nbsp;{&quot;a&quot;:&nbsp;1},<br/>")
        )
    );
}

#[test]
fn growth_can_be_disabled() {
    let text = "  {},\n";
    let marks = [Mark::new(ByteRange { start: 2, end: 4 })];
    assert_eq!(
        compose_marks(text, &marks, &plain()),
        format!("&nbsp;&nbsp;{},<br/>", hl("{}"))
    );
}

#[test]
fn crlf_is_absorbed_whole() {
    let text = "{},\r\n{}";
    let out = compose_highlights(text, &[ByteRange { start: 0, end: 2 }]);
    assert_eq!(out, format!("{}{{}}", hl("{},\r<br/>")));
}

#[test]
fn indent_stops_at_line_start() {
    let text = "x\n\t {}";
    let out = compose_highlights(text, &[ByteRange { start: 4, end: 6 }]);
    assert_eq!(out, format!("x<br/>{}", hl("\t&nbsp;{}")));
}

#[test]
fn unordered_ranges_render_like_sorted() {
    let text = "{a} {b} {c}";
    let a = ByteRange { start: 0, end: 3 };
    let c = ByteRange { start: 8, end: 11 };
    assert_eq!(compose_highlights(text, &[c, a]), compose_highlights(text, &[a, c]));
}

#[test]
fn overlaps_are_clipped_not_duplicated() {
    let text = "abcdefgh";
    let out = compose_highlights(
        text,
        &[ByteRange { start: 2, end: 6 }, ByteRange { start: 0, end: 4 }],
    );
    assert_eq!(out, format!("{}{}gh", hl("abcd"), hl("ef")));

    let contained = compose_highlights(
        text,
        &[ByteRange { start: 0, end: 6 }, ByteRange { start: 1, end: 3 }],
    );
    assert_eq!(contained, format!("{}gh", hl("abcdef")));
}

#[test]
fn invalid_ranges_are_skipped() {
    let text = "\u{e9}t\u{e9}";
    let out = compose_highlights(
        text,
        &[
            ByteRange { start: 1, end: 3 },
            ByteRange { start: 0, end: 100 },
            ByteRange { start: 3, end: 2 },
        ],
    );
    assert_eq!(out, text);
    assert_eq!(
        compose_highlights(text, &[ByteRange { start: 2, end: 3 }]),
        format!("\u{e9}{}\u{e9}", hl("t"))
    );
}

#[test]
fn marks_carry_their_own_class() {
    let text = "{a}{b}";
    let marks = [
        Mark::new(ByteRange { start: 0, end: 3 }),
        Mark::with_class(ByteRange { start: 3, end: 6 }, "selected \"x\""),
    ];
    let options = HighlightOptions {
        class: "active".to_owned(),
        ..plain()
    };
    assert_eq!(
        compose_marks(text, &marks, &options),
        format!("{}{}", span("active", "{a}"), span("selected &quot;x&quot;", "{b}"))
    );
}

#[test]
fn empty_range_emits_nothing() {
    assert_eq!(
        compose_marks("ab", &[Mark::new(ByteRange { start: 1, end: 1 })], &plain()),
        "ab"
    );
}
