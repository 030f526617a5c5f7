use super::*;
use serde_json::json;

fn flat(scene: serde_json::Value) -> Vec<TimelineElement> {
    flatten(&Scene::from_value(scene).unwrap())
}

fn times(timeline: &[TimelineElement]) -> Vec<(String, f64, f64)> {
    timeline
        .iter()
        .map(|e| (e.path.to_string(), e.time, e.duration))
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn flat_sequence() {
    let t = flat(json!({
        "elements": [
            { "type": "text", "duration": "2s" },
            { "type": "text", "duration": "3s" }
        ]
    }));
    assert_eq!(
        times(&t),
        vec![("0".to_owned(), 0.0, 2.0), ("1".to_owned(), 2.0, 3.0)]
    );
}

#[test]
fn auto_sequencing_uses_default_durations() {
    let t = flat(json!({ "elements": [ { "type": "image" }, { "type": "image" } ] }));
    assert!(approx(t[1].time, 3.0));
    assert!(approx(t[1].duration, 3.0));
}

#[test]
fn explicit_time_advances_cursor() {
    let t = flat(json!({
        "elements": [
            { "type": "text", "time": 5, "duration": 1 },
            { "type": "text" }
        ]
    }));
    assert_eq!(t[1].time, 6.0);
}

#[test]
fn explicit_time_behind_cursor_does_not_rewind_it() {
    let t = flat(json!({
        "elements": [
            { "type": "text" },
            { "type": "text", "time": "1 s" },
            { "type": "text", "name": "third" }
        ]
    }));
    let third = t.iter().find(|e| e.name == "third").unwrap();
    // cursor after the second element is max(4, 1 + 4)
    assert_eq!(third.time, 5.0);
}

#[test]
fn transition_overlaps_predecessor_without_moving_cursor() {
    // B has zero length, so C starts where A ends: the pull-in of B does not shorten the track
    let t = flat(json!({
        "elements": [
            { "type": "text", "name": "A", "duration": 4 },
            { "type": "text", "name": "B", "duration": 0, "transition": { "duration": 1 } },
            { "type": "text", "name": "C" }
        ]
    }));
    let by_name = |n: &str| t.iter().find(|e| e.name == n).unwrap().time;
    assert_eq!(by_name("B"), 3.0);
    assert_eq!(by_name("C"), 4.0);

    let t = flat(json!({
        "elements": [
            { "type": "text", "name": "A", "duration": 4 },
            { "type": "text", "name": "B", "duration": 2, "transition": { "type": "fade" } },
            { "type": "text", "name": "C" }
        ]
    }));
    let by_name = |n: &str| t.iter().find(|e| e.name == n).unwrap().time;
    // B is placed at 4 and lasts 2, so C follows at 6 even though B is drawn from 3
    assert_eq!(by_name("B"), 3.0);
    assert_eq!(by_name("C"), 6.0);
}

#[test]
fn transition_on_first_track_element_is_ignored() {
    let t = flat(json!({
        "elements": [ { "type": "text", "time": 2, "transition": { "duration": 1 } } ]
    }));
    assert_eq!(t[0].time, 2.0);
}

#[test]
fn transition_pull_in_is_floored_at_zero() {
    let t = flat(json!({
        "elements": [
            { "type": "text", "duration": 0.5 },
            { "type": "text", "name": "B", "transition": { "duration": 3 } }
        ]
    }));
    assert_eq!(t.iter().find(|e| e.name == "B").unwrap().time, 0.0);
}

#[test]
fn composition_duration_is_inherited_by_children() {
    let t = flat(json!({
        "elements": [
            { "type": "text", "duration": 2 },
            {
                "type": "composition",
                "time": 2,
                "track": 2,
                "duration": 10,
                "elements": [ { "type": "text" }, { "type": "text" } ]
            }
        ]
    }));
    let children: Vec<_> = t.iter().filter(|e| e.path.depth() == 2).collect();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.duration == 10.0));
    assert_eq!(children[0].time, 2.0);
    assert_eq!(children[1].time, 12.0);
}

#[test]
fn nested_composition_in_fixed_container_keeps_its_children() {
    let t = flat(json!({
        "elements": [
            {
                "type": "composition",
                "duration": 10,
                "elements": [
                    { "type": "composition", "elements": [ { "type": "video" } ] }
                ]
            }
        ]
    }));
    assert_eq!(times(&t), vec![("0.0.0".to_owned(), 0.0, 10.0)]);
}

#[test]
fn composition_span_is_derived_from_children() {
    let t = flat(json!({
        "elements": [
            {
                "type": "composition",
                "elements": [ { "type": "text" }, { "type": "video" } ]
            },
            { "type": "text", "name": "after" }
        ]
    }));
    assert_eq!(
        times(&t),
        vec![
            ("0.0".to_owned(), 0.0, 4.0),
            ("0.1".to_owned(), 4.0, 8.0),
            ("1".to_owned(), 12.0, 4.0),
        ]
    );
}

#[test]
fn empty_composition_uses_estimate_and_is_not_emitted() {
    let t = flat(json!({
        "elements": [
            { "type": "composition", "elements": [] },
            { "type": "composition" },
            { "type": "text" }
        ]
    }));
    assert_eq!(t.len(), 1);
    assert_eq!(t[0].time, 12.0);
    assert!(t.iter().all(|e| e.kind != "composition"));
}

#[test]
fn nested_path_and_offset() {
    let t = flat(json!({
        "elements": [
            { "type": "text" },
            { "type": "text" },
            { "type": "composition", "elements": [ { "type": "text", "text": "inner" } ] }
        ]
    }));
    let inner = t.iter().find(|e| e.text == "inner").unwrap();
    assert_eq!(inner.path.to_string(), "2.0");
    assert_eq!(inner.time, 8.0);
}

#[test]
fn tracks_are_independent_and_ties_sort_shallow_first() {
    let t = flat(json!({
        "elements": [
            { "type": "composition", "elements": [ { "type": "text", "name": "deep" } ] },
            { "type": "video", "track": 2, "name": "top" },
            { "type": "audio", "track": 3, "name": "music" }
        ]
    }));
    let names: Vec<&str> = t.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["top", "music", "deep"]);
    assert!(t.iter().all(|e| e.time == 0.0));
    assert_eq!(t[0].track, 2);
    assert_eq!(t[2].track, 1);
}

#[test]
fn nested_tracks_do_not_share_cursors_with_parent() {
    let t = flat(json!({
        "elements": [
            { "type": "text", "duration": 5 },
            {
                "type": "composition",
                "track": 2,
                "elements": [ { "type": "text", "duration": 1 }, { "type": "text", "duration": 1 } ]
            }
        ]
    }));
    let nested: Vec<f64> = t
        .iter()
        .filter(|e| e.path.depth() == 2)
        .map(|e| e.time)
        .collect();
    assert_eq!(nested, vec![0.0, 1.0]);
}

#[test]
fn display_fields_fall_back() {
    let t = flat(json!({
        "elements": [
            { "type": "video", "source": "https://cdn.example.com/a/clip.mp4?sig=abc" },
            { "id": "intro", "name": "Intro", "text": "", "source": "x/logo.png", "time": 20 }
        ]
    }));
    assert_eq!(t[0].id, "element-0");
    assert_eq!(t[0].name, "video 1");
    assert_eq!(t[0].text, "clip.mp4");
    assert_eq!(t[0].source, "https://cdn.example.com/a/clip.mp4?sig=abc");

    assert_eq!(t[1].id, "intro");
    assert_eq!(t[1].name, "Intro");
    assert_eq!(t[1].text, "logo.png");
    assert_eq!(t[1].kind, "unknown");
}

#[test]
fn ordering_invariant_and_idempotence() {
    let scene = Scene::from_value(json!({
        "elements": [
            { "type": "video", "track": 1 },
            { "type": "text", "track": 2, "time": 1 },
            {
                "type": "composition",
                "track": 3,
                "time": 1,
                "elements": [
                    { "type": "image" },
                    { "type": "composition", "elements": [ { "type": "shape" } ] },
                    { "type": "text", "track": 2, "transition": { "duration": 0.5 } }
                ]
            },
            { "type": "audio", "track": 1, "transition": { "duration": 2 } }
        ]
    }))
    .unwrap();

    let a = flatten(&scene);
    let b = flatten(&scene);
    assert_eq!(a, b);
    assert!(!a.is_empty());

    for pair in a.windows(2) {
        assert!(pair[0].time <= pair[1].time);
        if pair[0].time == pair[1].time {
            assert!(pair[0].path.depth() <= pair[1].path.depth());
        }
    }
    assert!(a.iter().all(|e| e.kind != "composition"));
}

#[test]
fn malformed_text_yields_empty_timeline() {
    assert!(flatten_text("{not json").is_empty());
    assert!(flatten_text("").is_empty());
    assert!(flatten_text(r#"{"elements": 3}"#).is_empty());
    assert!(flatten_text(r#"{"width": 100}"#).is_empty());
    assert_eq!(flatten_text(r#"{"elements": [{"type": "text"}]}"#).len(), 1);
}

#[test]
fn stray_elements_values_keep_the_rest_of_the_timeline() {
    let t = flatten_text(
        r#"{"elements": [
            {"type": "text", "duration": 2},
            {"type": "image", "elements": {"x": 1}},
            {"type": "video", "elements": "todo"}
        ]}"#,
    );
    assert_eq!(
        times(&t),
        vec![
            ("0".to_owned(), 0.0, 2.0),
            ("1".to_owned(), 2.0, 3.0),
            ("2".to_owned(), 5.0, 8.0),
        ]
    );
}

#[test]
fn non_object_children_are_skipped() {
    let t = flatten_text(
        r#"{"elements": [
            {"type": "composition", "elements": [5, {"type": "text", "name": "kept"}, null]}
        ]}"#,
    );
    assert_eq!(t.len(), 1);
    assert_eq!(t[0].name, "kept");
    assert_eq!(t[0].path.to_string(), "0.0");
}
