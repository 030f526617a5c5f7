use std::collections::BTreeMap;

use crate::{
    foundation::core::ElementPath,
    scene::model::{Element, Scene},
    timeline::query::total_duration,
    timing::estimate::estimate_duration,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One leaf element placed on the absolute timeline.
pub struct TimelineElement {
    /// Element `id`, or `element-<path>` when the scene leaves it out.
    pub id: String,
    /// Absolute start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Type tag (`"unknown"` when absent).
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Display text: the element text, else the source file name.
    pub text: String,
    /// Media source URL, empty when absent.
    pub source: String,
    /// Position in the scene graph; joins the timeline to byte ranges in the text.
    pub path: ElementPath,
    /// Track lane within the element's own scope.
    pub track: u32,
}

impl TimelineElement {
    /// Absolute end in seconds.
    pub fn end(&self) -> f64 {
        self.time + self.duration
    }

    /// True when `time` lies in `[start, end)`.
    pub fn is_active_at(&self, time: f64) -> bool {
        self.time <= time && time < self.end()
    }
}

/// Flatten `scene` into its leaf elements with absolute start times.
///
/// The result is ordered by start time, then by path depth (shallower first); ties keep
/// emission order. Composition containers never appear, only their leaves.
#[tracing::instrument(skip(scene), fields(top_level = scene.elements.len()))]
pub fn flatten(scene: &Scene) -> Vec<TimelineElement> {
    let mut out = flatten_scope(&scene.elements, &ElementPath::root(), None);
    out.sort_by(|a, b| {
        a.time
            .total_cmp(&b.time)
            .then_with(|| a.path.depth().cmp(&b.path.depth()))
    });
    tracing::debug!(
        leaves = out.len(),
        total_secs = total_duration(&out),
        "flattened timeline"
    );
    out
}

/// Parse and flatten raw scene text.
///
/// Text that does not parse (typically because it is mid-edit) yields an empty timeline.
pub fn flatten_text(text: &str) -> Vec<TimelineElement> {
    match Scene::from_json_str(text) {
        Ok(scene) => flatten(&scene),
        Err(err) => {
            tracing::debug!(%err, "scene text did not parse, timeline is empty");
            Vec::new()
        }
    }
}

/// Resolved span of an element.
enum Span {
    /// Explicit, inherited, or estimated. Composition children are re-flattened with this
    /// length as their inheritable default.
    Fixed(f64),
    /// Derived from an uninherited pass over the composition's children; that pass is
    /// reused for output.
    Derived {
        duration: f64,
        children: Vec<TimelineElement>,
    },
}

impl Span {
    fn duration(&self) -> f64 {
        match self {
            Self::Fixed(d) => *d,
            Self::Derived { duration, .. } => *duration,
        }
    }
}

/// Flatten one scope with times local to it (base 0). Unsorted.
fn flatten_scope(
    elements: &[Element],
    parent: &ElementPath,
    inherited: Option<f64>,
) -> Vec<TimelineElement> {
    let mut out = Vec::new();

    for (track, members) in group_by_track(elements) {
        let mut cursor = 0.0f64;

        for (position, (index, element)) in members.into_iter().enumerate() {
            let path = parent.child(index);

            let placed = match element.start_time() {
                Some(t) => {
                    cursor = cursor.max(t);
                    t
                }
                None => cursor,
            };

            let span = resolve_span(element, &path, inherited);
            let duration = span.duration();

            let mut start = placed;
            if position > 0
                && let Some(transition) = &element.transition
            {
                start = (start - transition.duration_secs()).max(0.0);
            }

            tracing::trace!(%path, track, start, duration, "placed element");

            if let Some(children) = element.children() {
                let nested = match span {
                    Span::Fixed(d) => flatten_scope(children, &path, Some(d)),
                    Span::Derived { children, .. } => children,
                };
                out.extend(nested.into_iter().map(|mut child| {
                    child.time += start;
                    child
                }));
            } else if !element.is_composition() {
                out.push(leaf(element, index, path, start, duration, track));
            }

            // the pull-in overlaps the predecessor visually; it does not move the cursor
            cursor = cursor.max(placed + duration);
        }
    }

    out
}

fn resolve_span(element: &Element, path: &ElementPath, inherited: Option<f64>) -> Span {
    if let Some(d) = element.explicit_duration() {
        return Span::Fixed(d);
    }
    if let Some(d) = inherited {
        return Span::Fixed(d);
    }

    let Some(children) = element.children() else {
        return Span::Fixed(estimate_duration(element));
    };

    let children = flatten_scope(children, path, None);
    let max_end = children
        .iter()
        .map(TimelineElement::end)
        .fold(0.0f64, f64::max);
    let duration = if max_end > 0.0 {
        max_end
    } else {
        estimate_duration(element)
    };

    Span::Derived { duration, children }
}

/// Group a scope's elements by track, ascending. Each entry keeps the element's index in
/// the scope array.
fn group_by_track(elements: &[Element]) -> BTreeMap<u32, Vec<(usize, &Element)>> {
    let mut groups: BTreeMap<u32, Vec<(usize, &Element)>> = BTreeMap::new();
    for (index, element) in elements.iter().enumerate() {
        groups
            .entry(element.effective_track())
            .or_default()
            .push((index, element));
    }
    groups
}

fn leaf(
    element: &Element,
    index: usize,
    path: ElementPath,
    time: f64,
    duration: f64,
    track: u32,
) -> TimelineElement {
    let kind = element.kind_name().to_owned();
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    TimelineElement {
        id: non_empty(&element.id).unwrap_or_else(|| format!("element-{path}")),
        time,
        duration,
        name: non_empty(&element.name).unwrap_or_else(|| format!("{kind} {}", index + 1)),
        text: non_empty(&element.text)
            .or_else(|| element.source.as_deref().map(source_label))
            .unwrap_or_default(),
        source: element.source.clone().unwrap_or_default(),
        kind,
        path,
        track,
    }
}

/// File name of a source URL without its query string.
fn source_label(source: &str) -> String {
    let file = source.rsplit('/').next().unwrap_or(source);
    file.split('?').next().unwrap_or(file).to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/flatten.rs"]
mod tests;
