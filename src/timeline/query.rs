use crate::{foundation::core::ElementPath, timeline::flatten::TimelineElement};

/// Indices of the elements visible at `time` (start inclusive, end exclusive).
///
/// Composition entries are never active. [`flatten`](crate::flatten) does not emit them,
/// but hand-built or deserialized timelines may carry them.
pub fn active_indices(timeline: &[TimelineElement], time: f64) -> Vec<usize> {
    timeline
        .iter()
        .enumerate()
        .filter(|(_, el)| el.kind != "composition" && el.is_active_at(time))
        .map(|(i, _)| i)
        .collect()
}

/// End of the last element, or zero for an empty timeline.
pub fn total_duration(timeline: &[TimelineElement]) -> f64 {
    timeline
        .iter()
        .map(TimelineElement::end)
        .fold(0.0f64, f64::max)
}

/// Timeline index of the element at `path`.
pub fn index_of_path(timeline: &[TimelineElement], path: &ElementPath) -> Option<usize> {
    timeline.iter().position(|el| &el.path == path)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/query.rs"]
mod tests;
