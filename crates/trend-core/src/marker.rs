// File: crates/trend-core/src/marker.rs
// Summary: Time-anchored annotation markers (fixed historical events).

use crate::range::TimeRange;

/// A static event annotation: vertical rule plus caption at a timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub at: i64,
    pub label: String,
}

impl Marker {
    pub fn new(at: i64, label: impl Into<String>) -> Self {
        Self { at, label: label.into() }
    }
}

/// Markers whose timestamp falls inside `range`. Outside markers are omitted
/// entirely, never clipped.
pub fn visible_markers(markers: &[Marker], range: TimeRange) -> Vec<Marker> {
    markers.iter().filter(|m| range.contains(m.at)).cloned().collect()
}
