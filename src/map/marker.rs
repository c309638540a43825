//! Fiducial marker records and the marker-map text format.
//!
//! A map file holds one marker per line as eight whitespace-separated fields:
//! `id length x y z rot_z rot_y rot_x`. Blank lines and `#` comments are
//! skipped. Parsing is tolerant (errors are collected per line) but a map with
//! any error is rejected as a whole by [`MarkerMap::from_text`].

use std::collections::HashSet;
use std::fmt::Write as _;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAP_EXPORT_HEADER, MAX_REPORTED_MAP_ERRORS};
use crate::error::{PlannerError, Result};

const FIELD_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: i32,
    pub length: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rot_z: f32,
    pub rot_y: f32,
    pub rot_x: f32,
}

impl Marker {
    /// Marker lying flat on the ground plane, as created from the editor.
    pub fn planar(id: i32, x: f32, y: f32, length: f32) -> Self {
        Self {
            id,
            length,
            x,
            y,
            z: 0.0,
            rot_z: 0.0,
            rot_y: 0.0,
            rot_x: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.id, self.length, self.x, self.y, self.z, self.rot_z, self.rot_y, self.rot_x
        )
    }
}

/// Outcome of parsing map text: every record that survived plus line errors.
#[derive(Debug, Default)]
pub struct MapParseReport {
    pub markers: Vec<Marker>,
    pub errors: Vec<String>,
}

impl MapParseReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse marker-map text, collecting line-numbered errors instead of failing.
///
/// Records with a bad field count, a non-numeric field or a duplicate id are
/// skipped. A record with `length <= 0` is reported but still kept.
pub fn parse_map_text(text: &str) -> MapParseReport {
    let mut report = MapParseReport::default();
    let mut seen_ids = HashSet::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != FIELD_COUNT {
            report.errors.push(format!(
                "Line {}: expected {} fields, found {}",
                line_num,
                FIELD_COUNT,
                parts.len()
            ));
            continue;
        }

        let Some(marker) = parse_fields(&parts) else {
            report
                .errors
                .push(format!("Line {}: invalid number format", line_num));
            continue;
        };

        if !seen_ids.insert(marker.id) {
            report
                .errors
                .push(format!("Line {}: duplicate ID {}", line_num, marker.id));
            continue;
        }

        if marker.length <= 0.0 {
            report.errors.push(format!(
                "Line {}: invalid marker length {}",
                line_num, marker.length
            ));
        }

        report.markers.push(marker);
    }

    report
}

fn parse_fields(parts: &[&str]) -> Option<Marker> {
    let float = |i: usize| parts[i].parse::<f32>().ok();
    Some(Marker {
        id: parts[0].parse().ok()?,
        length: float(1)?,
        x: float(2)?,
        y: float(3)?,
        z: float(4)?,
        rot_z: float(5)?,
        rot_y: float(6)?,
        rot_x: float(7)?,
    })
}

/// Write markers as map text: a header comment, then one tab-separated line each.
pub fn export_map_text(markers: &[Marker]) -> String {
    let mut out = String::with_capacity(64 * (markers.len() + 1));
    out.push_str(MAP_EXPORT_HEADER);
    out.push('\n');
    for marker in markers {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", marker.to_line());
    }
    out
}

/// The loaded marker map. Ids are unique within one map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerMap {
    markers: Vec<Marker>,
}

impl MarkerMap {
    /// Build a map from text, rejecting the whole load if any line had an error.
    /// The rejection carries at most the first `MAX_REPORTED_MAP_ERRORS` errors.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut report = parse_map_text(text);
        if !report.is_clean() {
            report.errors.truncate(MAX_REPORTED_MAP_ERRORS);
            return Err(PlannerError::MapRejected(report.errors));
        }
        Ok(Self {
            markers: report.markers,
        })
    }

    /// Wrap already-validated markers (e.g. from a project file).
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.markers.iter().map(Marker::position).collect()
    }

    /// Index of the marker whose center is nearest to `point`, if within `tolerance`.
    /// Ties go to the earlier marker.
    pub fn nearest_within(&self, point: Vec2, tolerance: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, marker) in self.markers.iter().enumerate() {
            let distance = marker.position().distance(point);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.filter(|(_, d)| *d <= tolerance).map(|(index, _)| index)
    }

    pub fn to_text(&self) -> String {
        export_map_text(&self.markers)
    }

    pub fn add(&mut self, marker: Marker) -> Result<()> {
        self.validate(&marker, None)?;
        self.markers.push(marker);
        Ok(())
    }

    pub fn update(&mut self, index: usize, marker: Marker) -> Result<()> {
        if index >= self.markers.len() {
            return Err(PlannerError::validation(format!(
                "no marker at index {}",
                index
            )));
        }
        self.validate(&marker, Some(index))?;
        self.markers[index] = marker;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Marker> {
        (index < self.markers.len()).then(|| self.markers.remove(index))
    }

    fn validate(&self, marker: &Marker, skip: Option<usize>) -> Result<()> {
        if !(marker.length > 0.0) {
            return Err(PlannerError::validation(format!(
                "marker length must be positive, got {}",
                marker.length
            )));
        }
        let duplicate = self
            .markers
            .iter()
            .enumerate()
            .any(|(i, m)| Some(i) != skip && m.id == marker.id);
        if duplicate {
            return Err(PlannerError::validation(format!(
                "duplicate marker ID {}",
                marker.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TWO_MARKERS: &str =
        "0 0.18 0.0 0.0 0.0 0.0 0.0 0.0\n1 0.18 1.0 0.0 0.0 0.0 0.0 0.0";

    #[test]
    fn test_parse_two_markers() {
        let report = parse_map_text(TWO_MARKERS);
        assert!(report.is_clean());
        assert_eq!(report.markers.len(), 2);
        assert_eq!(report.markers[1].id, 1);
        assert_eq!(report.markers[1].position(), Vec2::new(1.0, 0.0));
        assert_eq!(report.markers[1].length, 0.18);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# id length x y z rz ry rx\n\n   \n5 0.2 1 2 3 0.1 0.2 0.3\n";
        let report = parse_map_text(text);
        assert!(report.is_clean());
        assert_eq!(report.markers.len(), 1);
        assert_eq!(report.markers[0].rot_x, 0.3);
    }

    #[test]
    fn test_tabs_and_multiple_spaces() {
        let report = parse_map_text("7\t0.5   1.5\t2.5 0 0 0 0");
        assert!(report.is_clean());
        assert_eq!(report.markers[0].position(), Vec2::new(1.5, 2.5));
    }

    #[test]
    fn test_wrong_field_count_is_line_numbered() {
        let report = parse_map_text("0 0.18 0 0 0 0 0 0\n1 0.18 1 0");
        assert_eq!(report.markers.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Line 2:"));
    }

    #[test]
    fn test_bad_number_skips_record() {
        let report = parse_map_text("x 0.18 0 0 0 0 0 0\n2 0.18 abc 0 0 0 0 0");
        assert!(report.markers.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[1].contains("Line 2"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let text = "3 0.18 0 0 0 0 0 0\n3 0.18 5 5 0 0 0 0";
        let report = parse_map_text(text);
        assert_eq!(report.markers.len(), 1);
        assert_eq!(report.markers[0].x, 0.0);
        assert_eq!(report.errors, vec!["Line 2: duplicate ID 3".to_string()]);
    }

    #[test]
    fn test_nonpositive_length_kept_but_reported() {
        let report = parse_map_text("4 0 1 1 0 0 0 0");
        assert_eq!(report.markers.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("length"));
    }

    #[test]
    fn test_from_text_is_all_or_nothing() {
        let text = "0 0.18 0 0 0 0 0 0\n1 0.18 1 0\n2 0.18 2 0 0 0 0 0";
        match MarkerMap::from_text(text) {
            Err(PlannerError::MapRejected(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_message_caps_errors() {
        let text: String = (0..9).map(|i| format!("{} bad\n", i)).collect();
        let err = MarkerMap::from_text(&text).unwrap_err();
        assert_eq!(err.to_string().lines().count(), 5);
    }

    #[test]
    fn test_rejection_keeps_first_five_errors() {
        let text: String = (0..9).map(|i| format!("{} bad\n", i)).collect();
        match MarkerMap::from_text(&text) {
            Err(PlannerError::MapRejected(errors)) => {
                assert_eq!(errors.len(), MAX_REPORTED_MAP_ERRORS);
                assert!(errors[0].starts_with("Line 1"));
                assert!(errors[4].starts_with("Line 5"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_export_has_header_and_tabs() {
        let map = MarkerMap::from_text(TWO_MARKERS).unwrap();
        let text = map.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], MAP_EXPORT_HEADER);
        assert_eq!(lines[2], "1\t0.18\t1\t0\t0\t0\t0\t0");
    }

    #[test]
    fn test_export_reparses_to_same_markers() {
        let map = MarkerMap::from_text("12 0.25 -1.75 3.125 0.5 1.5 -0.25 0.01").unwrap();
        let reparsed = MarkerMap::from_text(&map.to_text()).unwrap();
        assert_eq!(map, reparsed);
    }

    #[test]
    fn test_nearest_within_tolerance() {
        let map = MarkerMap::from_text(TWO_MARKERS).unwrap();
        assert_eq!(map.nearest_within(Vec2::new(0.95, 0.05), 0.11), Some(1));
        assert_eq!(map.nearest_within(Vec2::new(0.5, 0.0), 0.11), None);
        assert_eq!(MarkerMap::default().nearest_within(Vec2::ZERO, 0.11), None);
    }

    #[test]
    fn test_add_rejects_duplicate_and_bad_length() {
        let mut map = MarkerMap::from_text(TWO_MARKERS).unwrap();
        assert!(map.add(Marker::planar(1, 3.0, 3.0, 0.2)).is_err());
        assert!(map.add(Marker::planar(9, 3.0, 3.0, 0.0)).is_err());
        assert!(map.add(Marker::planar(9, 3.0, 3.0, 0.2)).is_ok());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_update_allows_same_id_on_same_record() {
        let mut map = MarkerMap::from_text(TWO_MARKERS).unwrap();
        let mut edited = map.get(1).unwrap().clone();
        edited.x = 2.0;
        assert!(map.update(1, edited).is_ok());
        assert_eq!(map.get(1).unwrap().x, 2.0);

        let clash = Marker::planar(0, 2.0, 2.0, 0.18);
        assert!(map.update(1, clash).is_err());
        assert!(map.update(5, Marker::planar(5, 0.0, 0.0, 0.1)).is_err());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut map = MarkerMap::from_text(TWO_MARKERS).unwrap();
        assert!(map.remove(2).is_none());
        assert_eq!(map.remove(0).map(|m| m.id), Some(0));
        assert_eq!(map.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_export_then_parse_preserves_values(
            id in -1000i32..1000,
            length in 0.01f32..10.0,
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            z in -10.0f32..10.0,
            rot in -3.2f32..3.2,
        ) {
            let marker = Marker { id, length, x, y, z, rot_z: rot, rot_y: -rot, rot_x: rot / 2.0 };
            let text = export_map_text(std::slice::from_ref(&marker));
            let report = parse_map_text(&text);
            prop_assert!(report.is_clean());
            prop_assert_eq!(report.markers, vec![marker]);
        }
    }
}
