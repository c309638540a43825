//! Ordered flight plan of waypoints anchored to marker positions.
//!
//! The text format is a bracketed list of triples with two decimals and no
//! spaces: `[(1.00,0.00,0.50),(2.00,0.00,1.00)]`.

use bevy::math::{Vec2, Vec3};
use nom::character::complete::char;
use nom::number::complete::float;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use crate::error::{PlannerError, Result};

/// Waypoints in flight order. `x`/`y` is a marker center, `z` the height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPlan {
    waypoints: Vec<Vec3>,
}

fn check_height(height: f32) -> Result<()> {
    if height.is_finite() && height >= 0.0 {
        Ok(())
    } else {
        Err(PlannerError::validation(format!(
            "height must be a non-negative number, got {}",
            height
        )))
    }
}

impl FlightPlan {
    pub fn from_waypoints(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Append a waypoint over `marker_position`. The caller guarantees the
    /// position belongs to a loaded marker.
    pub fn append(&mut self, marker_position: Vec2, height: f32) -> Result<usize> {
        check_height(height)?;
        self.waypoints.push(marker_position.extend(height));
        Ok(self.waypoints.len() - 1)
    }

    /// Insert next to the waypoint at `index`, before or after it.
    /// Returns the index of the new waypoint.
    pub fn insert(
        &mut self,
        index: usize,
        marker_position: Vec2,
        height: f32,
        before: bool,
    ) -> Result<usize> {
        if index >= self.waypoints.len() {
            return Err(PlannerError::validation(format!(
                "no waypoint at index {}",
                index
            )));
        }
        check_height(height)?;
        let at = if before { index } else { index + 1 };
        self.waypoints.insert(at, marker_position.extend(height));
        Ok(at)
    }

    pub fn remove(&mut self, index: usize) -> Option<Vec3> {
        (index < self.waypoints.len()).then(|| self.waypoints.remove(index))
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn replace(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
    }

    /// Planar path through the waypoints, in flight order.
    pub fn polyline(&self) -> Vec<Vec2> {
        self.waypoints.iter().map(|w| w.truncate()).collect()
    }

    /// Human-readable rows for the plan list view.
    pub fn list_labels(&self) -> Vec<String> {
        self.waypoints
            .iter()
            .map(|w| format!("({:.2}, {:.2}, {:.2})", w.x, w.y, w.z))
            .collect()
    }

    pub fn serialize(&self) -> String {
        let points: Vec<String> = self
            .waypoints
            .iter()
            .map(|w| format!("({:.2},{:.2},{:.2})", w.x, w.y, w.z))
            .collect();
        format!("[{}]", points.join(","))
    }

    /// Parse plan text against the currently known marker positions.
    ///
    /// All or nothing: a single triple whose `(x, y)` is not exactly a known
    /// marker position rejects the whole text.
    pub fn parse(text: &str, known_positions: &[Vec2]) -> Result<Vec<Vec3>> {
        let triples = scan_triples(text);
        if triples.is_empty() {
            return Err(PlannerError::format(
                "no (x,y,z) waypoints found in flight plan",
            ));
        }

        for waypoint in &triples {
            if !known_positions.contains(&waypoint.truncate()) {
                return Err(PlannerError::MarkerNotFound {
                    x: waypoint.x,
                    y: waypoint.y,
                });
            }
            check_height(waypoint.z)?;
        }

        Ok(triples)
    }
}

fn waypoint_triple(input: &str) -> IResult<&str, Vec3> {
    delimited(
        char('('),
        (float, preceded(char(','), float), preceded(char(','), float)),
        char(')'),
    )
    .map(|(x, y, z)| Vec3::new(x, y, z))
    .parse(input)
}

/// Every well-formed `(a,b,c)` triple in `text`, in order. Anything between
/// triples is ignored.
fn scan_triples(text: &str) -> Vec<Vec3> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('(') {
        let candidate = &rest[start..];
        match waypoint_triple(candidate) {
            Ok((remaining, waypoint)) => {
                found.push(waypoint);
                rest = remaining;
            }
            Err(_) => rest = &candidate[1..],
        }
    }

    found
}
