//! Track geometry: hit-zones and coordinate conversion.
//!
//! Each mark owns the stretch of track halfway to its neighbours, so zones
//! partition the track with shared midpoints. A midpoint belongs to both
//! neighbouring zones; lookups return the first zone in sequence order.

use crate::mark::MarkSet;

/// Percent-space interval owned by one mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZone {
    /// Sequence index of the owning mark.
    pub index: usize,
    /// Inclusive left boundary.
    pub left: f64,
    /// Inclusive right boundary. Infinite for the last mark.
    pub right: f64,
}

impl HitZone {
    /// Check if `percent` falls inside the zone.
    pub fn contains(&self, percent: f64) -> bool {
        self.left <= percent && percent <= self.right
    }
}

/// Compute the hit-zone of every mark, in sequence order.
pub fn hit_zones(marks: &MarkSet) -> Vec<HitZone> {
    let percents: Vec<f64> = marks.percents().collect();
    let last = percents.len().saturating_sub(1);

    percents
        .iter()
        .enumerate()
        .map(|(index, &p)| {
            let left = if index == 0 {
                0.0
            } else {
                (percents[index - 1] + p) / 2.0
            };
            let right = if index == last {
                f64::INFINITY
            } else {
                (p + percents[index + 1]) / 2.0
            };
            HitZone { index, left, right }
        })
        .collect()
}

/// Sequence index of the mark whose zone contains `percent`.
pub fn zone_at(zones: &[HitZone], percent: f64) -> Option<usize> {
    zones.iter().find(|z| z.contains(percent)).map(|z| z.index)
}

/// On-screen bounding box of the track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a horizontal coordinate lies relative to the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Left of the track's left edge.
    Before,
    /// On the track, at the given percent.
    Inside(f64),
    /// Right of the track's right edge.
    After,
}

impl TrackBounds {
    /// Create bounds from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the bounds can be used for hit-testing.
    ///
    /// Bounds measured before the track is laid out have no width.
    pub fn is_measurable(&self) -> bool {
        self.x.is_finite() && self.width.is_finite() && self.width > 0.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Place a horizontal coordinate relative to the track.
    pub fn place(&self, x: f64) -> Option<Placement> {
        if !self.is_measurable() || !x.is_finite() {
            return None;
        }
        if x < self.x {
            Some(Placement::Before)
        } else if x > self.right() {
            Some(Placement::After)
        } else {
            Some(Placement::Inside((x - self.x) / self.width * 100.0))
        }
    }

    /// Check if a point lies inside the bounding box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.is_measurable()
            && x >= self.x
            && x <= self.right()
            && y >= self.y
            && y <= self.y + self.height.max(0.0)
    }
}
