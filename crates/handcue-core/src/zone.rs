//! Selectable zones.
//!
//! A zone is a named rectangle in frame pixel coordinates. The zone list is
//! built once at startup and never changes; its order decides which zone wins
//! a hit test when rectangles overlap.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of a zone, as it appears on the wire (`"answer": "B"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Wrap a zone name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Point at `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict containment: a point on the border is outside.
    pub fn contains(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x + self.width && self.y < p.y && p.y < self.y + self.height
    }
}

/// A named hit target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub rect: Rect,
}

/// Find the zone under `pointer`. First match in list order wins.
pub fn zone_at(zones: &[Zone], pointer: Point) -> Option<&Zone> {
    zones.iter().find(|zone| zone.rect.contains(pointer))
}

/// A single row of equally sized zones, centered horizontally in the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneLayout {
    pub names: Vec<String>,
    pub width: i32,
    pub height: i32,
    pub gap: i32,
    pub top: i32,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            names: ["A", "B", "C", "D"].map(String::from).to_vec(),
            width: 120,
            height: 80,
            gap: 20,
            top: 50,
        }
    }
}

impl ZoneLayout {
    /// Lay the zones out for a frame `frame_width` pixels wide.
    pub fn build(&self, frame_width: i32) -> Result<Vec<Zone>, LayoutError> {
        if self.names.is_empty() {
            return Err(LayoutError::NoZones);
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(LayoutError::EmptyZone {
                width: self.width,
                height: self.height,
            });
        }
        if self.gap < 0 {
            return Err(LayoutError::NegativeGap(self.gap));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(LayoutError::DuplicateName(dup.clone()));
        }

        let count = i32::try_from(self.names.len()).map_err(|_| LayoutError::OutOfRange)?;
        let step = self.width.checked_add(self.gap).ok_or(LayoutError::OutOfRange)?;
        let total_width = step
            .checked_mul(count)
            .and_then(|w| w.checked_sub(self.gap))
            .ok_or(LayoutError::OutOfRange)?;
        let start_x = frame_width.checked_sub(total_width).ok_or(LayoutError::OutOfRange)? / 2;
        // Right and bottom edges must be representable for the hit test.
        start_x
            .checked_add(total_width)
            .and_then(|_| self.top.checked_add(self.height))
            .ok_or(LayoutError::OutOfRange)?;

        self.names
            .iter()
            .zip(0i32..)
            .map(|(name, i)| {
                let x = i
                    .checked_mul(step)
                    .and_then(|offset| start_x.checked_add(offset))
                    .ok_or(LayoutError::OutOfRange)?;
                Ok(Zone {
                    id: ZoneId::new(name.as_str()),
                    rect: Rect::new(x, self.top, self.width, self.height),
                })
            })
            .collect()
    }
}

/// Invalid zone layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("zone layout must name at least one zone")]
    NoZones,
    #[error("zone size must be positive, got {width}x{height}")]
    EmptyZone { width: i32, height: i32 },
    #[error("duplicate zone name: {0}")]
    DuplicateName(String),
    #[error("zone gap must not be negative, got {0}")]
    NegativeGap(i32),
    #[error("zone layout does not fit in pixel coordinates")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_centered() {
        let zones = ZoneLayout::default().build(640).unwrap();
        let ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C", "D"]);
        // 4 * 140 - 20 = 540 wide, (640 - 540) / 2 = 50
        assert_eq!(zones[0].rect, Rect::new(50, 50, 120, 80));
        assert_eq!(zones[3].rect, Rect::new(470, 50, 120, 80));
    }

    #[test]
    fn hit_test_is_strict() {
        let zones = ZoneLayout::default().build(640).unwrap();
        assert_eq!(zone_at(&zones, Point::new(110, 90)).unwrap().id.as_str(), "A");
        assert_eq!(zone_at(&zones, Point::new(250, 90)).unwrap().id.as_str(), "B");
        assert!(zone_at(&zones, Point::new(50, 90)).is_none());
        assert!(zone_at(&zones, Point::new(175, 90)).is_none());
        assert!(zone_at(&zones, Point::new(110, 400)).is_none());
    }

    #[test]
    fn overlap_resolves_to_first() {
        let zones = vec![
            Zone {
                id: "first".into(),
                rect: Rect::new(0, 0, 100, 100),
            },
            Zone {
                id: "second".into(),
                rect: Rect::new(50, 50, 100, 100),
            },
        ];
        assert_eq!(zone_at(&zones, Point::new(75, 75)).unwrap().id.as_str(), "first");
        assert_eq!(zone_at(&zones, Point::new(120, 120)).unwrap().id.as_str(), "second");
    }

    #[test]
    fn rejects_bad_layouts() {
        let empty = ZoneLayout {
            names: vec![],
            ..Default::default()
        };
        assert_eq!(empty.build(640), Err(LayoutError::NoZones));

        let dup = ZoneLayout {
            names: vec!["A".into(), "B".into(), "A".into()],
            ..Default::default()
        };
        assert_eq!(dup.build(640), Err(LayoutError::DuplicateName("A".into())));

        let flat = ZoneLayout {
            height: 0,
            ..Default::default()
        };
        assert!(matches!(flat.build(640), Err(LayoutError::EmptyZone { .. })));

        let overlapping = ZoneLayout {
            gap: -60,
            ..Default::default()
        };
        assert_eq!(overlapping.build(640), Err(LayoutError::NegativeGap(-60)));
    }

    #[test]
    fn touching_zones_are_allowed() {
        let zones = ZoneLayout {
            gap: 0,
            ..Default::default()
        }
        .build(640)
        .unwrap();
        assert_eq!(zones[0].rect.x + zones[0].rect.width, zones[1].rect.x);
        // The shared edge belongs to neither zone.
        assert!(zone_at(&zones, Point::new(zones[1].rect.x, 90)).is_none());
    }

    #[test]
    fn huge_sizes_are_an_error_not_a_panic() {
        let wide = ZoneLayout {
            width: i32::MAX / 2,
            ..Default::default()
        };
        assert_eq!(wide.build(640), Err(LayoutError::OutOfRange));

        let wide_gap = ZoneLayout {
            gap: i32::MAX,
            ..Default::default()
        };
        assert_eq!(wide_gap.build(640), Err(LayoutError::OutOfRange));

        let tall = ZoneLayout {
            top: i32::MAX - 10,
            ..Default::default()
        };
        assert_eq!(tall.build(640), Err(LayoutError::OutOfRange));

        let narrow_frame = ZoneLayout {
            width: i32::MAX / 4,
            names: vec!["A".into()],
            ..Default::default()
        };
        assert_eq!(narrow_frame.build(i32::MIN + 1), Err(LayoutError::OutOfRange));
    }
}
