//! Drag state and edge-autoscroll math.

use crate::cell_ref::CellId;
use crate::types::{Point, Size};

/// Pointer drag in progress. Reset wholesale on pointer-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    /// Fixed corner of the range being dragged out
    pub anchor: Option<CellId>,
    /// Container-relative position of the latest pointer event
    pub last_pointer: Point,
}

/// Edge zone tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeZone {
    /// Zone depth in pixels, measured inward from each container edge
    pub threshold: f32,
    /// Step applied at full depth (pointer on or past the edge)
    pub max_step: f32,
}

impl EdgeZone {
    /// Per-frame scroll delta for a pointer at `pointer` inside a `container`.
    ///
    /// Each axis is independent. The step grows linearly from zero at the inner
    /// boundary of the zone to `max_step` at the edge and stays there once the
    /// pointer leaves the container.
    pub fn step(&self, pointer: Point, container: Size) -> Point {
        if self.threshold <= 0.0 || self.max_step <= 0.0 {
            return Point::default();
        }
        Point::new(
            self.axis(pointer.x, container.width),
            self.axis(pointer.y, container.height),
        )
    }

    fn axis(&self, pos: f32, length: f32) -> f32 {
        if !pos.is_finite() || !length.is_finite() || length <= 0.0 {
            return 0.0;
        }
        // Zones may overlap in tiny containers; the near edge wins.
        let threshold = self.threshold.min(length / 2.0);
        if pos < threshold {
            -self.max_step * depth(threshold - pos, threshold)
        } else if pos > length - threshold {
            self.max_step * depth(pos - (length - threshold), threshold)
        } else {
            0.0
        }
    }
}

fn depth(into_zone: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (into_zone / threshold).clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const ZONE: EdgeZone = EdgeZone {
        threshold: 40.0,
        max_step: 20.0,
    };
    const CONTAINER: Size = Size {
        width: 800.0,
        height: 400.0,
    };

    #[test]
    fn test_center_is_still() {
        assert_eq!(ZONE.step(Point::new(400.0, 200.0), CONTAINER), Point::default());
    }

    #[test]
    fn test_step_scales_with_depth() {
        let half = ZONE.step(Point::new(400.0, 380.0), CONTAINER);
        assert_eq!(half, Point::new(0.0, 10.0));
        let full_left = ZONE.step(Point::new(0.0, 200.0), CONTAINER);
        assert_eq!(full_left, Point::new(-20.0, 0.0));
    }

    #[test]
    fn test_outside_container_caps_at_max() {
        let step = ZONE.step(Point::new(5000.0, -300.0), CONTAINER);
        assert_eq!(step, Point::new(20.0, -20.0));
    }

    #[test]
    fn test_disabled_zone() {
        let zone = EdgeZone {
            threshold: 0.0,
            max_step: 20.0,
        };
        assert_eq!(zone.step(Point::new(0.0, 0.0), CONTAINER), Point::default());
    }
}
