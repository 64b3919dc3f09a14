// Edge auto-scroll intent
// Computes the velocity a scroll container should move at while the pointer
// hovers near one of its edges during a drag

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect, Transform};
use crate::models::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollIntentConfig {
    /// Fraction of the container's extent that counts as the edge margin
    pub edge_fraction: f32,
    /// Speed cap in pixels per tick
    pub max_speed: f32,
}

impl Default for ScrollIntentConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.15,
            max_speed: 20.0,
        }
    }
}

impl From<&Settings> for ScrollIntentConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            edge_fraction: settings.scroll_edge_fraction,
            max_speed: settings.max_scroll_speed,
        }
    }
}

/// The scroll velocity for a pointer position inside a container.
///
/// Each axis scrolls when the pointer is within the edge margin, at a speed
/// inversely proportional to the distance from the edge and capped at
/// `max_speed`. Returns `None` when the pointer is outside every margin (or
/// outside the container entirely), meaning the host should stop its timer.
pub fn scroll_velocity(
    pointer: Point,
    container: Rect,
    config: ScrollIntentConfig,
) -> Option<Transform> {
    if !container.contains(pointer) {
        return None;
    }
    let x = axis_velocity(
        pointer.x,
        container.left(),
        container.right(),
        container.width * config.edge_fraction,
        config.max_speed,
    );
    let y = axis_velocity(
        pointer.y,
        container.top(),
        container.bottom(),
        container.height * config.edge_fraction,
        config.max_speed,
    );
    (x != 0.0 || y != 0.0).then_some(Transform::new(x, y))
}

fn axis_velocity(position: f32, low: f32, high: f32, margin: f32, max_speed: f32) -> f32 {
    if margin <= 0.0 {
        return 0.0;
    }
    let from_low = position - low;
    let from_high = high - position;
    if from_low < margin {
        -max_speed * (1.0 - from_low / margin)
    } else if from_high < margin {
        max_speed * (1.0 - from_high / margin)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 600.0)
    }

    #[test]
    fn test_center_has_no_intent() {
        let velocity = scroll_velocity(Point::new(500.0, 300.0), container(), Default::default());
        assert_eq!(velocity, None);
    }

    #[test]
    fn test_pointer_outside_has_no_intent() {
        let velocity = scroll_velocity(Point::new(-5.0, 300.0), container(), Default::default());
        assert_eq!(velocity, None);
    }

    #[test]
    fn test_speed_grows_toward_the_edge() {
        let config = ScrollIntentConfig::default();
        let near = scroll_velocity(Point::new(500.0, 30.0), container(), config).unwrap();
        let nearer = scroll_velocity(Point::new(500.0, 10.0), container(), config).unwrap();
        assert!(near.y < 0.0);
        assert!(nearer.y < near.y);
        assert!(nearer.y >= -config.max_speed);
    }

    #[test]
    fn test_speed_is_capped_at_the_edge() {
        let config = ScrollIntentConfig::default();
        let velocity = scroll_velocity(Point::new(1000.0, 300.0), container(), config).unwrap();
        assert_eq!(velocity.x, config.max_speed);
    }

    #[test]
    fn test_corner_scrolls_both_axes() {
        let velocity =
            scroll_velocity(Point::new(10.0, 590.0), container(), Default::default()).unwrap();
        assert!(velocity.x < 0.0);
        assert!(velocity.y > 0.0);
    }
}
