// Settings module
// Grid and interaction settings for the timetable surface

use serde::{Deserialize, Serialize};

/// Timetable grid and interaction settings.
///
/// These are the knobs the rendered surface depends on: the vertical scale,
/// the visible hour range, the snapping granularity used when committing a
/// drag, and the edge auto-scroll behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vertical scale of the grid
    pub pixels_per_minute: f32,
    /// First rendered hour of the day
    pub min_hour: u32,
    /// Last rendered hour of the day
    pub max_hour: u32,
    /// Snap granularity in minutes applied when a drag is committed
    pub snap_minutes: i64,
    /// Fraction of the scroll container's extent that counts as the
    /// auto-scroll edge margin
    pub scroll_edge_fraction: f32,
    /// Auto-scroll speed cap in pixels per tick
    pub max_scroll_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pixels_per_minute: 2.0,
            min_hour: 8,
            max_hour: 20,
            snap_minutes: 5,
            scroll_edge_fraction: 0.15,
            max_scroll_speed: 20.0,
        }
    }
}

impl Settings {
    /// Validate the settings, returning a description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.pixels_per_minute <= 0.0 {
            return Err("pixels_per_minute must be positive".to_string());
        }
        if self.min_hour >= self.max_hour || self.max_hour > 24 {
            return Err(format!(
                "invalid hour range {}..{}",
                self.min_hour, self.max_hour
            ));
        }
        if self.snap_minutes <= 0 {
            return Err("snap_minutes must be positive".to_string());
        }
        if !(0.0..0.5).contains(&self.scroll_edge_fraction) {
            return Err("scroll_edge_fraction must be in [0, 0.5)".to_string());
        }
        Ok(())
    }
}
