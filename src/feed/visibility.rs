//! Visibility detection
//!
//! Hosts report how visible the last card is in one of two ways: an
//! intersection ratio (IntersectionObserver style) or raw scroll metrics
//! (scroll-listener style). [`VisibilityThresholds`] decides whether either
//! one should load the next batch.

use serde::Deserialize;

/// A visibility report from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisibilitySignal {
    /// Fraction of the last card inside the viewport, `0.0..=1.0`
    Intersection { ratio: f64 },
    /// Window scroll metrics, all in CSS pixels
    Scroll {
        viewport_height: f64,
        scroll_y: f64,
        document_height: f64,
    },
}

/// Trigger thresholds for both signal kinds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VisibilityThresholds {
    /// Minimum intersection ratio that counts as "seen"
    #[serde(default = "default_visibility_threshold")]
    pub intersection_ratio: f64,

    /// Distance from the bottom of the document that counts as "near bottom"
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin_px: f64,
}

fn default_visibility_threshold() -> f64 {
    0.6
}

fn default_scroll_margin() -> f64 {
    200.0
}

impl Default for VisibilityThresholds {
    fn default() -> Self {
        Self {
            intersection_ratio: default_visibility_threshold(),
            scroll_margin_px: default_scroll_margin(),
        }
    }
}

impl VisibilityThresholds {
    /// Whether a signal crosses the trigger threshold
    pub fn is_triggered(&self, signal: VisibilitySignal) -> bool {
        match signal {
            VisibilitySignal::Intersection { ratio } => {
                ratio.is_finite() && ratio > 0.0 && ratio >= self.intersection_ratio
            }
            VisibilitySignal::Scroll {
                viewport_height,
                scroll_y,
                document_height,
            } => viewport_height + scroll_y >= document_height - self.scroll_margin_px,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.intersection_ratio) {
            return Err(format!(
                "intersection_ratio must be within 0.0..=1.0, got {}",
                self.intersection_ratio
            ));
        }
        if !self.scroll_margin_px.is_finite() || self.scroll_margin_px < 0.0 {
            return Err(format!(
                "scroll_margin_px must be a non-negative number, got {}",
                self.scroll_margin_px
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_threshold() {
        let t = VisibilityThresholds::default();
        assert!(!t.is_triggered(VisibilitySignal::Intersection { ratio: 0.3 }));
        assert!(t.is_triggered(VisibilitySignal::Intersection { ratio: 0.6 }));
        assert!(t.is_triggered(VisibilitySignal::Intersection { ratio: 1.0 }));
        assert!(!t.is_triggered(VisibilitySignal::Intersection { ratio: f64::NAN }));
    }

    #[test]
    fn test_zero_ratio_never_triggers() {
        let t = VisibilityThresholds {
            intersection_ratio: 0.0,
            ..Default::default()
        };
        assert!(!t.is_triggered(VisibilitySignal::Intersection { ratio: 0.0 }));
        assert!(t.is_triggered(VisibilitySignal::Intersection { ratio: 0.01 }));
    }

    #[test]
    fn test_scroll_near_bottom() {
        let t = VisibilityThresholds::default();
        let near = VisibilitySignal::Scroll {
            viewport_height: 800.0,
            scroll_y: 1000.0,
            document_height: 2000.0,
        };
        let far = VisibilitySignal::Scroll {
            viewport_height: 800.0,
            scroll_y: 500.0,
            document_height: 2000.0,
        };
        assert!(t.is_triggered(near));
        assert!(!t.is_triggered(far));
    }

    #[test]
    fn test_validate() {
        assert!(VisibilityThresholds::default().validate().is_ok());
        let bad = VisibilityThresholds {
            intersection_ratio: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
