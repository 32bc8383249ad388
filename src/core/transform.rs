//! Visual update instructions applied to stage elements.

use std::fmt;

/// A transform applied to one element.  `Display` renders it in the
/// familiar CSS transform notation, which is also what the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    #[default]
    Identity,
    /// Vertical shift in pixels.
    TranslateY(f64),
    /// Vertical shift as a percentage of the element's own height.
    TranslateYPercent(f64),
    /// Perspective rotation around X and Y (degrees) followed by a scale.
    Rotate3d {
        perspective: f64,
        rotate_x: f64,
        rotate_y: f64,
        scale: f64,
    },
}

impl Transform {
    /// Vertical offset in whole rows for an element `height` rows tall,
    /// given how many pixels one row spans.
    pub fn row_offset(&self, height: u16, px_per_row: f64) -> i32 {
        match *self {
            Transform::TranslateY(px) => (px / px_per_row).round() as i32,
            Transform::TranslateYPercent(pct) => (pct / 100.0 * f64::from(height)).round() as i32,
            Transform::Identity | Transform::Rotate3d { .. } => 0,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::Identity => f.write_str("none"),
            Transform::TranslateY(px) => write!(f, "translateY({px}px)"),
            Transform::TranslateYPercent(pct) if pct == 0.0 => f.write_str("translateY(0)"),
            Transform::TranslateYPercent(pct) => write!(f, "translateY({pct}%)"),
            Transform::Rotate3d {
                perspective,
                rotate_x,
                rotate_y,
                scale,
            } => write!(
                f,
                "perspective({perspective}px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) scale({scale:.4})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_css_notation() {
        assert_eq!(Transform::TranslateY(12.5).to_string(), "translateY(12.5px)");
        assert_eq!(Transform::TranslateYPercent(-100.0).to_string(), "translateY(-100%)");
        assert_eq!(Transform::TranslateYPercent(0.0).to_string(), "translateY(0)");
        let rot = Transform::Rotate3d {
            perspective: 1000.0,
            rotate_x: 3.0,
            rotate_y: -4.0,
            scale: 1.014,
        };
        assert_eq!(
            rot.to_string(),
            "perspective(1000px) rotateX(3.00deg) rotateY(-4.00deg) scale(1.0140)"
        );
    }

    #[test]
    fn row_offsets() {
        assert_eq!(Transform::TranslateY(7.6).row_offset(3, 1.0), 8);
        assert_eq!(Transform::TranslateY(40.0).row_offset(3, 16.0), 3);
        assert_eq!(Transform::TranslateYPercent(-100.0).row_offset(3, 16.0), -3);
        assert_eq!(Transform::Identity.row_offset(3, 16.0), 0);
    }
}
