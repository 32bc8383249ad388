//! The hero bulb: a wireframe globe on a screw base, rotated and scaled by
//! the follower's pose and drawn with braille dots.
//!
//! Points are transformed the way a CSS `perspective() rotateX() rotateY()
//! scale()` chain transforms them: scale first, then Y rotation, then X
//! rotation, then perspective division.

use std::f64::consts::TAU;

use hero_motion::core::follower::{Pose, PERSPECTIVE_PX};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Widget,
    },
};

use super::theme::Theme;

const GLOBE_RADIUS: f64 = 55.0;
const GLOBE_CENTER_Y: f64 = 20.0;
const RING_SEGMENTS: usize = 24;
const BOUNDS: f64 = 110.0;

type Point3 = [f64; 3];

/// Multiplies a 3x3 matrix by a 3-dimensional vector.
fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &Point3) -> Point3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

fn rotation_x(deg: f64) -> [[f64; 3]; 3] {
    let (s, c) = deg.to_radians().sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

fn rotation_y(deg: f64) -> [[f64; 3]; 3] {
    let (s, c) = deg.to_radians().sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Apply the pose to a model-space point and project it to the canvas.
pub fn project(point: &Point3, pose: &Pose) -> (f64, f64) {
    let scaled = [point[0] * pose.scale, point[1] * pose.scale, point[2] * pose.scale];
    let turned = multiply_matrix_vector(&rotation_y(pose.rotate_y), &scaled);
    let tilted = multiply_matrix_vector(&rotation_x(pose.rotate_x), &turned);
    let w = PERSPECTIVE_PX / (PERSPECTIVE_PX - tilted[2]);
    (tilted[0] * w, tilted[1] * w)
}

fn ring(center: Point3, radius: f64, axis_y: bool) -> Vec<(Point3, Point3)> {
    let point = |i: usize| {
        let a = TAU * i as f64 / RING_SEGMENTS as f64;
        let (s, c) = a.sin_cos();
        if axis_y {
            [center[0] + radius * c, center[1], center[2] + radius * s]
        } else {
            [center[0] + radius * c, center[1] + radius * s, center[2]]
        }
    };
    (0..RING_SEGMENTS).map(|i| (point(i), point(i + 1))).collect()
}

/// Model-space line segments of the bulb.
pub fn bulb_segments() -> Vec<(Point3, Point3)> {
    let mut segments = Vec::new();
    let c = [0.0, GLOBE_CENTER_Y, 0.0];

    // Latitude rings.
    for lat in [-0.6_f64, -0.2, 0.2, 0.6] {
        let y = GLOBE_CENTER_Y + GLOBE_RADIUS * lat;
        let r = GLOBE_RADIUS * (1.0 - lat * lat).sqrt();
        segments.extend(ring([0.0, y, 0.0], r, true));
    }
    // Meridians: the outline circle rotated about the vertical axis.
    for k in 0..3 {
        let turn = rotation_y(60.0 * f64::from(k));
        segments.extend(ring([0.0, 0.0, 0.0], GLOBE_RADIUS, false).into_iter().map(|(a, b)| {
            let a = multiply_matrix_vector(&turn, &a);
            let b = multiply_matrix_vector(&turn, &b);
            (
                [a[0] + c[0], a[1] + c[1], a[2] + c[2]],
                [b[0] + c[0], b[1] + c[1], b[2] + c[2]],
            )
        }));
    }
    // Screw base.
    let neck = GLOBE_CENTER_Y - GLOBE_RADIUS * 0.8;
    for (i, y) in [neck, neck - 10.0, neck - 20.0, neck - 30.0].into_iter().enumerate() {
        let r = 20.0 - 2.0 * i as f64;
        segments.extend(ring([0.0, y, 0.0], r, true));
    }
    segments.push(([-20.0, neck, 0.0], [-14.0, neck - 30.0, 0.0]));
    segments.push(([20.0, neck, 0.0], [14.0, neck - 30.0, 0.0]));
    segments
}

/// Renders the bulb for one pose.
pub struct BulbWidget {
    pub pose: Pose,
    /// Pointer is over the hero.
    pub active: bool,
}

impl Widget for BulbWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let color: Color = Theme::bulb_color(self.active, self.pose.intensity);
        let lines: Vec<CanvasLine> = bulb_segments()
            .iter()
            .map(|(a, b)| {
                let (x1, y1) = project(a, &self.pose);
                let (x2, y2) = project(b, &self.pose);
                CanvasLine::new(x1, y1, x2, y2, color)
            })
            .collect();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-BOUNDS, BOUNDS])
            .y_bounds([-BOUNDS, BOUNDS])
            .paint(|ctx| {
                for line in &lines {
                    ctx.draw(line);
                }
            })
            .render(area, buf);
    }
}
