//! Object layer components.

use std::f32::consts::TAU;

use bevy::color::palettes::css;
use bevy::prelude::*;

/// Segments used to outline an ellipse.
const ELLIPSE_SEGMENTS: usize = 32;

/// An object layer occupying one render slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct ObjectLayer {
    /// Render slot index (`0..layer_count`)
    pub slot: usize,
}

/// A shape object of an object layer.
///
/// The entity's transform sits on the object's Tiled anchor (its top-left
/// corner) and carries the object rotation.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct MapObject {
    /// Object ID assigned by Tiled
    pub id: u32,
    pub shape: ObjectShape,
    /// Outline colour, with the layer opacity applied
    pub color: Color,
}

/// Geometry of a map object, in object-local space with Y up.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum ObjectShape {
    Point,
    Rectangle { size: Vec2 },
    Ellipse { size: Vec2 },
    Polygon { vertices: Vec<Vec2> },
    Polyline { vertices: Vec<Vec2> },
}

impl ObjectShape {
    /// Convert a Tiled shape. Text objects have no outline and give `None`.
    pub fn from_tiled(shape: &tiled::ObjectShape) -> Option<Self> {
        let flip = |points: &[(f32, f32)]| -> Vec<Vec2> {
            points.iter().map(|&(x, y)| Vec2::new(x, -y)).collect()
        };

        match shape {
            tiled::ObjectShape::Rect { width, height } if *width == 0.0 && *height == 0.0 => {
                Some(Self::Point)
            }
            tiled::ObjectShape::Rect { width, height } => Some(Self::Rectangle {
                size: Vec2::new(*width, *height),
            }),
            tiled::ObjectShape::Ellipse { width, height } => Some(Self::Ellipse {
                size: Vec2::new(*width, *height),
            }),
            tiled::ObjectShape::Polygon { points } => Some(Self::Polygon {
                vertices: flip(points),
            }),
            tiled::ObjectShape::Polyline { points } => Some(Self::Polyline {
                vertices: flip(points),
            }),
            tiled::ObjectShape::Point(..) => Some(Self::Point),
            tiled::ObjectShape::Text { .. } => None,
        }
    }

    /// Default outline colour of the shape kind.
    pub fn default_color(&self) -> Color {
        match self {
            Self::Point => css::RED.into(),
            Self::Rectangle { .. } => css::LIME.into(),
            Self::Ellipse { .. } => css::DEEP_SKY_BLUE.into(),
            Self::Polygon { .. } => css::YELLOW.into(),
            Self::Polyline { .. } => css::AQUA.into(),
        }
    }

    /// Outline as a line strip in object-local space.
    ///
    /// Closed shapes repeat their first point at the end. Points have no
    /// outline.
    pub fn outline(&self) -> Vec<Vec2> {
        match self {
            Self::Point => Vec::new(),
            Self::Rectangle { size } => vec![
                Vec2::ZERO,
                Vec2::new(size.x, 0.0),
                Vec2::new(size.x, -size.y),
                Vec2::new(0.0, -size.y),
                Vec2::ZERO,
            ],
            Self::Ellipse { size } => {
                let half = *size / 2.0;
                let center = Vec2::new(half.x, -half.y);
                (0..=ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
                        center + Vec2::new(angle.cos() * half.x, angle.sin() * half.y)
                    })
                    .collect()
            }
            Self::Polygon { vertices } => {
                let mut points = vertices.clone();
                if let Some(first) = vertices.first() {
                    points.push(*first);
                }
                points
            }
            Self::Polyline { vertices } => vertices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangles_hang_below_their_anchor() {
        let shape = ObjectShape::Rectangle {
            size: Vec2::new(32.0, 16.0),
        };
        let outline = shape.outline();
        assert_eq!(outline.len(), 5);
        assert_eq!(outline[2], Vec2::new(32.0, -16.0));
        assert_eq!(outline.first(), outline.last());
    }

    #[test]
    fn polygons_close_and_polylines_stay_open() {
        let vertices = vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, -10.0)];
        let polygon = ObjectShape::Polygon {
            vertices: vertices.clone(),
        };
        let polyline = ObjectShape::Polyline { vertices };
        assert_eq!(polygon.outline().len(), 4);
        assert_eq!(polyline.outline().len(), 3);
    }

    #[test]
    fn tiled_points_flip_to_y_up() {
        let shape = ObjectShape::from_tiled(&tiled::ObjectShape::Polyline {
            points: vec![(0.0, 0.0), (4.0, 8.0)],
        });
        assert_eq!(
            shape,
            Some(ObjectShape::Polyline {
                vertices: vec![Vec2::ZERO, Vec2::new(4.0, -8.0)]
            })
        );
    }

    #[test]
    fn ellipse_outline_stays_in_its_box() {
        let shape = ObjectShape::Ellipse {
            size: Vec2::new(20.0, 10.0),
        };
        for point in shape.outline() {
            assert!((-0.001..=20.001).contains(&point.x));
            assert!((-10.001..=0.001).contains(&point.y));
        }
    }
}
