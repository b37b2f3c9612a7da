//! Outline rendering for map objects.

use bevy::prelude::*;

use crate::components::{MapObject, ObjectShape};

/// Half the arm length of the cross drawn for point objects.
const POINT_CROSS: f32 = 4.0;

/// Draw every visible map object as a gizmo outline.
///
/// Rectangles, ellipses, polygons and polylines follow the object's full
/// transform, so rotation and layer offsets apply. Points are drawn as a cross.
pub fn draw_map_objects(
    mut gizmos: Gizmos,
    objects: Query<(&MapObject, &GlobalTransform, &InheritedVisibility)>,
) {
    for (object, transform, visibility) in &objects {
        if !visibility.get() {
            continue;
        }

        if let ObjectShape::Point = object.shape {
            let center = transform.translation().truncate();
            gizmos.line_2d(
                center - Vec2::X * POINT_CROSS,
                center + Vec2::X * POINT_CROSS,
                object.color,
            );
            gizmos.line_2d(
                center - Vec2::Y * POINT_CROSS,
                center + Vec2::Y * POINT_CROSS,
                object.color,
            );
            continue;
        }

        gizmos.linestrip_2d(world_outline(&object.shape, transform), object.color);
    }
}

/// Outline of a shape in world space.
pub fn world_outline(shape: &ObjectShape, transform: &GlobalTransform) -> Vec<Vec2> {
    shape
        .outline()
        .into_iter()
        .map(|point| transform.transform_point(point.extend(0.0)).truncate())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn outlines_follow_translation() {
        let shape = ObjectShape::Rectangle {
            size: Vec2::splat(32.0),
        };
        let transform = GlobalTransform::from_xyz(256.0, 384.0, 3.0);
        let outline = world_outline(&shape, &transform);
        assert_eq!(outline[0], Vec2::new(256.0, 384.0));
        assert_eq!(outline[2], Vec2::new(288.0, 352.0));
    }

    #[test]
    fn outlines_follow_rotation() {
        let shape = ObjectShape::Polyline {
            vertices: vec![Vec2::ZERO, Vec2::new(10.0, 0.0)],
        };
        // A quarter turn clockwise, as Tiled would write `rotation="90"`
        let transform =
            GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_z(-FRAC_PI_2)));
        let outline = world_outline(&shape, &transform);
        assert!(outline[1].abs_diff_eq(Vec2::new(0.0, -10.0), 1e-4));
    }
}
