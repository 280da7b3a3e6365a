/// Volumetric wireframes: one oriented cylinder per mesh edge
use nalgebra::{Point3, Unit};
use std::collections::HashSet;

use crate::config::ViewerSettings;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::representation::{EdgeCylinder, EdgeRotation, CANONICAL_UP};

/// Below this a direction or rotation axis counts as zero
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Rotation that turns a cylinder standing on [`CANONICAL_UP`] onto `start -> end`
///
/// The axis is `up × d` and the angle `acos(d̂ · up)`. When `d` is parallel or
/// antiparallel to up (or has no length) the cross product vanishes and the
/// identity is returned instead of an undefined axis.
pub fn orient(start: Point3<f32>, end: Point3<f32>) -> EdgeRotation {
    let Some(direction) = Unit::try_new(end - start, DEGENERATE_EPSILON) else {
        return EdgeRotation::identity();
    };
    let Some(axis) = Unit::try_new(CANONICAL_UP.cross(&direction.into_inner()), DEGENERATE_EPSILON) else {
        return EdgeRotation::identity();
    };

    let angle = direction.dot(&CANONICAL_UP).clamp(-1.0, 1.0).acos();
    EdgeRotation { axis, angle }
}

/// Cylinder proxy for the segment between two mesh vertices
pub fn edge_cylinder(
    start_index: usize,
    end_index: usize,
    start: Point3<f32>,
    end: Point3<f32>,
    radius: f32,
) -> EdgeCylinder {
    EdgeCylinder {
        start: start_index,
        end: end_index,
        center: nalgebra::center(&start, &end),
        length: nalgebra::distance(&start, &end),
        radius,
        rotation: orient(start, end),
    }
}

/// Walk every entity cyclically and emit a cylinder per adjacent index pair
///
/// Entities with fewer than two indices name no edge and are skipped. With
/// `dedup_edges` set, an edge shared by two faces is emitted once (first
/// occurrence, in either direction).
pub fn extract_edges(mesh: &Mesh, settings: &ViewerSettings) -> Result<Vec<EdgeCylinder>> {
    mesh.validate()?;

    let vertices = mesh.vertices();
    let mut seen = HashSet::new();
    let mut cylinders = Vec::new();

    for entity in mesh.entities() {
        let n = entity.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let (a, b) = (entity[i], entity[(i + 1) % n]);
            if settings.dedup_edges && !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            cylinders.push(edge_cylinder(a, b, vertices[a], vertices[b], settings.edge_radius));
        }
    }

    tracing::debug!(edges = cylinders.len(), dedup = settings.dedup_edges, "extracted wireframe");
    Ok(cylinders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_aligned_edge_has_no_rotation() {
        let cylinder = edge_cylinder(0, 1, Point3::origin(), Point3::new(0.0, 1.0, 0.0), 0.5);
        assert!(cylinder.rotation.is_identity());
        assert_relative_eq!(cylinder.length, 1.0);
        assert_relative_eq!(cylinder.center, Point3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_x_edge_rotates_about_negative_z() {
        let rotation = orient(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotation.degrees(), 90.0, epsilon = 1e-4);
        assert_relative_eq!(rotation.axis.into_inner(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_antiparallel_edge_is_identity() {
        let rotation = orient(Point3::new(0.0, 3.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        assert!(rotation.is_identity());
        assert!(orient(Point3::origin(), Point3::origin()).is_identity());
    }

    #[test]
    fn test_rotation_maps_up_onto_edge() {
        let start = Point3::new(1.0, -2.0, 0.5);
        let end = Point3::new(-3.0, 4.0, 2.0);
        let cylinder = edge_cylinder(0, 1, start, end, 0.5);

        let [a, b] = cylinder.endpoints();
        assert_relative_eq!(a, start, epsilon = 1e-4);
        assert_relative_eq!(b, end, epsilon = 1e-4);
    }

    fn triangle_pair() -> Mesh {
        Mesh::geometry(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![2, 1, 3]],
        )
    }

    #[test]
    fn test_extract_every_cyclic_pair() {
        let edges = extract_edges(&triangle_pair(), &ViewerSettings::default()).unwrap();
        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 0), (2, 1), (1, 3), (3, 2)]);
        assert!(edges.iter().all(|e| e.radius == 0.5));
    }

    #[test]
    fn test_extract_dedup_shared_edges() {
        let settings = ViewerSettings {
            dedup_edges: true,
            ..ViewerSettings::default()
        };
        let edges = extract_edges(&triangle_pair(), &settings).unwrap();
        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)]);
    }

    #[test]
    fn test_extract_skips_single_index_entities() {
        let mesh = Mesh::geometry(vec![Point3::origin()], vec![vec![0]]);
        assert!(extract_edges(&mesh, &ViewerSettings::default()).unwrap().is_empty());
    }
}
