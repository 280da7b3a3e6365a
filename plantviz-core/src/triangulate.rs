/// Fan triangulation of mesh entities
///
/// Every entity is assumed to be a convex, planar polygon. A triangle is
/// created from the first index and each following pair of adjacent indices.
/// Concave entities come out wrong; there is no ear clipping here.
use crate::error::Result;
use crate::mesh::Mesh;
use crate::representation::TriangleMesh;

/// Triangles for one entity: `[e[0], e[i - 1], e[i]]` for `i` in `2..n`
///
/// Entities with fewer than three indices yield nothing.
pub fn fan(entity: &[usize]) -> Vec<[usize; 3]> {
    if entity.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(entity.len() - 2);
    for i in 2..entity.len() {
        triangles.push([entity[0], entity[i - 1], entity[i]]);
    }
    triangles
}

/// Triangulate every entity of a geometry mesh into one indexed triangle list
///
/// Property meshes have no entities and produce an empty list.
pub fn triangulate_mesh(mesh: &Mesh) -> Result<TriangleMesh> {
    mesh.validate()?;

    let faces: Vec<[u32; 3]> = mesh
        .entities()
        .iter()
        .flat_map(|entity| fan(entity))
        .map(|[a, b, c]| [a as u32, b as u32, c as u32])
        .collect();

    tracing::debug!(
        entities = mesh.entities().len(),
        triangles = faces.len(),
        "triangulated mesh"
    );

    Ok(TriangleMesh {
        points: mesh.vertices().to_vec(),
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_fan_convex_ngon() {
        for n in 3..9 {
            let entity: Vec<usize> = (0..n).collect();
            let triangles = fan(&entity);
            assert_eq!(triangles.len(), n - 2);
            for (k, triangle) in triangles.iter().enumerate() {
                let i = k + 2;
                assert_eq!(*triangle, [0, i - 1, i]);
            }
        }
    }

    #[test]
    fn test_fan_keeps_winding_and_first_index() {
        assert_eq!(fan(&[4, 7, 2, 9]), vec![[4, 7, 2], [4, 2, 9]]);
    }

    #[test]
    fn test_fan_degenerate_entities() {
        assert!(fan(&[]).is_empty());
        assert!(fan(&[0, 1]).is_empty());
    }

    #[test]
    fn test_triangulate_mesh() {
        let mesh = Mesh::geometry(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            vec![vec![0, 1, 2, 3], vec![0, 1, 4], vec![3, 4]],
        );
        let triangles = triangulate_mesh(&mesh).unwrap();
        assert_eq!(triangles.points.len(), 5);
        assert_eq!(triangles.faces, vec![[0, 1, 2], [0, 2, 3], [0, 1, 4]]);
    }

    #[test]
    fn test_triangulate_rejects_bad_index() {
        let mesh = Mesh::geometry(vec![Point3::origin()], vec![vec![0, 1, 2]]);
        assert!(triangulate_mesh(&mesh).is_err());
    }
}
