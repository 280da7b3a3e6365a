/// Renderer-facing objects derived from a mesh
///
/// These are plain data. A host turns them into whatever its scene graph
/// uses (terminal rasterizer, GPU buffers, and so on).
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

/// Axis every cylinder proxy is built along before it is rotated into place
pub const CANONICAL_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// What a view hands to the host
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// Nothing to draw (base view, disposed view, unknown shape)
    Empty,
    /// Triangulated faces
    Solid(TriangleMesh),
    /// One cylinder per mesh edge
    Wireframe(Vec<EdgeCylinder>),
    /// A built-in shape sized by mesh properties
    Primitive(Primitive),
}

impl Representation {
    pub fn is_empty(&self) -> bool {
        match self {
            Representation::Empty => true,
            Representation::Solid(mesh) => mesh.faces.is_empty(),
            Representation::Wireframe(edges) => edges.is_empty(),
            Representation::Primitive(_) => false,
        }
    }
}

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub points: Vec<Point3<f32>>,
    /// Three indices into `points` per triangle, winding preserved from the source entity
    pub faces: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Corner positions of one face
    pub fn corners(&self, face: usize) -> [Point3<f32>; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.points[a as usize],
            self.points[b as usize],
            self.points[c as usize],
        ]
    }

    /// Unit normal of one face; `None` when its corners are collinear
    pub fn face_normal(&self, face: usize) -> Option<Vector3<f32>> {
        triangle_normal(&self.corners(face))
    }
}

/// Calculate the unit normal from a triangle's corners, following their winding
///
/// Degenerate triangles (collinear or coincident corners) have no normal.
pub fn triangle_normal(corners: &[Point3<f32>; 3]) -> Option<Vector3<f32>> {
    let [v0, v1, v2] = corners;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    edge1.cross(&edge2).try_normalize(1e-12)
}

/// Rotation taking [`CANONICAL_UP`] onto an edge direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRotation {
    pub axis: Unit<Vector3<f32>>,
    /// Radians, in `[0, π]`
    pub angle: f32,
}

impl EdgeRotation {
    pub fn identity() -> Self {
        Self {
            axis: Unit::new_unchecked(CANONICAL_UP),
            angle: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&self.axis, self.angle)
    }
}

/// Cylinder proxy standing in for one mesh edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCylinder {
    /// Mesh vertex indices the edge runs between
    pub start: usize,
    pub end: usize,
    /// Midpoint of the edge
    pub center: Point3<f32>,
    pub length: f32,
    pub radius: f32,
    pub rotation: EdgeRotation,
}

impl EdgeCylinder {
    /// Direction the rotated cylinder points in
    pub fn direction(&self) -> Vector3<f32> {
        self.rotation.to_quaternion() * CANONICAL_UP
    }

    /// The two cap centers after rotation
    pub fn endpoints(&self) -> [Point3<f32>; 2] {
        let half = self.direction() * (self.length / 2.0);
        [self.center - half, self.center + half]
    }
}

/// Built-in shapes for property-described meshes, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Cube { width: f32, height: f32, depth: f32 },
    /// Aligned with [`CANONICAL_UP`]
    Cylinder { radius: f32, height: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_normal() {
        let mesh = TriangleMesh {
            points: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![[0, 1, 2]],
        };
        assert_eq!(mesh.triangle_count(), 1);
        assert_relative_eq!(mesh.face_normal(0).unwrap(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_collinear_face_has_no_normal() {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(triangle_normal(&corners), None);
        assert_eq!(triangle_normal(&[Point3::origin(); 3]), None);

        let flipped = [corners[0], Point3::new(0.0, 1.0, 0.0), corners[1]];
        assert_relative_eq!(triangle_normal(&flipped).unwrap(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_identity_rotation_keeps_up() {
        let cylinder = EdgeCylinder {
            start: 0,
            end: 1,
            center: Point3::new(0.0, 0.5, 0.0),
            length: 1.0,
            radius: 0.5,
            rotation: EdgeRotation::identity(),
        };
        let [a, b] = cylinder.endpoints();
        assert_relative_eq!(a, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(b, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_is_empty() {
        assert!(Representation::Empty.is_empty());
        assert!(Representation::Wireframe(Vec::new()).is_empty());
        assert!(Representation::Solid(TriangleMesh::default()).is_empty());
        assert!(!Representation::Primitive(Primitive::Sphere { radius: 1.0 }).is_empty());
    }
}
