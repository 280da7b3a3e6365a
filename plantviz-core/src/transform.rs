/// Translation/rotation snapshots applied to views
use nalgebra::{Matrix4, Point3, Vector3};

/// An immutable placement: translation plus rotation about three axes (radians)
///
/// Views keep the current snapshot and the one it replaced; hosts diff the two
/// to move what they already placed instead of rebuilding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    translation: Vector3<f32>,
    rotation: Vector3<f32>,
}

impl Transformation {
    pub fn new(translation: Vector3<f32>, rotation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self::identity().with_translation(x, y, z)
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn with_translation(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            ..self
        }
    }

    pub fn with_rotation(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            rotation: Vector3::new(x, y, z),
            ..self
        }
    }

    /// Copy moved by the given offsets
    pub fn shifted(self, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            translation: self.translation + Vector3::new(dx, dy, dz),
            ..self
        }
    }

    /// Copy rotated further by the given deltas (in radians)
    pub fn rotated(self, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            rotation: self.rotation + Vector3::new(dx, dy, dz),
            ..self
        }
    }

    /// Rotation matrix, applied in order Z, Y, X
    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.rotation.z));

        rz * ry * rx
    }

    /// Model matrix: rotate about the origin, then translate
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation) * self.rotation_matrix()
    }

    /// How far the translation moved between two snapshots
    ///
    /// An unset previous snapshot stands for the identity a view reports
    /// before its first assignment.
    pub fn translation_delta(previous: Option<&Transformation>, current: &Transformation) -> Vector3<f32> {
        let before = previous.map_or_else(Vector3::zeros, |p| p.translation);
        current.translation - before
    }

    /// Move an already placed point: `old - previous.translation + current.translation`
    pub fn reposition(
        old: Point3<f32>,
        previous: Option<&Transformation>,
        current: &Transformation,
    ) -> Point3<f32> {
        old + Self::translation_delta(previous, current)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shift_leaves_original_untouched() {
        let original = Transformation::from_translation(150.0, 0.0, 0.0);
        let moved = original.shifted(5.0, 0.0, -5.0);
        assert_eq!(original.translation(), Vector3::new(150.0, 0.0, 0.0));
        assert_eq!(moved.translation(), Vector3::new(155.0, 0.0, -5.0));
        assert_eq!(moved.rotation(), original.rotation());
    }

    #[test]
    fn test_rotated_accumulates() {
        let t = Transformation::identity().rotated(0.1, 0.2, 0.3).rotated(0.1, 0.0, 0.0);
        assert_relative_eq!(t.rotation(), Vector3::new(0.2, 0.2, 0.3), epsilon = 1e-6);
    }

    #[test]
    fn test_identity_matrix() {
        let matrix = Transformation::identity().matrix();
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_matrix_translates_after_rotating() {
        let t = Transformation::from_translation(1.0, 0.0, 0.0)
            .with_rotation(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let p = t.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_reposition() {
        let previous = Transformation::from_translation(150.0, 0.0, 0.0);
        let current = previous.shifted(0.0, 0.0, 5.0);
        let moved = Transformation::reposition(Point3::new(151.0, 2.0, 0.0), Some(&previous), &current);
        assert_relative_eq!(moved, Point3::new(151.0, 2.0, 5.0));

        // First assignment: everything was placed at identity
        let first = Transformation::reposition(Point3::new(1.0, 2.0, 3.0), None, &previous);
        assert_relative_eq!(first, Point3::new(151.0, 2.0, 3.0));
    }
}
