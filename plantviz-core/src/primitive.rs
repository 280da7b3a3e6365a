/// Built-in shapes for property-described meshes
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::representation::{Primitive, Representation};

pub const SPHERE: &str = "sphere";
pub const CUBE: &str = "cube";
pub const CYLINDER: &str = "cylinder";

/// Map a property mesh straight to a primitive
///
/// Type tags are matched by exact, case-sensitive value. Unknown tags give
/// [`Representation::Empty`]; a known tag missing one of its properties is an
/// error.
pub fn from_properties(mesh: &Mesh) -> Result<Representation> {
    if mesh.is_geometry() {
        return Err(Error::WrongMeshKind {
            expected: "properties",
            found: "geometry",
        });
    }

    let read = |name: &str| mesh.property(name).map(|value| value as f32);
    let primitive = match mesh.mesh_type() {
        SPHERE => Primitive::Sphere {
            radius: read("radius")?,
        },
        CUBE => Primitive::Cube {
            width: read("width")?,
            height: read("height")?,
            depth: read("depth")?,
        },
        CYLINDER => Primitive::Cylinder {
            radius: read("radius")?,
            height: read("height")?,
        },
        other => {
            tracing::warn!(mesh_type = other, "no primitive for mesh type");
            return Ok(Representation::Empty);
        }
    };

    tracing::debug!(?primitive, "mapped property mesh");
    Ok(Representation::Primitive(primitive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_from_radius() {
        let mesh = Mesh::properties("sphere", [("radius", 25.0)]);
        assert_eq!(
            from_properties(&mesh),
            Ok(Representation::Primitive(Primitive::Sphere { radius: 25.0 }))
        );
    }

    #[test]
    fn test_cube_and_cylinder() {
        let cube = Mesh::properties("cube", [("width", 1.0), ("height", 2.0), ("depth", 3.0)]);
        assert_eq!(
            from_properties(&cube),
            Ok(Representation::Primitive(Primitive::Cube {
                width: 1.0,
                height: 2.0,
                depth: 3.0
            }))
        );

        let pipe = Mesh::properties("cylinder", [("radius", 0.25), ("height", 4.0)]);
        assert_eq!(
            from_properties(&pipe),
            Ok(Representation::Primitive(Primitive::Cylinder {
                radius: 0.25,
                height: 4.0
            }))
        );
    }

    #[test]
    fn test_missing_property() {
        let mesh = Mesh::properties("sphere", [("diameter", 2.0)]);
        assert_eq!(
            from_properties(&mesh),
            Err(Error::MissingProperty("radius".to_string()))
        );
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let mesh = Mesh::properties("Sphere", [("radius", 1.0)]);
        assert_eq!(from_properties(&mesh), Ok(Representation::Empty));
    }

    #[test]
    fn test_geometry_mesh_rejected() {
        assert!(from_properties(&Mesh::default()).is_err());
    }
}
