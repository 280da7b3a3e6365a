/// Geometric description of a plant component
use nalgebra::Point3;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Type tag reported by meshes that list their vertices directly
pub const CUSTOM_MESH_TYPE: &str = "custom";

/// A component's shape, described one of two ways
///
/// `Geometry` lists vertex positions and entities, where each entity is an
/// ordered list of indices into `vertices` naming one face (three or more
/// indices) or one edge group. `Properties` names a built-in shape through
/// `kind` (for example `"sphere"`) and carries the scalars it needs (for
/// example `"radius"`).
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    Geometry {
        vertices: Vec<Point3<f32>>,
        entities: Vec<Vec<usize>>,
    },
    Properties {
        kind: String,
        properties: BTreeMap<String, f64>,
    },
}

impl Mesh {
    pub fn geometry(vertices: Vec<Point3<f32>>, entities: Vec<Vec<usize>>) -> Self {
        Mesh::Geometry { vertices, entities }
    }

    pub fn properties<K, I>(kind: impl Into<String>, properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        Mesh::Properties {
            kind: kind.into(),
            properties: properties
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// `"custom"` for geometry meshes, the shape tag otherwise
    pub fn mesh_type(&self) -> &str {
        match self {
            Mesh::Geometry { .. } => CUSTOM_MESH_TYPE,
            Mesh::Properties { kind, .. } => kind.as_str(),
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, Mesh::Geometry { .. })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        match self {
            Mesh::Geometry { vertices, .. } => vertices.as_slice(),
            Mesh::Properties { .. } => &[],
        }
    }

    pub fn entities(&self) -> &[Vec<usize>] {
        match self {
            Mesh::Geometry { entities, .. } => entities.as_slice(),
            Mesh::Properties { .. } => &[],
        }
    }

    /// Look up a named scalar
    ///
    /// Callers are expected to know which properties a shape carries; a
    /// missing name is reported, never defaulted.
    pub fn property(&self, name: &str) -> Result<f64> {
        match self {
            Mesh::Properties { properties, .. } => properties
                .get(name)
                .copied()
                .ok_or_else(|| Error::missing_property(name)),
            Mesh::Geometry { .. } => Err(self.wrong_kind("properties")),
        }
    }

    /// Overwrite (or add) a named scalar
    pub fn set_property(&mut self, name: impl Into<String>, value: f64) -> Result<()> {
        let error = self.wrong_kind("properties");
        match self {
            Mesh::Properties { properties, .. } => {
                properties.insert(name.into(), value);
                Ok(())
            }
            Mesh::Geometry { .. } => Err(error),
        }
    }

    /// Check that every entity index points at a vertex
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices().len();
        for (entity, indices) in self.entities().iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= count) {
                return Err(Error::IndexOutOfRange {
                    entity,
                    index,
                    count,
                });
            }
        }
        Ok(())
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Mesh::Geometry { .. } => "geometry",
            Mesh::Properties { .. } => "properties",
        }
    }

    fn wrong_kind(&self, expected: &'static str) -> Error {
        Error::WrongMeshKind {
            expected,
            found: self.kind_name(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Mesh::geometry(Vec::new(), Vec::new())
    }
}
