/// Mesh to representation converters
///
/// A view owns one converter and asks it for a fresh representation whenever
/// its cached one was invalidated. Property meshes skip the geometric
/// algorithms and become a built-in primitive whichever converter sees them.
use crate::config::ViewerSettings;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::primitive;
use crate::representation::Representation;
use crate::triangulate;
use crate::wireframe;

pub trait Converter {
    fn convert(&self, mesh: &Mesh) -> Result<Representation>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Converter of the base view: there is never anything to draw
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConverter;

impl Converter for NullConverter {
    fn convert(&self, _mesh: &Mesh) -> Result<Representation> {
        Ok(Representation::Empty)
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Solid faces through fan triangulation
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidConverter;

impl Converter for SolidConverter {
    fn convert(&self, mesh: &Mesh) -> Result<Representation> {
        match mesh {
            Mesh::Geometry { .. } => Ok(Representation::Solid(triangulate::triangulate_mesh(mesh)?)),
            Mesh::Properties { .. } => primitive::from_properties(mesh),
        }
    }

    fn name(&self) -> &'static str {
        "solid"
    }
}

/// Volumetric wireframe: one cylinder per edge
#[derive(Debug, Clone, Copy, Default)]
pub struct WireframeConverter {
    pub settings: ViewerSettings,
}

impl WireframeConverter {
    pub fn new(settings: ViewerSettings) -> Self {
        Self { settings }
    }
}

impl Converter for WireframeConverter {
    fn convert(&self, mesh: &Mesh) -> Result<Representation> {
        match mesh {
            Mesh::Geometry { .. } => Ok(Representation::Wireframe(wireframe::extract_edges(
                mesh,
                &self.settings,
            )?)),
            Mesh::Properties { .. } => primitive::from_properties(mesh),
        }
    }

    fn name(&self) -> &'static str {
        "wireframe"
    }
}
