/// Radius of the cylinders standing in for wireframe edges
pub const DEFAULT_EDGE_RADIUS: f32 = 0.5;

/// How meshes are turned into representations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub edge_radius: f32,
    /// Emit an edge shared by several entities only once
    pub dedup_edges: bool,
}

impl ViewerSettings {
    pub fn with_edge_radius(self, edge_radius: f32) -> Self {
        Self { edge_radius, ..self }
    }

    pub fn with_dedup_edges(self, dedup_edges: bool) -> Self {
        Self { dedup_edges, ..self }
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            edge_radius: DEFAULT_EDGE_RADIUS,
            dedup_edges: false,
        }
    }
}
