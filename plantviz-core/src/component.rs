/// Reactor plant components: the model side of the view/controller pair
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::geometry::Vertex;
use crate::mesh::Mesh;
use crate::notify::{Listener, Notifier, SubscriptionId};
use crate::polygon::Polygon;

/// How a component's mesh entities should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Entities are faces (or a property mesh)
    Plant,
    /// Every entity is a single two-index edge
    VolumetricPlant,
}

pub struct Component {
    id: i32,
    name: String,
    description: String,
    kind: ComponentKind,
    mesh: RefCell<Mesh>,
    notifier: Notifier<Component>,
}

impl Component {
    pub fn new(kind: ComponentKind, mesh: Mesh) -> Self {
        Self {
            id: 1,
            name: "Plant Component 1".to_string(),
            description: "Plant-level reactor component".to_string(),
            kind,
            mesh: RefCell::new(mesh),
            notifier: Notifier::new(),
        }
    }

    /// One face entity per polygon, indexing into `vertices`
    ///
    /// Polygon vertices are matched to the list by id. A polygon vertex whose
    /// id is not in the list is left out of its entity.
    pub fn from_polygons(vertices: &[Rc<Vertex>], polygons: &[Polygon]) -> Self {
        let index_of = index_by_id(vertices);
        let entities = polygons
            .iter()
            .map(|polygon| {
                polygon
                    .vertices()
                    .iter()
                    .filter_map(|v| index_of.get(&v.id()).copied())
                    .collect()
            })
            .collect();

        Self::new(ComponentKind::Plant, Mesh::geometry(locations(vertices), entities))
    }

    /// One two-index entity per polygon edge
    pub fn volumetric_from_polygons(vertices: &[Rc<Vertex>], polygons: &[Polygon]) -> Self {
        let index_of = index_by_id(vertices);
        let entities = polygons
            .iter()
            .flat_map(|polygon| polygon.edges().iter())
            .map(|edge| {
                edge.vertex_ids()
                    .iter()
                    .filter_map(|id| index_of.get(id).copied())
                    .collect()
            })
            .collect();

        Self::new(
            ComponentKind::VolumetricPlant,
            Mesh::geometry(locations(vertices), entities),
        )
    }

    pub fn from_properties<K, I>(kind: impl Into<String>, properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        Self::new(ComponentKind::Plant, Mesh::properties(kind, properties))
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn mesh(&self) -> Ref<'_, Mesh> {
        self.mesh.borrow()
    }

    pub fn mesh_type(&self) -> String {
        self.mesh.borrow().mesh_type().to_string()
    }

    /// Overwrite a mesh property and tell listeners
    pub fn set_property(&self, name: impl Into<String>, value: f64) -> Result<()> {
        self.mesh.borrow_mut().set_property(name, value)?;
        self.notify_changed();
        Ok(())
    }

    /// Announce a change to every listener; returns how many were reached
    pub fn notify_changed(&self) -> usize {
        self.notifier.notify(self)
    }

    pub fn subscribe(&self, listener: Weak<dyn Listener<Component>>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new(ComponentKind::Plant, Mesh::default())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("mesh", &*self.mesh.borrow())
            .finish()
    }
}

/// Vertex id to list position, first occurrence wins
fn index_by_id(vertices: &[Rc<Vertex>]) -> HashMap<i32, usize> {
    let mut index_of = HashMap::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        index_of.entry(vertex.id()).or_insert(i);
    }
    index_of
}

fn locations(vertices: &[Rc<Vertex>]) -> Vec<nalgebra::Point3<f32>> {
    vertices.iter().map(|v| v.location()).collect()
}
