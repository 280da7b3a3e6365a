/// Scene host: keeps world-space geometry in step with its controllers
///
/// The scene listens to every controller it shows. A notification with a new
/// revision means the component changed, so the representation is pulled
/// again and re-placed. Otherwise only the transform moved and the already
/// placed geometry is moved from the previous transform to the current one.
use nalgebra::Point3;
use plantviz_core::{Controller, Listener, Representation, SubscriptionId, Transformation};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::tessellate::{self, Triangle};

pub type Segment = [Point3<f32>; 2];

/// World-space geometry of one controller, ready to rasterize
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placed {
    pub triangles: Vec<Triangle>,
    pub segments: Vec<Segment>,
}

impl Placed {
    pub fn from_representation(representation: &Representation, transform: &Transformation) -> Self {
        let matrix = transform.matrix();
        let place = |p: &Point3<f32>| matrix.transform_point(p);

        let mut placed = Self::default();
        match representation {
            Representation::Empty => {}
            Representation::Solid(mesh) => {
                placed.triangles = (0..mesh.triangle_count())
                    .map(|face| mesh.corners(face).map(|p| place(&p)))
                    .collect();
            }
            Representation::Wireframe(edges) => {
                placed.segments = edges
                    .iter()
                    .map(|edge| edge.endpoints().map(|p| place(&p)))
                    .collect();
            }
            Representation::Primitive(shape) => {
                placed.triangles = tessellate::primitive(shape)
                    .into_iter()
                    .map(|triangle| triangle.map(|p| place(&p)))
                    .collect();
            }
        }
        placed
    }

    /// Move every point from the `previous` placement to `current`
    pub fn reposition(&mut self, previous: Option<&Transformation>, current: &Transformation) {
        let points = self
            .triangles
            .iter_mut()
            .flat_map(|t| t.iter_mut())
            .chain(self.segments.iter_mut().flat_map(|s| s.iter_mut()));
        for point in points {
            *point = Transformation::reposition(*point, previous, current);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.segments.is_empty()
    }
}

struct Node {
    controller: Rc<Controller>,
    subscription: SubscriptionId,
    revision: Cell<u64>,
    placed: RefCell<Placed>,
}

impl Node {
    fn rebuild(&self) {
        let placed = match self.controller.representation() {
            Ok(representation) => {
                Placed::from_representation(&representation, &self.controller.transform())
            }
            Err(err) => {
                tracing::warn!(
                    component = %self.controller.component(),
                    error = %err,
                    "representation unavailable"
                );
                Placed::default()
            }
        };
        *self.placed.borrow_mut() = placed;
        self.revision.set(self.controller.revision());
    }

    fn reposition(&self) {
        let current = self.controller.transform();
        let previous = self.controller.previous_transform();
        if previous.unwrap_or_default().rotation() != current.rotation() {
            // Deltas only cover translation
            self.rebuild();
            return;
        }
        self.placed
            .borrow_mut()
            .reposition(previous.as_ref(), &current);
    }
}

/// Every controller on screen and its placed geometry
#[derive(Default)]
pub struct Scene {
    nodes: RefCell<Vec<Node>>,
    rebuilds: Cell<usize>,
    moves: Cell<usize>,
}

impl Scene {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Show a controller and start following its notifications
    ///
    /// A controller already in the scene is left as it is; returns whether a
    /// node was added.
    pub fn add(self: &Rc<Self>, controller: Rc<Controller>) -> bool {
        if self.contains(&controller) {
            tracing::debug!(component = %controller.component(), "already in scene");
            return false;
        }
        let subscription = controller.subscribe_rc(self);
        let node = Node {
            controller,
            subscription,
            revision: Cell::new(0),
            placed: RefCell::new(Placed::default()),
        };
        node.rebuild();
        tracing::debug!(
            component = %node.controller.component(),
            view = node.controller.view().name(),
            converter = node.controller.view().converter_name(),
            "added to scene"
        );
        self.nodes.borrow_mut().push(node);
        true
    }

    pub fn contains(&self, controller: &Rc<Controller>) -> bool {
        self.nodes
            .borrow()
            .iter()
            .any(|node| Rc::ptr_eq(&node.controller, controller))
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    pub fn controller(&self, index: usize) -> Option<Rc<Controller>> {
        self.nodes.borrow().get(index).map(|node| node.controller.clone())
    }

    /// Copy of the placed geometry of the node at `index`
    pub fn placed(&self, index: usize) -> Option<Placed> {
        self.nodes
            .borrow()
            .get(index)
            .map(|node| node.placed.borrow().clone())
    }

    /// Visit every node's placed geometry in insertion order
    pub fn for_each_placed(&self, mut visit: impl FnMut(&Placed)) {
        for node in self.nodes.borrow().iter() {
            visit(&node.placed.borrow());
        }
    }

    /// How many times a representation was pulled after a content change
    pub fn rebuilds(&self) -> usize {
        self.rebuilds.get()
    }

    /// How many transform-only updates were applied
    pub fn moves(&self) -> usize {
        self.moves.get()
    }
}

impl Listener<Controller> for Scene {
    fn update(&self, controller: &Controller) {
        let nodes = self.nodes.borrow();
        let Some(node) = nodes
            .iter()
            .find(|node| std::ptr::eq(Rc::as_ptr(&node.controller), controller))
        else {
            return;
        };

        if controller.revision() != node.revision.get() {
            node.rebuild();
            self.rebuilds.set(self.rebuilds.get() + 1);
        } else {
            node.reposition();
            self.moves.set(self.moves.get() + 1);
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        for node in self.nodes.get_mut().iter() {
            node.controller.unsubscribe(node.subscription);
        }
    }
}
