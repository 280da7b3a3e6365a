/// Graph primitives: observable vertices and the edges connecting them
use nalgebra::{Point3, Vector3};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::notify::{Listener, Notifier, SubscriptionId};

/// A point in 3D space identified by an integer id
///
/// Vertices are shared between edges and polygons through `Rc`. Moving a
/// vertex notifies every listener, which is how edges learn that their
/// geometry changed.
pub struct Vertex {
    id: i32,
    location: Cell<Point3<f32>>,
    notifier: Notifier<Vertex>,
}

impl Vertex {
    pub fn new(id: i32, x: f32, y: f32, z: f32) -> Rc<Self> {
        Self::at(id, Point3::new(x, y, z))
    }

    pub fn at(id: i32, location: Point3<f32>) -> Rc<Self> {
        Rc::new(Self {
            id,
            location: Cell::new(location),
            notifier: Notifier::new(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn location(&self) -> Point3<f32> {
        self.location.get()
    }

    pub fn set_location(&self, location: Point3<f32>) {
        self.location.set(location);
        self.notifier.notify(self);
    }

    pub fn translate(&self, offset: Vector3<f32>) {
        self.set_location(self.location() + offset);
    }

    /// Deep copy with the same id and location but no listeners
    pub fn duplicate(&self) -> Rc<Self> {
        Self::at(self.id, self.location())
    }

    pub fn subscribe(&self, listener: Weak<dyn Listener<Vertex>>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.id)
            .field("location", &self.location())
            .finish()
    }
}

/// One end of an edge together with the edge's subscription on it
struct Endpoint {
    vertex: Rc<Vertex>,
    subscription: SubscriptionId,
}

/// A segment between two vertices
///
/// An edge listens to both of its endpoints and re-broadcasts to its own
/// listeners whenever one of them moves.
pub struct Edge {
    id: i32,
    endpoints: RefCell<[Endpoint; 2]>,
    notifier: Notifier<Edge>,
}

impl Edge {
    pub fn new(id: i32, start: &Rc<Vertex>, end: &Rc<Vertex>) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Edge>| {
            let listener: Weak<dyn Listener<Vertex>> = weak.clone();
            Self {
                id,
                endpoints: RefCell::new([
                    Endpoint {
                        vertex: start.clone(),
                        subscription: start.subscribe(listener.clone()),
                    },
                    Endpoint {
                        vertex: end.clone(),
                        subscription: end.subscribe(listener),
                    },
                ]),
                notifier: Notifier::new(),
            }
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Ids of the start and end vertex, in that order
    pub fn vertex_ids(&self) -> [i32; 2] {
        let endpoints = self.endpoints.borrow();
        [endpoints[0].vertex.id(), endpoints[1].vertex.id()]
    }

    pub fn vertices(&self) -> [Rc<Vertex>; 2] {
        let endpoints = self.endpoints.borrow();
        [endpoints[0].vertex.clone(), endpoints[1].vertex.clone()]
    }

    pub fn start(&self) -> Rc<Vertex> {
        self.endpoints.borrow()[0].vertex.clone()
    }

    pub fn end(&self) -> Rc<Vertex> {
        self.endpoints.borrow()[1].vertex.clone()
    }

    pub fn length(&self) -> f32 {
        let [start, end] = self.vertices();
        (end.location() - start.location()).norm()
    }

    /// True if this edge's endpoint ids are exactly `{a, b}` in either order
    pub fn connects(&self, a: i32, b: i32) -> bool {
        let [start, end] = self.vertex_ids();
        (start == a && end == b) || (start == b && end == a)
    }

    /// Point the endpoint sharing `vertex`'s id at this instance and listen to it
    ///
    /// The subscription on the replaced instance is dropped. Returns false
    /// when neither endpoint has that id.
    pub fn bind(self: &Rc<Self>, vertex: &Rc<Vertex>) -> bool {
        let mut endpoints = self.endpoints.borrow_mut();
        let Some(endpoint) = endpoints
            .iter_mut()
            .find(|e| e.vertex.id() == vertex.id())
        else {
            return false;
        };

        if !Rc::ptr_eq(&endpoint.vertex, vertex) {
            endpoint.vertex.unsubscribe(endpoint.subscription);
            endpoint.vertex = vertex.clone();
        }
        let weak: Weak<Edge> = Rc::downgrade(self);
        let listener: Weak<dyn Listener<Vertex>> = weak;
        endpoint.subscription = vertex.subscribe(listener);
        true
    }

    pub fn subscribe(&self, listener: Weak<dyn Listener<Edge>>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl Listener<Vertex> for Edge {
    fn update(&self, vertex: &Vertex) {
        let relevant = self
            .endpoints
            .borrow()
            .iter()
            .any(|e| std::ptr::eq(Rc::as_ptr(&e.vertex), vertex));
        if relevant {
            self.notifier.notify(self);
        }
    }
}

impl Drop for Edge {
    fn drop(&mut self) {
        for endpoint in self.endpoints.get_mut().iter() {
            endpoint.vertex.unsubscribe(endpoint.subscription);
        }
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("id", &self.id)
            .field("vertex_ids", &self.vertex_ids())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Counts how often an edge re-broadcast
    #[derive(Default)]
    pub(crate) struct EdgeRecorder {
        pub ids: RefCell<Vec<i32>>,
    }

    impl Listener<Edge> for EdgeRecorder {
        fn update(&self, edge: &Edge) {
            self.ids.borrow_mut().push(edge.id());
        }
    }

    pub(crate) fn watch(edge: &Edge, recorder: &Rc<EdgeRecorder>) {
        let weak: Weak<EdgeRecorder> = Rc::downgrade(recorder);
        let weak: Weak<dyn Listener<Edge>> = weak;
        edge.subscribe(weak);
    }

    #[test]
    fn test_edge_length() {
        let a = Vertex::new(1, 0.0, 0.0, 0.0);
        let b = Vertex::new(2, 3.0, 4.0, 0.0);
        let edge = Edge::new(1, &a, &b);
        assert!((edge.length() - 5.0).abs() < 1e-6);
        assert_eq!(edge.vertex_ids(), [1, 2]);
        assert!(edge.connects(2, 1));
        assert!(!edge.connects(1, 3));
    }

    #[test]
    fn test_edge_relays_vertex_moves() {
        let a = Vertex::new(1, 0.0, 0.0, 0.0);
        let b = Vertex::new(2, 1.0, 0.0, 0.0);
        let edge = Edge::new(7, &a, &b);
        let recorder = Rc::new(EdgeRecorder::default());
        watch(&edge, &recorder);

        a.translate(Vector3::new(0.0, 1.0, 0.0));
        b.set_location(Point3::new(2.0, 0.0, 0.0));
        assert_eq!(*recorder.ids.borrow(), vec![7, 7]);
    }

    #[test]
    fn test_bind_replaces_instance_with_same_id() {
        let a = Vertex::new(1, 0.0, 0.0, 0.0);
        let b = Vertex::new(2, 1.0, 0.0, 0.0);
        let edge = Edge::new(1, &a, &b);
        let recorder = Rc::new(EdgeRecorder::default());
        watch(&edge, &recorder);

        let replacement = a.duplicate();
        assert!(edge.bind(&replacement));
        assert!(Rc::ptr_eq(&edge.start(), &replacement));
        assert_eq!(a.listener_count(), 0);

        // The stale instance no longer reaches the edge
        a.translate(Vector3::new(1.0, 0.0, 0.0));
        assert!(recorder.ids.borrow().is_empty());
        replacement.translate(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(*recorder.ids.borrow(), vec![1]);

        assert!(!edge.bind(&Vertex::new(9, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_dropping_edge_unsubscribes() {
        let a = Vertex::new(1, 0.0, 0.0, 0.0);
        let b = Vertex::new(2, 1.0, 0.0, 0.0);
        let edge = Edge::new(1, &a, &b);
        assert_eq!(a.listener_count(), 1);
        drop(edge);
        assert_eq!(a.listener_count(), 0);
    }

    #[test]
    fn test_duplicate_vertex_has_no_listeners() {
        let a = Vertex::new(4, 1.0, 2.0, 3.0);
        let b = Vertex::new(5, 0.0, 0.0, 0.0);
        let _edge = Edge::new(1, &a, &b);
        let copy = a.duplicate();
        assert_eq!(copy.id(), 4);
        assert_eq!(copy.location(), a.location());
        assert_eq!(copy.listener_count(), 0);
        assert!(!Rc::ptr_eq(&copy, &a));
    }
}
