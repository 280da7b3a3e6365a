/// Validated vertex/edge cycles
///
/// A [`Polygon`] is an ordered list of vertices and a parallel list of edges
/// where `edges[i]` joins `vertices[i]` and `vertices[(i + 1) % n]`. This only
/// checks that the outer edges form a cycle; it says nothing about whether the
/// polygon is simple or planar.
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use nalgebra::Point3;

use crate::error::ValidationError;
use crate::geometry::{Edge, Vertex};

pub struct Polygon {
    vertices: Vec<Rc<Vertex>>,
    edges: Vec<Rc<Edge>>,
}

impl Polygon {
    /// Validate the cycle and take ownership of the handles
    ///
    /// Nothing is touched until every rule passed, so a rejected input leaves
    /// its edges and vertices exactly as they were.
    pub fn new(edges: Vec<Rc<Edge>>, vertices: Vec<Rc<Vertex>>) -> Result<Self, ValidationError> {
        validate(&edges, &vertices)?;

        let size = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            edge.bind(&vertices[i]);
            edge.bind(&vertices[(i + 1) % size]);
        }

        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Rc<Vertex>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Rc<Edge>] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_ids(&self) -> Vec<i32> {
        self.vertices.iter().map(|v| v.id()).collect()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            vertices: self
                .vertices
                .iter()
                .map(|v| (v.id(), v.location()))
                .collect(),
            edges: self.edges.iter().map(|e| (e.id(), e.vertex_ids())).collect(),
        }
    }
}

/// Raw values of a polygon with every relationship reduced to ids
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    vertices: Vec<(i32, Point3<f32>)>,
    edges: Vec<(i32, [i32; 2])>,
}

impl Snapshot {
    /// Build fresh instances from the copied values
    fn rebuild(&self) -> Polygon {
        let vertices: Vec<Rc<Vertex>> = self
            .vertices
            .iter()
            .map(|&(id, location)| Vertex::at(id, location))
            .collect();
        let index_of: HashMap<i32, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id(), i))
            .collect();

        // Ids come from a validated polygon, so every lookup resolves
        let edges = self
            .edges
            .iter()
            .map(|&(id, [start, end])| {
                Edge::new(id, &vertices[index_of[&start]], &vertices[index_of[&end]])
            })
            .collect();

        Polygon { vertices, edges }
    }
}

impl Clone for Polygon {
    /// Deep copy: fresh vertices and edges wired only to each other
    fn clone(&self) -> Self {
        self.snapshot().rebuild()
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polygon")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}

fn validate(edges: &[Rc<Edge>], vertices: &[Rc<Vertex>]) -> Result<(), ValidationError> {
    if vertices.len() < 3 {
        return Err(ValidationError::TooFewVertices(vertices.len()));
    }
    if edges.len() < 3 {
        return Err(ValidationError::TooFewEdges(edges.len()));
    }
    if edges.len() != vertices.len() {
        return Err(ValidationError::LengthMismatch {
            edges: edges.len(),
            vertices: vertices.len(),
        });
    }

    let size = vertices.len();
    let mut vertex_ids = BTreeSet::new();
    let mut edge_ids = BTreeSet::new();
    let mut shared_vertex = None;
    let mut duplicate_edge = None;

    for i in 0..size {
        let next = (i + 1) % size;
        let v1 = vertices[i].id();
        let v2 = vertices[next].id();

        if v1 == v2 {
            return Err(ValidationError::SameAdjacentId { index: i, next, id: v1 });
        }
        if !edges[i].connects(v1, v2) {
            return Err(ValidationError::UnknownVertex {
                index: i,
                expected: [v1, v2],
                found: edges[i].vertex_ids(),
            });
        }

        if !vertex_ids.insert(v1) && shared_vertex.is_none() {
            shared_vertex = Some(v1);
        }
        if !edge_ids.insert(edges[i].id()) && duplicate_edge.is_none() {
            duplicate_edge = Some(edges[i].id());
        }
    }

    if let Some(id) = shared_vertex {
        return Err(ValidationError::SharedVertex(id));
    }
    if let Some(id) = duplicate_edge {
        return Err(ValidationError::DuplicateEdgeId(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::{watch, EdgeRecorder};
    use nalgebra::Vector3;

    fn square() -> (Vec<Rc<Edge>>, Vec<Rc<Vertex>>) {
        let vertices = vec![
            Vertex::new(1, 0.0, 0.0, 0.0),
            Vertex::new(2, 1.0, 0.0, 0.0),
            Vertex::new(3, 1.0, 1.0, 0.0),
            Vertex::new(4, 0.0, 1.0, 0.0),
        ];
        let edges = (0..4)
            .map(|i| Edge::new(10 + i as i32, &vertices[i], &vertices[(i + 1) % 4]))
            .collect();
        (edges, vertices)
    }

    #[test]
    fn test_valid_polygon_preserves_order() {
        let (edges, vertices) = square();
        let polygon = Polygon::new(edges.clone(), vertices.clone()).unwrap();

        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.vertex_ids(), vec![1, 2, 3, 4]);
        for (i, edge) in polygon.edges().iter().enumerate() {
            assert!(Rc::ptr_eq(edge, &edges[i]));
            assert!(Rc::ptr_eq(&polygon.vertices()[i], &vertices[i]));
        }
    }

    #[test]
    fn test_reversed_edge_is_accepted() {
        let (mut edges, vertices) = square();
        edges[1] = Edge::new(11, &vertices[2], &vertices[1]);
        assert!(Polygon::new(edges, vertices).is_ok());
    }

    #[test]
    fn test_edges_bound_to_polygon_vertices() {
        let (_, vertices) = square();
        // Edge built against look-alike vertices with matching ids
        let stray: Vec<Rc<Vertex>> = vertices.iter().map(|v| v.duplicate()).collect();
        let edges: Vec<Rc<Edge>> = (0..4)
            .map(|i| Edge::new(10 + i as i32, &stray[i], &stray[(i + 1) % 4]))
            .collect();

        let polygon = Polygon::new(edges, vertices.clone()).unwrap();
        for (i, edge) in polygon.edges().iter().enumerate() {
            assert!(Rc::ptr_eq(&edge.start(), &vertices[i]));
            assert!(Rc::ptr_eq(&edge.end(), &vertices[(i + 1) % 4]));
        }
        assert!(stray.iter().all(|v| v.listener_count() == 0));
    }

    #[test]
    fn test_too_few_elements() {
        let (edges, vertices) = square();
        assert_eq!(
            Polygon::new(edges.clone(), vertices[..2].to_vec()).unwrap_err(),
            ValidationError::TooFewVertices(2)
        );
        assert_eq!(
            Polygon::new(edges[..2].to_vec(), vertices).unwrap_err(),
            ValidationError::TooFewEdges(2)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let (edges, mut vertices) = square();
        vertices.push(Vertex::new(5, 2.0, 2.0, 0.0));
        assert!(matches!(
            Polygon::new(edges, vertices),
            Err(ValidationError::LengthMismatch { edges: 4, vertices: 5 })
        ));
    }

    #[test]
    fn test_same_adjacent_id() {
        let a = Vertex::new(1, 0.0, 0.0, 0.0);
        let b = Vertex::new(1, 1.0, 0.0, 0.0);
        let c = Vertex::new(3, 0.0, 1.0, 0.0);
        let edges = vec![Edge::new(1, &a, &b), Edge::new(2, &b, &c), Edge::new(3, &c, &a)];
        assert!(matches!(
            Polygon::new(edges, vec![a, b, c]),
            Err(ValidationError::SameAdjacentId { index: 0, id: 1, .. })
        ));
    }

    #[test]
    fn test_edge_with_non_adjacent_vertex() {
        let (mut edges, vertices) = square();
        // 1 -> 3 skips vertex 2
        edges[0] = Edge::new(10, &vertices[0], &vertices[2]);
        assert!(matches!(
            Polygon::new(edges, vertices),
            Err(ValidationError::UnknownVertex { index: 0, expected: [1, 2], found: [1, 3] })
        ));
    }

    #[test]
    fn test_duplicate_vertex_id() {
        // 1, 2, 1, 3: adjacent ids differ but vertex 1 appears twice
        let vertices = vec![
            Vertex::new(1, 0.0, 0.0, 0.0),
            Vertex::new(2, 1.0, 0.0, 0.0),
            Vertex::new(1, 1.0, 1.0, 0.0),
            Vertex::new(3, 0.0, 1.0, 0.0),
        ];
        let edges = (0..4)
            .map(|i| Edge::new(i as i32, &vertices[i], &vertices[(i + 1) % 4]))
            .collect();
        assert_eq!(
            Polygon::new(edges, vertices).unwrap_err(),
            ValidationError::SharedVertex(1)
        );
    }

    #[test]
    fn test_duplicate_edge_id() {
        let (mut edges, vertices) = square();
        edges[3] = Edge::new(10, &vertices[3], &vertices[0]);
        assert_eq!(
            Polygon::new(edges, vertices).unwrap_err(),
            ValidationError::DuplicateEdgeId(10)
        );
    }

    #[test]
    fn test_rejected_input_is_untouched() {
        let (_, vertices) = square();
        let stray: Vec<Rc<Vertex>> = vertices.iter().map(|v| v.duplicate()).collect();
        let mut edges: Vec<Rc<Edge>> = (0..4)
            .map(|i| Edge::new(10 + i as i32, &stray[i], &stray[(i + 1) % 4]))
            .collect();
        edges[3] = Edge::new(10, &stray[3], &stray[0]);

        assert!(Polygon::new(edges.clone(), vertices.clone()).is_err());
        // No edge was re-pointed at the candidate vertices
        assert!(vertices.iter().all(|v| v.listener_count() == 0));
        assert!(Rc::ptr_eq(&edges[0].start(), &stray[0]));
    }

    #[test]
    fn test_clone_is_deep_and_rewired() {
        let (edges, vertices) = square();
        let original = Polygon::new(edges, vertices).unwrap();
        let copy = original.clone();
        assert_eq!(copy, original);

        let recorder = Rc::new(EdgeRecorder::default());
        for edge in original.edges() {
            watch(edge, &recorder);
        }
        let copy_recorder = Rc::new(EdgeRecorder::default());
        for edge in copy.edges() {
            watch(edge, &copy_recorder);
        }

        for (a, b) in original.vertices().iter().zip(copy.vertices()) {
            assert!(!Rc::ptr_eq(a, b));
        }

        copy.vertices()[0].translate(Vector3::new(0.0, 0.0, 1.0));
        assert!(recorder.ids.borrow().is_empty());
        // Vertex 1 sits between the last edge and the first one
        assert_eq!(*copy_recorder.ids.borrow(), vec![10, 13]);
        assert_ne!(copy, original);
    }
}
