/// Plantviz Core Library - reactor plant geometry and its views
///
/// Validated vertex/edge/polygon geometry, component meshes, and the
/// view/controller layer that turns a mesh into something a host can draw
/// (solid triangles, cylinder wireframes or built-in primitives). Change
/// notification runs model to controller to host.

pub mod component;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod mesh;
pub mod notify;
pub mod polygon;
pub mod primitive;
pub mod representation;
pub mod transform;
pub mod triangulate;
pub mod view;
pub mod wireframe;

// Re-export commonly used types
pub use component::{Component, ComponentKind};
pub use config::ViewerSettings;
pub use controller::Controller;
pub use convert::{Converter, NullConverter, SolidConverter, WireframeConverter};
pub use error::{Error, Result, ValidationError};
pub use factory::{SolidViewFactory, ViewControllerFactory, VolumetricViewFactory};
pub use geometry::{Edge, Vertex};
pub use mesh::Mesh;
pub use notify::{Listener, Notifier, SubscriptionId};
pub use polygon::Polygon;
pub use representation::{EdgeCylinder, EdgeRotation, Primitive, Representation, TriangleMesh};
pub use transform::Transformation;
pub use view::View;
