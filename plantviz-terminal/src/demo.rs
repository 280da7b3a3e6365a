/// The tutorial scene: a pyramid shown solid and as a wireframe, plus a sphere
use plantviz_core::{
    Component, Controller, Edge, Polygon, SolidViewFactory, Transformation, Vertex,
    ViewControllerFactory, ViewerSettings, VolumetricViewFactory,
};
use std::io;
use std::rc::Rc;

use crate::scene::Scene;

/// How far the wireframe and the sphere sit from the solid pyramid
pub const SIDE_OFFSET: f32 = 150.0;
pub const SPHERE_RADIUS: f64 = 25.0;

pub struct Demo {
    pub scene: Rc<Scene>,
    pub solid: Rc<Controller>,
    /// The controller W/A/S/D moves
    pub wireframe: Rc<Controller>,
    pub sphere: Rc<Controller>,
}

impl Demo {
    pub fn new(viewer: ViewerSettings) -> io::Result<Self> {
        let pyramid = Rc::new(
            pyramid()
                .map_err(crate::core_error)?
                .with_name("Pyramid")
                .with_description("Square-based pyramid built from five polygons"),
        );
        let sphere = Rc::new(
            Component::from_properties("sphere", [("radius", SPHERE_RADIUS)])
                .with_id(2)
                .with_name("Sphere")
                .with_description("Property-described sphere"),
        );

        let solid = controller_for(&SolidViewFactory, &pyramid)?;
        let wireframe = controller_for(&VolumetricViewFactory::new(viewer), &pyramid)?;
        let sphere = controller_for(&SolidViewFactory, &sphere)?;

        wireframe.set_transform(Transformation::from_translation(SIDE_OFFSET, 0.0, 0.0));
        sphere.set_transform(Transformation::from_translation(-SIDE_OFFSET, 0.0, 0.0));

        let scene = Scene::new();
        for controller in [&solid, &wireframe, &sphere] {
            scene.add(controller.clone());
        }
        tracing::info!(objects = scene.len(), "demo scene ready");

        Ok(Self {
            scene,
            solid,
            wireframe,
            sphere,
        })
    }

    /// Shift the wireframe by `(dx, 0, dz)`
    pub fn nudge_wireframe(&self, dx: f32, dz: f32) {
        let moved = self.wireframe.transform().shifted(dx, 0.0, dz);
        tracing::debug!(x = moved.translation().x, z = moved.translation().z, "wireframe moved");
        self.wireframe.set_transform(moved);
    }
}

fn controller_for(
    factory: &dyn ViewControllerFactory,
    component: &Rc<Component>,
) -> io::Result<Rc<Controller>> {
    factory.create_view_controller(component).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no view for component '{component}'"),
        )
    })
}

/// The five-vertex pyramid: four triangular sides around the apex and a
/// square base
pub fn pyramid() -> plantviz_core::Result<Component> {
    let v1 = Vertex::new(1, 50.0, 0.0, -50.0);
    let v2 = Vertex::new(2, 0.0, 100.0, 0.0);
    let v3 = Vertex::new(3, 50.0, 0.0, 50.0);
    let v4 = Vertex::new(4, -50.0, 0.0, -50.0);
    let v5 = Vertex::new(5, -50.0, 0.0, 50.0);

    let e1 = Edge::new(1, &v1, &v2);
    let e2 = Edge::new(2, &v2, &v3);
    let e3 = Edge::new(3, &v3, &v1);
    let e4 = Edge::new(4, &v2, &v4);
    let e5 = Edge::new(5, &v4, &v1);
    let e6 = Edge::new(6, &v2, &v5);
    let e7 = Edge::new(7, &v5, &v4);
    let e8 = Edge::new(8, &v5, &v3);

    let faces = vec![
        Polygon::new(
            vec![e1.clone(), e2.clone(), e3.clone()],
            vec![v1.clone(), v2.clone(), v3.clone()],
        )?,
        Polygon::new(
            vec![e4.clone(), e1, e5.clone()],
            vec![v4.clone(), v2.clone(), v1.clone()],
        )?,
        Polygon::new(
            vec![e6.clone(), e4, e7.clone()],
            vec![v5.clone(), v2.clone(), v4.clone()],
        )?,
        Polygon::new(
            vec![e2, e6, e8.clone()],
            vec![v3.clone(), v2.clone(), v5.clone()],
        )?,
        Polygon::new(
            vec![e3, e8, e7, e5],
            vec![v1.clone(), v3.clone(), v5.clone(), v4.clone()],
        )?,
    ];

    Ok(Component::from_polygons(&[v1, v2, v3, v4, v5], &faces))
}
