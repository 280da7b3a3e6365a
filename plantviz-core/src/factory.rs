/// Factories pairing components with a matching view and controller
use std::rc::Rc;

use crate::component::{Component, ComponentKind};
use crate::config::ViewerSettings;
use crate::controller::Controller;
use crate::convert::{SolidConverter, WireframeConverter};
use crate::view::View;

/// Build a controller (and its view) for a component
///
/// `None` means the factory has no view for that kind of component. There is
/// no fallback.
pub trait ViewControllerFactory {
    fn create_view_controller(&self, component: &Rc<Component>) -> Option<Rc<Controller>>;
}

/// Solid faces; only face-based components qualify
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidViewFactory;

impl ViewControllerFactory for SolidViewFactory {
    fn create_view_controller(&self, component: &Rc<Component>) -> Option<Rc<Controller>> {
        match component.kind() {
            ComponentKind::Plant => {
                let view = View::new("Solid View", Box::new(SolidConverter));
                Some(Controller::new(Some(component.clone()), Some(view)))
            }
            ComponentKind::VolumetricPlant => {
                tracing::debug!(component = %component, "no solid view for volumetric component");
                None
            }
        }
    }
}

/// Cylinder wireframes; faces and bare edges both work
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumetricViewFactory {
    pub settings: ViewerSettings,
}

impl VolumetricViewFactory {
    pub fn new(settings: ViewerSettings) -> Self {
        Self { settings }
    }
}

impl ViewControllerFactory for VolumetricViewFactory {
    fn create_view_controller(&self, component: &Rc<Component>) -> Option<Rc<Controller>> {
        match component.kind() {
            ComponentKind::Plant | ComponentKind::VolumetricPlant => {
                let view = View::new(
                    "Volumetric View",
                    Box::new(WireframeConverter::new(self.settings)),
                );
                Some(Controller::new(Some(component.clone()), Some(view)))
            }
        }
    }
}
