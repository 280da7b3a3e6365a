/// Controllers bind a component to a view and relay its changes
///
/// Listeners on a controller see component changes as controller changes:
/// the controller drops its view's cached representation, bumps its
/// revision and re-broadcasts. Transform changes are broadcast the same way
/// without touching the revision, so a host can tell "rebuild" from "move".
use std::cell::{Cell, Ref};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::component::Component;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::notify::{Listener, Notifier, SubscriptionId};
use crate::representation::Representation;
use crate::transform::Transformation;
use crate::view::View;

pub struct Controller {
    component: Rc<Component>,
    view: View,
    notifier: Notifier<Controller>,
    subscription: Cell<Option<SubscriptionId>>,
    revision: Cell<u64>,
    disposed: AtomicBool,
}

impl Controller {
    /// Bind a component and a view, registering on the component
    ///
    /// Missing arguments are replaced by a default component or an empty
    /// view; construction never fails.
    pub fn new(component: Option<Rc<Component>>, view: Option<View>) -> Rc<Self> {
        let component = component.unwrap_or_else(|| Rc::new(Component::default()));
        let view = view.unwrap_or_else(View::empty);

        let controller = Rc::new_cyclic(|weak: &Weak<Controller>| {
            let listener: Weak<dyn Listener<Component>> = weak.clone();
            let subscription = component.subscribe(listener);
            Self {
                component,
                view,
                notifier: Notifier::new(),
                subscription: Cell::new(Some(subscription)),
                revision: Cell::new(0),
                disposed: AtomicBool::new(false),
            }
        });

        tracing::debug!(
            component = %controller.component,
            view = controller.view.name(),
            "controller created"
        );
        controller
    }

    pub fn component(&self) -> &Rc<Component> {
        &self.component
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn mesh(&self) -> Ref<'_, Mesh> {
        self.component.mesh()
    }

    /// Counts component changes seen so far
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn representation(&self) -> Result<Rc<Representation>> {
        self.view.representation(&self.component.mesh())
    }

    pub fn transform(&self) -> Transformation {
        self.view.transform()
    }

    pub fn previous_transform(&self) -> Option<Transformation> {
        self.view.previous_transform()
    }

    /// Move the view and tell controller listeners
    pub fn set_transform(&self, transform: Transformation) {
        self.view.set_transform(transform);
        self.notifier.notify(self);
    }

    /// Detach from the component and release the view. Only the first call
    /// does anything.
    pub fn dispose(&self) -> bool {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        if let Some(id) = self.subscription.take() {
            self.component.unsubscribe(id);
        }
        self.view.dispose();
        tracing::debug!(component = %self.component, "controller disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn subscribe(&self, listener: Weak<dyn Listener<Controller>>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn subscribe_rc<L>(&self, listener: &Rc<L>) -> SubscriptionId
    where
        L: Listener<Controller> + 'static,
    {
        self.notifier.subscribe_rc(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl Listener<Component> for Controller {
    fn update(&self, _component: &Component) {
        if self.is_disposed() {
            return;
        }
        self.view.invalidate();
        self.revision.set(self.revision.get() + 1);
        self.notifier.notify(self);
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.component.unsubscribe(id);
        }
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("component", &self.component)
            .field("view", &self.view)
            .field("revision", &self.revision.get())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
