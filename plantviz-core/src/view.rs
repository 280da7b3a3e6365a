/// Views: transformation history plus a cached representation
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::convert::{Converter, NullConverter};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::notify::{Listener, Notifier, SubscriptionId};
use crate::representation::Representation;
use crate::transform::Transformation;

/// Derives a representation from a mesh and tracks where it is placed
///
/// The representation is computed on first request and kept until
/// [`invalidate`](View::invalidate) is called, which the owning controller
/// does whenever its component changes.
pub struct View {
    name: String,
    converter: Box<dyn Converter>,
    current: Cell<Option<Transformation>>,
    previous: Cell<Option<Transformation>>,
    representation: RefCell<Option<Rc<Representation>>>,
    notifier: Notifier<View>,
    disposed: AtomicBool,
}

impl View {
    pub fn new(name: impl Into<String>, converter: Box<dyn Converter>) -> Self {
        Self {
            name: name.into(),
            converter,
            current: Cell::new(None),
            previous: Cell::new(None),
            representation: RefCell::new(None),
            notifier: Notifier::new(),
            disposed: AtomicBool::new(false),
        }
    }

    /// Base view with nothing to show
    pub fn empty() -> Self {
        Self::new("Invalid View", Box::new(NullConverter))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn converter_name(&self) -> &'static str {
        self.converter.name()
    }

    /// Current placement; identity until one is assigned
    pub fn transform(&self) -> Transformation {
        self.current.get().unwrap_or_default()
    }

    /// The placement replaced by the latest assignment
    ///
    /// `None` until a second assignment archives the first one.
    pub fn previous_transform(&self) -> Option<Transformation> {
        self.previous.get()
    }

    pub fn set_transform(&self, transform: Transformation) {
        self.previous.set(self.current.replace(Some(transform)));
        self.notifier.notify(self);
    }

    /// Representation of `mesh`, built through the converter if not cached
    pub fn representation(&self, mesh: &Mesh) -> Result<Rc<Representation>> {
        if self.is_disposed() {
            return Ok(Rc::new(Representation::Empty));
        }
        if let Some(cached) = self.representation.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let representation = Rc::new(self.converter.convert(mesh)?);
        tracing::debug!(view = %self.name, converter = self.converter.name(), "built representation");
        *self.representation.borrow_mut() = Some(representation.clone());
        Ok(representation)
    }

    /// Drop the cached representation so the next request rebuilds it
    pub fn invalidate(&self) {
        self.representation.borrow_mut().take();
    }

    pub fn is_cached(&self) -> bool {
        self.representation.borrow().is_some()
    }

    /// Release the cached representation. Only the first call does anything.
    pub fn dispose(&self) -> bool {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        self.invalidate();
        tracing::debug!(view = %self.name, "view disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn subscribe(&self, listener: Weak<dyn Listener<View>>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl Default for View {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("converter", &self.converter.name())
            .field("transform", &self.current.get())
            .field("previous", &self.previous.get())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::SolidConverter;
    use nalgebra::Point3;

    fn triangle() -> Mesh {
        Mesh::geometry(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_transform_history() {
        let view = View::empty();
        assert_eq!(view.transform(), Transformation::identity());
        assert_eq!(view.previous_transform(), None);

        let first = Transformation::from_translation(150.0, 0.0, 0.0);
        view.set_transform(first);
        assert_eq!(view.transform(), first);
        assert_eq!(view.previous_transform(), None);

        let second = first.shifted(5.0, 0.0, 0.0);
        view.set_transform(second);
        assert_eq!(view.transform(), second);
        assert_eq!(view.previous_transform(), Some(first));

        let third = second.shifted(0.0, 0.0, -5.0);
        view.set_transform(third);
        assert_eq!(view.previous_transform(), Some(second));
    }

    #[test]
    fn test_set_transform_notifies() {
        struct Counter(Cell<usize>);
        impl Listener<View> for Counter {
            fn update(&self, view: &View) {
                assert_eq!(view.name(), "Invalid View");
                self.0.set(self.0.get() + 1);
            }
        }

        let view = View::empty();
        let counter = Rc::new(Counter(Cell::new(0)));
        let weak: Weak<Counter> = Rc::downgrade(&counter);
        let weak: Weak<dyn Listener<View>> = weak;
        view.subscribe(weak);

        view.set_transform(Transformation::identity());
        view.set_transform(Transformation::identity());
        assert_eq!(counter.0.get(), 2);
    }

    #[test]
    fn test_base_view_is_empty() {
        let view = View::empty();
        assert_eq!(view.converter_name(), "null");
        assert_eq!(*view.representation(&triangle()).unwrap(), Representation::Empty);
    }

    #[test]
    fn test_representation_is_cached_until_invalidated() {
        let view = View::new("solid", Box::new(SolidConverter));
        let first = view.representation(&triangle()).unwrap();
        let again = view.representation(&Mesh::default()).unwrap();
        assert!(Rc::ptr_eq(&first, &again));

        view.invalidate();
        assert!(!view.is_cached());
        let rebuilt = view.representation(&Mesh::default()).unwrap();
        assert!(rebuilt.is_empty());
    }

    #[test]
    fn test_failed_conversion_is_not_cached() {
        let view = View::new("solid", Box::new(SolidConverter));
        let bad = Mesh::geometry(vec![Point3::origin()], vec![vec![0, 1, 2]]);
        assert!(view.representation(&bad).is_err());
        assert!(!view.is_cached());
    }

    #[test]
    fn test_dispose_once() {
        let view = View::new("solid", Box::new(SolidConverter));
        view.representation(&triangle()).unwrap();

        assert!(view.dispose());
        assert!(!view.dispose());
        assert!(view.is_disposed());
        assert!(!view.is_cached());
        assert_eq!(*view.representation(&triangle()).unwrap(), Representation::Empty);
    }
}
