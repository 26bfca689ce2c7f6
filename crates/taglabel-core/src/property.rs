//! Change-detecting property cells.
//!
//! A [`Property<T>`] stores one configuration value and reports whether a
//! `set` actually changed it. Widgets use that answer to decide whether a
//! setter should mark cached output dirty or emit a change signal.
//!
//! ```
//! use taglabel_core::Property;
//!
//! let lines = Property::new(3usize);
//! assert!(!lines.set(3));
//! assert!(lines.set(2));
//! assert_eq!(lines.get(), 2);
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;

/// A value cell with change detection.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without comparing it to the current one.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// Equal values leave the property untouched and return `false`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            tracing::trace!(target: targets::PROPERTY, "property changed");
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_reports_change() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
        assert!(!prop.set(42));
        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_property_replace() {
        let prop = Property::new(String::from("More"));
        assert_eq!(prop.replace(String::from("More")), None);
        assert_eq!(prop.replace(String::from("Less")), Some(String::from("More")));
        assert_eq!(prop.with(|s| s.len()), 4);
    }

    #[test]
    fn test_property_set_silent_and_clone() {
        let prop = Property::new(vec![1, 2]);
        prop.set_silent(vec![3]);
        let copy = prop.clone();
        assert_eq!(copy.get(), vec![3]);
        assert!(!Property::<bool>::default().get());
    }
}
