use std::any::type_name;
use std::fmt;
use std::fmt::{Debug, Formatter};

/// The observer callbacks a pool fires as items change state.
///
/// Every hook is optional. Hooks are invoked synchronously, before the pool
/// operation that triggered them returns, so a collaborator can e.g. make an
/// item visible on acquisition and hide it again on release without ever
/// observing the pool in an intermediate state.
pub(crate) struct PoolHooks<T> {
    pub(crate) on_acquired: Option<Box<dyn FnMut(&T)>>,
    pub(crate) on_released: Option<Box<dyn FnMut(&T)>>,
    pub(crate) on_reclaimed: Option<Box<dyn FnMut(&T)>>,
}

impl<T> PoolHooks<T> {
    pub(crate) fn new() -> Self {
        Self {
            on_acquired: None,
            on_released: None,
            on_reclaimed: None,
        }
    }

    /// Fired with every item handed out by `acquire()`, whether it came from
    /// the idle reserve, was freshly created or was forcibly reused.
    pub(crate) fn acquired(&mut self, item: &T) {
        if let Some(hook) = self.on_acquired.as_mut() {
            hook(item);
        }
    }

    /// Fired with every item actually returned to the idle reserve.
    pub(crate) fn released(&mut self, item: &T) {
        if let Some(hook) = self.on_released.as_mut() {
            hook(item);
        }
    }

    /// Fired when an exhausted pool hands out an item that is still nominally
    /// in use, just before the matching `acquired` notification.
    pub(crate) fn reclaimed(&mut self, item: &T) {
        if let Some(hook) = self.on_reclaimed.as_mut() {
            hook(item);
        }
    }
}

impl<T> Debug for PoolHooks<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output is not part of the API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("on_acquired", &self.on_acquired.is_some())
            .field("on_released", &self.on_released.is_some())
            .field("on_reclaimed", &self.on_reclaimed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn unset_hooks_are_quiet() {
        let mut hooks = PoolHooks::<u32>::new();

        // Nothing to observe here beyond "does not panic".
        hooks.acquired(&1);
        hooks.released(&2);
        hooks.reclaimed(&3);
    }

    #[test]
    fn set_hooks_receive_the_item() {
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut hooks = PoolHooks::<u32>::new();
        hooks.on_acquired = Some(Box::new({
            let seen = Rc::clone(&seen);
            move |item| seen.borrow_mut().push(("acquired", *item))
        }));
        hooks.on_released = Some(Box::new({
            let seen = Rc::clone(&seen);
            move |item| seen.borrow_mut().push(("released", *item))
        }));
        hooks.on_reclaimed = Some(Box::new({
            let seen = Rc::clone(&seen);
            move |item| seen.borrow_mut().push(("reclaimed", *item))
        }));

        hooks.acquired(&10);
        hooks.reclaimed(&20);
        hooks.released(&10);

        assert_eq!(
            *seen.borrow(),
            vec![("acquired", 10), ("reclaimed", 20), ("released", 10)]
        );
    }

    #[test]
    fn debug_output_shows_which_hooks_are_set() {
        let mut hooks = PoolHooks::<u32>::new();
        hooks.on_acquired = Some(Box::new(|_| {}));

        let output = format!("{hooks:?}");

        assert!(output.contains("on_acquired: true"));
        assert!(output.contains("on_released: false"));
    }
}
