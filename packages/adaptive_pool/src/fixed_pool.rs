use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::{EmptyPoolError, FixedPoolBuilder, PoolHooks};

/// An object pool with a fixed set of items, created up front.
///
/// The pool tracks two disjoint collections: idle items and items currently
/// in use. [`acquire()`][Self::acquire] serves the oldest idle item; when no
/// idle item exists, it forcibly reuses the item that has been in use the
/// longest. [`release()`][Self::release] returns an item to the idle reserve.
/// Items are never created after construction and never destroyed.
///
/// If the fixed capacity is too rigid for your workload, see
/// [`AdaptivePool`][crate::AdaptivePool], which creates additional items on
/// demand and trims its idle reserve back when demand subsides.
///
/// # Item identity
///
/// The pool stores one copy of every item and hands clones to callers, using
/// `==` to recognize items on release. Items must therefore be cheap to clone
/// and compare equal only to themselves - typically a handle type (an id, an
/// index, a newtype over `Rc` with identity equality). The factory receives a
/// zero-based index it can bake into each item for exactly this purpose.
///
/// # Forced reuse
///
/// When every item is in use, `acquire()` hands out the longest-held item
/// again without waiting for it to be released. The previous holder is not
/// informed and the pool does not know whether it is done with the item, so
/// under saturation two logical holders can alias the same item. This is the
/// deliberate trade-off that lets `acquire()` stay total on a fixed budget;
/// callers that cannot tolerate aliasing must release promptly or size the
/// pool for their peak demand. The optional `on_reclaimed` hook (see
/// [`FixedPoolBuilder::on_reclaimed`]) reports each occurrence.
///
/// # Example
///
/// ```
/// use adaptive_pool::FixedPool;
///
/// let mut pool = FixedPool::new(2, |index| format!("buffer-{index}"));
///
/// let first = pool.acquire().expect("pool was built with items");
/// let second = pool.acquire().expect("pool was built with items");
/// assert_eq!(first, "buffer-0");
/// assert_eq!(second, "buffer-1");
///
/// // Both items are now in use, so the next acquisition forcibly
/// // reuses the one acquired longest ago.
/// let third = pool.acquire().expect("pool was built with items");
/// assert_eq!(third, first);
///
/// pool.release(second);
/// assert_eq!(pool.available_len(), 1);
/// ```
pub struct FixedPool<T> {
    /// Idle items, oldest first. Front is the next item served.
    available: VecDeque<T>,

    /// Items handed out and not yet returned, in acquisition order. Front is
    /// the item that has been held the longest, which makes it the forced
    /// reuse candidate.
    in_use: VecDeque<T>,

    hooks: PoolHooks<T>,
}

impl<T> FixedPool<T> {
    pub(crate) fn new_inner(available: VecDeque<T>, hooks: PoolHooks<T>) -> Self {
        Self {
            available,
            in_use: VecDeque::new(),
            hooks,
        }
    }

    /// Creates a pool of `initial_count` items produced by `factory`.
    ///
    /// The factory is called once per item with the item's zero-based index
    /// and is not retained afterward - a [`FixedPool`] never creates further
    /// items. All items start idle.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::FixedPool;
    ///
    /// let pool = FixedPool::new(4, |index| index);
    ///
    /// assert_eq!(pool.len(), 4);
    /// assert_eq!(pool.available_len(), 4);
    /// ```
    #[must_use]
    pub fn new<F>(initial_count: usize, factory: F) -> Self
    where
        F: FnMut(usize) -> T + 'static,
    {
        Self::builder()
            .factory(factory)
            .initial_count(initial_count)
            .build()
    }

    /// Starts building a new [`FixedPool`].
    ///
    /// Use this to attach observer hooks; for a bare pool,
    /// [`new()`][Self::new] is shorter.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::FixedPool;
    ///
    /// let pool = FixedPool::builder()
    ///     .factory(|index| index)
    ///     .initial_count(2)
    ///     .on_acquired(|item| println!("handing out {item}"))
    ///     .build();
    ///
    /// assert_eq!(pool.len(), 2);
    /// ```
    pub fn builder() -> FixedPoolBuilder<T> {
        FixedPoolBuilder::new()
    }

    /// The number of idle items ready to be served.
    #[must_use]
    #[inline]
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// The number of items currently handed out.
    #[must_use]
    #[inline]
    pub fn in_use_len(&self) -> usize {
        self.in_use.len()
    }

    /// The total number of items owned by the pool, idle or in use.
    ///
    /// For a [`FixedPool`] this never changes after construction.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::FixedPool;
    ///
    /// let mut pool = FixedPool::new(3, |index| index);
    /// assert_eq!(pool.len(), 3);
    ///
    /// // Acquiring moves an item between the two collections
    /// // without changing the total.
    /// let item = pool.acquire().expect("pool was built with items");
    /// assert_eq!(pool.len(), 3);
    /// assert_eq!(pool.in_use_len(), 1);
    /// # pool.release(item);
    /// ```
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        // The two collections partition distinct items, so their combined
        // length cannot exceed the number of items ever created.
        self.available.len().saturating_add(self.in_use.len())
    }

    /// Whether the pool owns no items at all.
    ///
    /// An empty pool is the one state in which [`acquire()`][Self::acquire]
    /// fails.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.in_use.is_empty()
    }
}

impl<T> FixedPool<T>
where
    T: Clone + PartialEq,
{
    /// Hands out an item, preferring the oldest idle one.
    ///
    /// If no idle item exists, the item that has been in use the longest is
    /// handed out again - see the [forced reuse](Self#forced-reuse) notes.
    /// Fires the `on_acquired` hook (and `on_reclaimed` first, on forced
    /// reuse) before returning.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyPoolError`] if the pool was built with zero items;
    /// there is then nothing to serve and nothing to reuse.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::FixedPool;
    ///
    /// let mut pool = FixedPool::new(1, |index| format!("connection-{index}"));
    ///
    /// let connection = pool.acquire()?;
    /// assert_eq!(connection, "connection-0");
    /// assert_eq!(pool.in_use_len(), 1);
    /// # Ok::<(), adaptive_pool::EmptyPoolError>(())
    /// ```
    pub fn acquire(&mut self) -> Result<T, EmptyPoolError> {
        if let Some(item) = self.available.pop_front() {
            let handle = item.clone();
            self.in_use.push_back(item);
            self.hooks.acquired(&handle);
            return Ok(handle);
        }

        // Exhausted: rotate the longest-held item to the back of the in-use
        // queue and hand it out again.
        let item = self.in_use.pop_front().ok_or(EmptyPoolError)?;
        let handle = item.clone();
        self.in_use.push_back(item);

        self.hooks.reclaimed(&handle);
        self.hooks.acquired(&handle);
        Ok(handle)
    }

    /// Returns an item to the idle reserve.
    ///
    /// The item is matched against the in-use collection by `==`. On a match
    /// it moves to the back of the idle reserve and the `on_released` hook
    /// fires. An item the pool does not consider in use - already released
    /// by an aliasing holder, released twice, or never owned by this pool -
    /// is ignored entirely, keeping the idle and in-use collections disjoint.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::FixedPool;
    ///
    /// let mut pool = FixedPool::new(2, |index| index);
    ///
    /// let item = pool.acquire().expect("pool was built with items");
    /// pool.release(item);
    /// assert_eq!(pool.available_len(), 2);
    ///
    /// // Releasing something the pool never owned changes nothing.
    /// pool.release(99);
    /// assert_eq!(pool.available_len(), 2);
    /// ```
    pub fn release(&mut self, item: T) {
        let Some(index) = self.in_use.iter().position(|held| *held == item) else {
            return;
        };

        self.in_use.remove(index);
        self.hooks.released(&item);
        self.available.push_back(item);
    }
}

impl<T> Debug for FixedPool<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output is not part of the API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("available", &self.available.len())
            .field("in_use", &self.in_use.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}
