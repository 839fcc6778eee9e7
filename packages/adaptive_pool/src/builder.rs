use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::{AdaptivePool, FixedPool, PoolHooks};

const DEFAULT_MAX_COUNT: usize = 256;
const DEFAULT_REVIEW_PERIOD: Duration = Duration::from_secs(5);
const DEFAULT_MARGIN: f64 = 1.2;

/// Builder for creating an instance of [`FixedPool`].
///
/// The factory is mandatory; everything else is optional. The initial item
/// count defaults to zero, which builds a pool whose `acquire()` always
/// fails - almost certainly you want [`initial_count`][Self::initial_count].
///
/// # Examples
///
/// ```
/// use adaptive_pool::FixedPool;
///
/// let pool = FixedPool::builder()
///     .factory(|index| format!("buffer-{index}"))
///     .initial_count(8)
///     .build();
///
/// assert_eq!(pool.available_len(), 8);
/// ```
///
/// Attaching observer hooks:
///
/// ```
/// use adaptive_pool::FixedPool;
///
/// let pool = FixedPool::builder()
///     .factory(|index| index)
///     .initial_count(2)
///     .on_acquired(|item| println!("{item} is now visible"))
///     .on_released(|item| println!("{item} is now hidden"))
///     .build();
/// # assert_eq!(pool.len(), 2);
/// ```
#[must_use]
pub struct FixedPoolBuilder<T> {
    initial_count: usize,
    factory: Option<Box<dyn FnMut(usize) -> T>>,
    hooks: PoolHooks<T>,
}

impl<T> FixedPoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            initial_count: 0,
            factory: None,
            hooks: PoolHooks::new(),
        }
    }

    /// Sets the factory that produces the pool's items.
    ///
    /// [`build()`][Self::build] calls it once per initial item with the
    /// item's zero-based index; a [`FixedPool`] does not retain it.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut(usize) -> T + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets how many items to create up front. This is the pool's capacity
    /// forever; a [`FixedPool`] neither grows nor shrinks.
    pub fn initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    /// Sets a hook fired with every item handed out by `acquire()`, before
    /// the call returns.
    ///
    /// Intended for a collaborator that makes items visible or otherwise
    /// activates them while they are in use.
    pub fn on_acquired<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_acquired = Some(Box::new(hook));
        self
    }

    /// Sets a hook fired with every item returned to the idle reserve,
    /// before `release()` returns.
    ///
    /// Intended for a collaborator that hides or deactivates idle items.
    pub fn on_released<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_released = Some(Box::new(hook));
        self
    }

    /// Sets a hook fired whenever an exhausted pool forcibly reuses an item
    /// that is still in use, just before the matching `on_acquired`.
    ///
    /// This is an observability signal; the reuse happens regardless.
    pub fn on_reclaimed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_reclaimed = Some(Box::new(hook));
        self
    }

    /// Builds the pool, eagerly creating the initial items.
    ///
    /// # Panics
    ///
    /// Panics if no factory has been set with [`factory()`][Self::factory].
    #[must_use]
    pub fn build(self) -> FixedPool<T> {
        let mut factory = self
            .factory
            .expect("a factory must be set with .factory() before calling .build()");

        let mut available = VecDeque::with_capacity(self.initial_count);
        for index in 0..self.initial_count {
            available.push_back(factory(index));
        }

        FixedPool::new_inner(available, self.hooks)
    }
}

impl<T> Debug for FixedPoolBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output is not part of the API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("initial_count", &self.initial_count)
            .field("factory", &self.factory.is_some())
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Builder for creating an instance of [`AdaptivePool`].
///
/// The factory is mandatory; the tuning parameters have the defaults noted
/// on their setters and the observer hooks default to unset.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use adaptive_pool::AdaptivePool;
///
/// let pool = AdaptivePool::builder()
///     .factory(|index| index)
///     .initial_count(4)
///     .max_count(64)
///     .review_period(Duration::from_secs(2))
///     .margin(1.5)
///     .build();
///
/// assert_eq!(pool.available_len(), 4);
/// assert_eq!(pool.max_count(), 64);
/// ```
#[must_use]
pub struct AdaptivePoolBuilder<T> {
    initial_count: usize,
    factory: Option<Box<dyn FnMut(usize) -> T>>,
    hooks: PoolHooks<T>,
    max_count: usize,
    review_period: Duration,
    margin: f64,
}

impl<T> AdaptivePoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            initial_count: 0,
            factory: None,
            hooks: PoolHooks::new(),
            max_count: DEFAULT_MAX_COUNT,
            review_period: DEFAULT_REVIEW_PERIOD,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Sets the factory that produces the pool's items.
    ///
    /// It is called once per initial item at build time with the item's
    /// zero-based index, then retained and called on each growth with the
    /// in-use count at that moment.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut(usize) -> T + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets how many items to create up front. Defaults to zero.
    ///
    /// This is also the floor for shrinking: reviews never cut the idle
    /// reserve below this count.
    pub fn initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    /// Sets the ceiling on the total number of items held at once.
    /// Defaults to 256.
    ///
    /// Once `in_use` reaches this ceiling, `acquire()` switches from
    /// creating items to forced reuse.
    pub fn max_count(mut self, count: usize) -> Self {
        self.max_count = count;
        self
    }

    /// Sets the time between size reviews. Defaults to 5 seconds.
    ///
    /// Reviews only happen inside [`tick()`][AdaptivePool::tick], so the
    /// effective cadence is also bounded by how often the host calls it.
    pub fn review_period(mut self, period: Duration) -> Self {
        self.review_period = period;
        self
    }

    /// Sets the reserve-to-peak-demand ratio. Defaults to 1.2.
    ///
    /// A review keeps `margin ×` the recently observed peak demand idle,
    /// so values above 1.0 leave headroom for demand spikes between
    /// reviews.
    ///
    /// # Panics
    ///
    /// Panics if `margin` is less than 1.0; a pool that keeps less than its
    /// observed demand idle would thrash between shrinking and regrowing.
    pub fn margin(mut self, margin: f64) -> Self {
        assert!(margin >= 1.0, "margin must be at least 1.0");
        self.margin = margin;
        self
    }

    /// Sets a hook fired with every item handed out by `acquire()`, before
    /// the call returns.
    pub fn on_acquired<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_acquired = Some(Box::new(hook));
        self
    }

    /// Sets a hook fired with every item returned to the idle reserve,
    /// before `release()` returns.
    pub fn on_released<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_released = Some(Box::new(hook));
        self
    }

    /// Sets a hook fired whenever the pool, at its `max_count` ceiling,
    /// forcibly reuses an item that is still in use, just before the
    /// matching `on_acquired`.
    pub fn on_reclaimed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.hooks.on_reclaimed = Some(Box::new(hook));
        self
    }

    /// Builds the pool, eagerly creating the initial items.
    ///
    /// # Panics
    ///
    /// Panics if no factory has been set with [`factory()`][Self::factory].
    #[must_use]
    pub fn build(self) -> AdaptivePool<T> {
        let mut factory = self
            .factory
            .expect("a factory must be set with .factory() before calling .build()");

        let mut available = VecDeque::with_capacity(self.initial_count);
        for index in 0..self.initial_count {
            available.push_back(factory(index));
        }

        AdaptivePool::new_inner(
            available,
            factory,
            self.hooks,
            self.initial_count,
            self.max_count,
            self.review_period,
            self.margin,
        )
    }
}

impl<T> Debug for AdaptivePoolBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output is not part of the API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("initial_count", &self.initial_count)
            .field("factory", &self.factory.is_some())
            .field("hooks", &self.hooks)
            .field("max_count", &self.max_count)
            .field("review_period", &self.review_period)
            .field("margin", &self.margin)
            .finish()
    }
}
