use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::{AdaptivePoolBuilder, EmptyPoolError, PoolHooks};

/// An object pool that grows under load and trims its idle reserve back when
/// demand subsides.
///
/// Like [`FixedPool`][crate::FixedPool], the pool tracks idle and in-use
/// items as two disjoint FIFO collections. Unlike it, an exhausted
/// [`AdaptivePool`] first tries to create a new item through its factory, up
/// to a configurable ceiling (`max_count`, default 256); only at the ceiling
/// does it fall back to forced reuse of the longest-held item.
///
/// Shrinking is driven by the host's update loop: call
/// [`tick(now)`][Self::tick] periodically with the current time. The pool
/// records the peak in-use count it observes between reviews, and at each
/// review (every `review_period`, default 5 seconds) destroys idle items
/// beyond `margin ×` that peak (default margin 1.2), never going below the
/// initial provisioning. Growth is never performed during a review; it
/// happens reactively inside [`acquire()`][Self::acquire].
///
/// # Item identity
///
/// As with [`FixedPool`][crate::FixedPool], items are recognized by `==` and
/// must compare equal only to themselves. The factory receives the in-use
/// count at the moment of creation. That value is a useful size signal but is
/// *not* unique over the pool's lifetime once items have been released or
/// destroyed; a factory that needs a unique identity per item should keep its
/// own counter:
///
/// ```
/// use adaptive_pool::AdaptivePool;
///
/// let mut next_id = 0_u64;
/// let pool = AdaptivePool::new(4, move |_| {
///     next_id += 1;
///     next_id
/// });
/// # assert_eq!(pool.len(), 4);
/// ```
///
/// # Time
///
/// The pool never reads a clock. `tick(now)` takes a [`Duration`] measured
/// from any fixed epoch the caller chooses (application start, pool
/// construction); the only requirement is that successive values never
/// decrease. The first review becomes due one `review_period` after
/// construction.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use adaptive_pool::AdaptivePool;
///
/// let mut pool = AdaptivePool::builder()
///     .factory(|index| format!("particle-{index}"))
///     .initial_count(2)
///     .build();
///
/// // A burst of demand grows the pool past its initial size.
/// let burst: Vec<_> = (0..5)
///     .map(|_| pool.acquire().expect("below max_count, growth cannot fail"))
///     .collect();
/// assert_eq!(pool.len(), 5);
///
/// // The host update loop samples usage while the burst is live...
/// pool.tick(Duration::from_millis(100));
///
/// for item in burst {
///     pool.release(item);
/// }
///
/// // ...so the review at t=5.1s keeps a reserve sized to that peak...
/// pool.tick(Duration::from_millis(5_100));
/// assert_eq!(pool.available_len(), 5);
///
/// // ...and once demand stays away, a later review trims the reserve
/// // down to the initial provisioning.
/// pool.tick(Duration::from_millis(10_200));
/// assert_eq!(pool.available_len(), 2);
/// ```
pub struct AdaptivePool<T> {
    /// Idle items, oldest first. Front is the next item served and also the
    /// first to be destroyed when the reserve shrinks.
    available: VecDeque<T>,

    /// Items handed out and not yet returned, in acquisition order. Front is
    /// the forced reuse candidate once `max_count` is reached.
    in_use: VecDeque<T>,

    factory: Box<dyn FnMut(usize) -> T>,
    hooks: PoolHooks<T>,

    /// Size of the initial provisioning. Reviews never shrink the idle
    /// reserve below this.
    initial_count: usize,

    /// Ceiling on the total number of items this pool will ever hold at
    /// once.
    max_count: usize,

    review_period: Duration,

    /// Reserve-to-peak-demand ratio, at least 1.0.
    margin: f64,

    /// Highest in-use count sampled by `tick()` since the last review.
    peak_in_use: usize,

    next_review_at: Duration,
}

impl<T> AdaptivePool<T> {
    pub(crate) fn new_inner(
        available: VecDeque<T>,
        factory: Box<dyn FnMut(usize) -> T>,
        hooks: PoolHooks<T>,
        initial_count: usize,
        max_count: usize,
        review_period: Duration,
        margin: f64,
    ) -> Self {
        Self {
            available,
            in_use: VecDeque::new(),
            factory,
            hooks,
            initial_count,
            max_count,
            review_period,
            margin,
            peak_in_use: 0,
            next_review_at: review_period,
        }
    }

    /// Creates a pool with `initial_count` eagerly created items and default
    /// tuning (`max_count` 256, `review_period` 5 s, `margin` 1.2).
    ///
    /// The factory is retained for on-demand growth. It is called once per
    /// initial item with the item's zero-based index, and on each growth
    /// with the in-use count at that moment.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::AdaptivePool;
    ///
    /// let pool = AdaptivePool::new(8, |index| index);
    ///
    /// assert_eq!(pool.available_len(), 8);
    /// assert_eq!(pool.max_count(), 256);
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

    /// Starts building a new [`AdaptivePool`].
    ///
    /// Use this to adjust the tuning parameters or attach observer hooks.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use adaptive_pool::AdaptivePool;
    ///
    /// let pool = AdaptivePool::builder()
    ///     .factory(|index| index)
    ///     .initial_count(16)
    ///     .max_count(1024)
    ///     .review_period(Duration::from_secs(1))
    ///     .margin(1.5)
    ///     .build();
    ///
    /// assert_eq!(pool.max_count(), 1024);
    /// ```
    pub fn builder() -> AdaptivePoolBuilder<T> {
        AdaptivePoolBuilder::new()
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
    /// Grows as `acquire()` creates items and shrinks as reviews destroy
    /// idle ones.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        // The two collections partition distinct items, so their combined
        // length cannot exceed the number of items ever created.
        self.available.len().saturating_add(self.in_use.len())
    }

    /// Whether the pool currently owns no items at all.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.in_use.is_empty()
    }

    /// The number of items created eagerly at construction, which is also
    /// the floor the idle reserve is never shrunk below.
    #[must_use]
    #[inline]
    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// The ceiling on the total number of items held at once.
    ///
    /// At the ceiling, `acquire()` switches from growth to forced reuse.
    #[must_use]
    #[inline]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// The time between size reviews.
    #[must_use]
    #[inline]
    pub fn review_period(&self) -> Duration {
        self.review_period
    }

    /// The reserve-to-peak-demand ratio a review keeps idle.
    #[must_use]
    #[inline]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// The idle reserve size a review aims to keep: the recent peak demand
    /// scaled by the margin, rounded down.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "in-use counts are nowhere near 2^52 and margin >= 1.0, \
                  so the scaled value is a small non-negative float"
    )]
    fn reserve_target(&self) -> usize {
        (self.peak_in_use as f64 * self.margin) as usize
    }

    /// Destroys idle items the recent demand peak does not justify keeping.
    ///
    /// The oldest idle items go first, and the reserve is never cut below
    /// the initial provisioning.
    fn review(&mut self) {
        if self.available.len() < self.initial_count {
            return;
        }

        let keep = self.initial_count.max(self.reserve_target());
        let excess = self.available.len().saturating_sub(keep);

        for _ in 0..excess {
            _ = self.available.pop_front();
        }
    }
}

impl<T> AdaptivePool<T>
where
    T: Clone + PartialEq,
{
    /// Hands out an item: the oldest idle one if any, otherwise a freshly
    /// created one, otherwise - at the `max_count` ceiling - the item that
    /// has been in use the longest.
    ///
    /// Growth calls the factory with the current in-use count and places the
    /// new item directly in use. Forced reuse carries the same aliasing
    /// caveat as [`FixedPool`][crate::FixedPool#forced-reuse] and fires the
    /// `on_reclaimed` hook. Every path fires `on_acquired` before returning.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyPoolError`] only when the pool holds no items and
    /// `max_count` is zero, leaving it nothing to serve, create or reuse.
    ///
    /// # Example
    ///
    /// ```
    /// use adaptive_pool::AdaptivePool;
    ///
    /// let mut pool = AdaptivePool::new(1, |index| index);
    ///
    /// let first = pool.acquire()?;
    /// // The single initial item is in use, so the pool grows.
    /// let second = pool.acquire()?;
    ///
    /// assert_ne!(first, second);
    /// assert_eq!(pool.len(), 2);
    /// # Ok::<(), adaptive_pool::EmptyPoolError>(())
    /// ```
    pub fn acquire(&mut self) -> Result<T, EmptyPoolError> {
        if let Some(item) = self.available.pop_front() {
            let handle = item.clone();
            self.in_use.push_back(item);
            self.hooks.acquired(&handle);
            return Ok(handle);
        }

        if self.in_use.len() < self.max_count {
            let item = (self.factory)(self.in_use.len());
            let handle = item.clone();
            self.in_use.push_back(item);
            self.hooks.acquired(&handle);
            return Ok(handle);
        }

        // At the ceiling: rotate the longest-held item to the back of the
        // in-use queue and hand it out again.
        let item = self.in_use.pop_front().ok_or(EmptyPoolError)?;
        let handle = item.clone();
        self.in_use.push_back(item);

        self.hooks.reclaimed(&handle);
        self.hooks.acquired(&handle);
        Ok(handle)
    }

    /// Returns an item to the idle reserve.
    ///
    /// Behaves exactly like [`FixedPool::release()`][crate::FixedPool::release]:
    /// the item is matched by `==` against the in-use collection, moves to
    /// the back of the idle reserve and fires `on_released`; an item not
    /// currently in use is ignored entirely.
    pub fn release(&mut self, item: T) {
        let Some(index) = self.in_use.iter().position(|held| *held == item) else {
            return;
        };

        self.in_use.remove(index);
        self.hooks.released(&item);
        self.available.push_back(item);
    }

    /// Advances the pool's notion of time; call this from the host's update
    /// loop.
    ///
    /// Every call folds the current in-use count into the running peak.
    /// Once `now` passes the scheduled review time, the pool reviews its
    /// idle reserve (see the type-level notes), resets the peak to the
    /// *current* in-use count - items still held remain demand - and
    /// schedules the next review one `review_period` after `now`.
    ///
    /// Calling at any frequency is safe: between scheduled reviews, a call
    /// only samples usage and never moves or destroys items.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use adaptive_pool::AdaptivePool;
    ///
    /// let mut pool = AdaptivePool::new(2, |index| index);
    ///
    /// // Before the review period has elapsed, ticks are pure sampling.
    /// pool.tick(Duration::from_millis(16));
    /// pool.tick(Duration::from_millis(32));
    ///
    /// assert_eq!(pool.available_len(), 2);
    /// ```
    pub fn tick(&mut self, now: Duration) {
        self.peak_in_use = self.peak_in_use.max(self.in_use.len());

        if now > self.next_review_at {
            self.review();
            self.peak_in_use = self.in_use.len();
            self.next_review_at = now.saturating_add(self.review_period);
        }
    }
}

impl<T> Debug for AdaptivePool<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output is not part of the API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("available", &self.available.len())
            .field("in_use", &self.in_use.len())
            .field(
                "factory",
                &format_args!("Box<dyn FnMut(usize) -> {t}>", t = type_name::<T>()),
            )
            .field("hooks", &self.hooks)
            .field("initial_count", &self.initial_count)
            .field("max_count", &self.max_count)
            .field("review_period", &self.review_period)
            .field("margin", &self.margin)
            .field("peak_in_use", &self.peak_in_use)
            .field("next_review_at", &self.next_review_at)
            .finish()
    }
}
