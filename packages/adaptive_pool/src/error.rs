use thiserror::Error;

/// The error returned by `acquire()` when a pool holds no items at all and is
/// not permitted to create one.
///
/// This can only happen for a [`FixedPool`][crate::FixedPool] built with zero
/// initial items, or an [`AdaptivePool`][crate::AdaptivePool] built with zero
/// initial items and a zero `max_count`. Every other acquisition is served by
/// an idle item, a newly created item or a forced reuse.
///
/// # Example
///
/// ```
/// use adaptive_pool::FixedPool;
///
/// let mut pool = FixedPool::new(0, |index| index);
///
/// assert!(pool.acquire().is_err());
/// ```
#[derive(Debug, Error)]
#[error("the pool holds no items and may not create one")]
pub struct EmptyPoolError;
