//! Object pools that recycle expensive-to-create items instead of
//! constructing them anew on every request.
//!
//! This crate provides two pools sharing one contract. Both hand out items
//! via `acquire()`, take them back via `release()`, and notify optional
//! observer hooks as items change state:
//!
//! * [`FixedPool`] creates all of its items up front. When every item is in
//!   use, `acquire()` forcibly reuses the item that has been held the
//!   longest rather than failing or blocking.
//! * [`AdaptivePool`] starts from an initial provisioning, creates
//!   additional items on demand up to a ceiling, and - driven by the host's
//!   periodic [`tick()`][AdaptivePool::tick] - trims its idle reserve back
//!   toward the recently observed peak demand.
//!
//! The intended items are cheap handles to expensive resources: particles in
//! a scene, pooled connections, preallocated buffers. The pool recognizes
//! items by `==`, so an item must compare equal only to itself; the factory
//! receives an index it can bake in as an identity.
//!
//! # Key characteristics
//!
//! - **Total `acquire()`**: once the pool holds a single item, acquisition
//!   never fails - at worst it aliases an item that is still in use, which
//!   the optional `on_reclaimed` hook reports.
//! - **FIFO everywhere**: the oldest idle item is served first, the
//!   longest-held item is reclaimed first, and shrinking destroys the
//!   oldest idle items first.
//! - **Caller-driven time**: the adaptive pool never reads a clock; the
//!   host passes the current time to `tick()`.
//! - **Single-threaded**: no internal locking and no atomic state; wrap the
//!   whole pool in a mutex if you need to share it across threads.
//!
//! # Examples
//!
//! A fixed pool with visibility hooks:
//!
//! ```
//! use adaptive_pool::FixedPool;
//!
//! let mut pool = FixedPool::builder()
//!     .factory(|index| format!("sprite-{index}"))
//!     .initial_count(2)
//!     .on_acquired(|item| println!("showing {item}"))
//!     .on_released(|item| println!("hiding {item}"))
//!     .build();
//!
//! let sprite = pool.acquire()?;
//! assert_eq!(sprite, "sprite-0");
//! pool.release(sprite);
//! # Ok::<(), adaptive_pool::EmptyPoolError>(())
//! ```
//!
//! An adaptive pool riding out a demand spike:
//!
//! ```
//! use std::time::Duration;
//!
//! use adaptive_pool::AdaptivePool;
//!
//! let mut pool = AdaptivePool::builder()
//!     .factory(|index| index)
//!     .initial_count(2)
//!     .build();
//!
//! // Demand exceeds the initial provisioning; the pool grows.
//! let spike: Vec<_> = (0..6).map(|_| pool.acquire().unwrap()).collect();
//! assert_eq!(pool.len(), 6);
//!
//! pool.tick(Duration::from_millis(16));
//! for item in spike {
//!     pool.release(item);
//! }
//!
//! // Reviews eventually trim the idle reserve back to the initial two.
//! pool.tick(Duration::from_millis(5_100));
//! pool.tick(Duration::from_millis(10_200));
//! assert_eq!(pool.len(), 2);
//! ```

mod adaptive_pool;
mod builder;
mod error;
mod fixed_pool;
mod hooks;

pub use adaptive_pool::AdaptivePool;
pub use builder::{AdaptivePoolBuilder, FixedPoolBuilder};
pub use error::EmptyPoolError;
pub use fixed_pool::FixedPool;
pub(crate) use hooks::PoolHooks;
