//! Basic usage of a `FixedPool`:
//!
//! * Creating a pool with visibility hooks.
//! * Acquiring and releasing items.
//! * Forced reuse once the pool is exhausted.

use adaptive_pool::FixedPool;

fn main() {
    let mut pool = FixedPool::builder()
        .factory(|index| format!("sprite-{index}"))
        .initial_count(3)
        .on_acquired(|item| println!("  [hook] showing {item}"))
        .on_released(|item| println!("  [hook] hiding {item}"))
        .on_reclaimed(|item| println!("  [hook] {item} is being reused while still on screen!"))
        .build();

    println!(
        "Pool starts with {} idle items and {} in use.",
        pool.available_len(),
        pool.in_use_len()
    );

    println!("Acquiring three sprites:");
    let a = pool.acquire().expect("pool was built with items");
    let b = pool.acquire().expect("pool was built with items");
    let c = pool.acquire().expect("pool was built with items");

    // The pool is exhausted; a fourth acquisition does not fail. Instead it
    // hands out `a` again, because `a` has been in use the longest.
    println!("Acquiring a fourth sprite from the exhausted pool:");
    let d = pool.acquire().expect("forced reuse keeps acquire total");
    assert_eq!(a, d);

    println!("Releasing the sprites:");
    pool.release(b);
    pool.release(c);
    pool.release(d);

    // `a` and `d` are the same sprite, so this second release is ignored
    // rather than corrupting the pool's bookkeeping.
    pool.release(a);

    println!(
        "Pool ends with {} idle items and {} in use.",
        pool.available_len(),
        pool.in_use_len()
    );
}
