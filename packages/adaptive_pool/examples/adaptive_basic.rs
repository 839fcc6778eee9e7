//! An `AdaptivePool` riding out a bursty workload.
//!
//! The simulation drives the pool through three phases - a demand spike,
//! a calm stretch and complete idleness - and prints how the pool's size
//! follows the demand with a delay of one review period.

use std::time::Duration;

use adaptive_pool::AdaptivePool;

/// One simulated frame at 10 frames per second.
const FRAME: Duration = Duration::from_millis(100);

fn main() {
    let mut pool = AdaptivePool::builder()
        .factory(|index| index)
        .initial_count(2)
        .max_count(64)
        .build();

    println!("frame  demand  total  idle  in-use");

    let mut now = Duration::ZERO;
    for frame in 0_u32..250 {
        now = now.saturating_add(FRAME);

        // Spike for the first three seconds, calm down for the next ten,
        // then go fully idle so the reviews can trim the reserve.
        let demand = match frame {
            0..=29 => 12,
            30..=129 => 3,
            _ => 0,
        };

        let held: Vec<_> = (0..demand)
            .map(|_| pool.acquire().expect("below max_count, growth cannot fail"))
            .collect();

        pool.tick(now);

        for item in held {
            pool.release(item);
        }

        if frame % 25 == 0 {
            println!(
                "{frame:>5}  {demand:>6}  {total:>5}  {idle:>4}  {in_use:>6}",
                total = pool.len(),
                idle = pool.available_len(),
                in_use = pool.in_use_len(),
            );
        }
    }

    println!(
        "After the workload: {} items left, {} idle (initial provisioning was {}).",
        pool.len(),
        pool.available_len(),
        pool.initial_count()
    );
}
