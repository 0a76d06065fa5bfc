//! Basic usage example for concurrent-store
//!
//! A crawler-style frontier: several threads discover URLs and record them in
//! a `ConcurrentSet`, a pool of workers claims them with `pop`, and results go
//! into a `ConcurrentMap`.

use concurrent_store::{ConcurrentMap, ConcurrentSet, Error, MetricsCollector};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("concurrent-store usage example");
    println!("==============================");

    println!("\n1. Basic Operations:");
    let frontier: Arc<ConcurrentSet<String>> = Arc::new(ConcurrentSet::new());
    match frontier.pop() {
        Err(Error::Empty) => println!("   pop on a fresh set: {}", Error::Empty),
        Ok(url) => println!("   unexpected value {}", url),
    }
    frontier.add("https://example.com".to_string());
    frontier.add("https://example.com".to_string());
    println!("   added the same URL twice, len = {}", frontier.len());

    println!("\n2. Concurrent Discovery:");
    let discoverers: Vec<_> = (0..4)
        .map(|i| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                for j in 0..25 {
                    // Every discoverer also finds the pages of its neighbour
                    frontier.add(format!("https://site{}.com/page{}", (i + j % 2) % 4, j));
                }
            })
        })
        .collect();
    for handle in discoverers {
        handle.join().map_err(|_| "discoverer panicked")?;
    }
    println!("   frontier holds {} distinct URLs", frontier.len());

    println!("\n3. Concurrent Workers:");
    let fetched: Arc<ConcurrentMap<String, usize>> = Arc::new(ConcurrentMap::new());
    let workers: Vec<_> = (0..3)
        .map(|i| {
            let frontier = Arc::clone(&frontier);
            let fetched = Arc::clone(&fetched);
            thread::spawn(move || {
                let mut claimed = 0;
                while let Ok(url) = frontier.pop() {
                    let size = url.len();
                    fetched.add(url, size);
                    claimed += 1;
                }
                println!("   worker {} claimed {} URLs", i, claimed);
                claimed
            })
        })
        .collect();
    let mut total_claimed = 0;
    for handle in workers {
        total_claimed += handle.join().map_err(|_| "worker panicked")?;
    }

    println!("\n4. Results:");
    let snapshot = fetched.all();
    println!("   claimed {} URLs, fetched map holds {}", total_claimed, snapshot.len());
    println!("   frontier empty: {}", frontier.is_empty());

    let metrics = frontier.metrics();
    println!(
        "   frontier ops: {} total, {:.1}% failed, {} contended, peak len {}",
        metrics.total_operations,
        metrics.failure_rate(),
        metrics.contended_operations,
        metrics.peak_len
    );

    println!("\n5. Error Handling:");
    let (url, size) = fetched.pop()?;
    println!("   popped ({}, {}) from the results map", url, size);
    fetched.clear();
    if let Err(err) = fetched.pop() {
        println!("   after clear: {}", err);
    }

    Ok(())
}
