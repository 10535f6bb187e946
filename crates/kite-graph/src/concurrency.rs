//! Bounded fan-out over a list of inputs.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Run `worker` over every item with at most `width` items in flight.
///
/// `width` logical workers pull the next index from a shared cursor and
/// process one item to completion before pulling again. Results come back
/// in input order. A slot is `None` when its item panicked; the caller
/// decides how to degrade.
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, width: usize, worker: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    let width = width.clamp(1, total.max(1));
    debug!("running {total} items on {width} workers");

    let queue: Arc<Vec<Mutex<Option<T>>>> =
        Arc::new(items.into_iter().map(|item| Mutex::new(Some(item))).collect());
    let cursor = Arc::new(AtomicUsize::new(0));
    let worker = Arc::new(worker);
    let mut join_set = JoinSet::new();

    for _ in 0..width {
        let queue = Arc::clone(&queue);
        let cursor = Arc::clone(&cursor);
        let worker = Arc::clone(&worker);

        join_set.spawn(async move {
            let mut done = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(slot) = queue.get(index) else {
                    break;
                };
                let Some(item) = slot.lock().take() else {
                    continue;
                };
                // A panic is confined to its own item
                match tokio::spawn(worker(item)).await {
                    Ok(result) => done.push((index, result)),
                    Err(join_err) => error!("item {index} failed: {join_err}"),
                }
            }
            done
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(done) => {
                for (index, result) in done {
                    slots[index] = Some(result);
                }
            }
            Err(join_err) => error!("worker failed: {join_err}"),
        }
    }
    slots
}
