use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;

#[tokio::test]
async fn jobs_run_in_fifo_order() {
    let dispatcher = AsyncDispatcher::start();
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..5 {
        let order = Arc::clone(&order);
        dispatcher.push(Box::new(move || order.lock().push(i))).await;
    }
    dispatcher.close().await;

    assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn push_after_close_is_a_no_op() {
    let dispatcher = AsyncDispatcher::start();
    let count = Arc::new(AtomicUsize::new(0));
    dispatcher.close().await;

    let count_clone = Arc::clone(&count);
    dispatcher.push(Box::new(move || {
        count_clone.fetch_add(1, Ordering::SeqCst);
    }))
    .await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn close_is_idempotent() {
    let dispatcher = AsyncDispatcher::start();
    dispatcher.close().await;
    dispatcher.close().await;
}
