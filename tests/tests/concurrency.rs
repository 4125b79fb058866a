//! Reader/writer serialization scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use warren_tests::prelude::*;

const KIND: KindId = KindId(1);

fn shared_session() -> Arc<Session> {
    Arc::new(session_with(TestCatalog::new()))
}

#[test]
fn test_readers_observe_concurrently() {
    // GIVEN - a committed document
    let session = shared_session();
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let n = m.create_node(KIND, attrs!());
        m.add_root(n).unwrap();
    });
    session.end(ctx).unwrap();

    // WHEN - several reader threads overlap inside read()
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let session = session.clone();
            let inside = inside.clone();
            let peak = peak.clone();
            thread::spawn(move || {
                session.read(|graph| {
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(30));
                    inside.fetch_sub(1, Ordering::SeqCst);
                    assert_eq!(graph.node_count(), 1);
                });
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // THEN
    assert!(peak.load(Ordering::SeqCst) > 1);
}

#[test]
fn test_open_transaction_blocks_readers_until_end() {
    // GIVEN - a transaction held open on this thread
    let session = shared_session();
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let n = m.create_node(KIND, attrs!());
        m.add_root(n).unwrap();
    });
    let observed = Arc::new(AtomicUsize::new(usize::MAX));
    let observed2 = observed.clone();
    let session2 = session.clone();
    let reader = thread::spawn(move || {
        let count = session2.read(|graph| graph.node_count());
        observed2.store(count, Ordering::SeqCst);
    });

    // WHEN - the reader has had time to try
    thread::sleep(Duration::from_millis(50));
    assert_eq!(observed.load(Ordering::SeqCst), usize::MAX);
    session.end(ctx).unwrap();
    reader.join().unwrap();

    // THEN - it saw the committed state, never the in-flight one
    assert_eq!(observed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_writers_serialize() {
    // GIVEN
    let session = shared_session();
    let ctx = session.begin(&[]).unwrap();
    let root = session.mutate(&ctx, |m| {
        let root = m.create_node(KIND, attrs!());
        m.add_root(root).unwrap();
        root
    });
    session.end(ctx).unwrap();

    // WHEN - two threads each run many counter-increment transactions
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let session = session.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let ctx = session.begin(&[]).unwrap();
                    session.mutate(&ctx, |m| {
                        let current = m
                            .graph()
                            .node(root)
                            .and_then(|n| n.get_attr("n"))
                            .and_then(Value::as_int)
                            .unwrap_or(0);
                        m.set_attr(root, "n", Some(Value::Int(current + 1))).unwrap();
                    });
                    session.end(ctx).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // THEN - no lost updates
    let total = session.read(|g| {
        g.node(root)
            .and_then(|n| n.get_attr("n"))
            .and_then(Value::as_int)
            .unwrap()
    });
    assert_eq!(total, 100);
}

#[test]
fn test_explicit_read_gestures_nest() {
    // GIVEN
    let session = shared_session();

    // WHEN - nested begin_read/end_read on one thread
    session.begin_read();
    session.begin_read();
    let count = session.read(|g| g.node_count());
    session.end_read();
    session.end_read();

    // THEN
    assert_eq!(count, 0);
}
