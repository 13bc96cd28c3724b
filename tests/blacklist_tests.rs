use std::sync::Arc;
use std::thread;

use adscout::application::{BlacklistKind, BlacklistStore};
use adscout::testkit::domain::sell_ad;
use rust_decimal_macros::dec;

#[test]
fn add_and_remove_report_changes() {
    let store = BlacklistStore::new();

    assert!(store.add(BlacklistKind::Advertiser, "bot-1"));
    assert!(!store.add(BlacklistKind::Advertiser, "bot-1"));
    assert!(store.is_excluded(&sell_ad("bot-1", dec!(2950))));

    assert!(store.remove(BlacklistKind::Advertiser, "bot-1"));
    assert!(!store.remove(BlacklistKind::Advertiser, "bot-1"));
    assert!(!store.is_excluded(&sell_ad("bot-1", dec!(2950))));
}

#[test]
fn ad_and_advertiser_entries_are_independent() {
    let store = BlacklistStore::new();
    store.add(BlacklistKind::Ad, "ad-alice");

    assert!(store.is_excluded(&sell_ad("alice", dec!(2950))));
    assert!(!store.snapshot().contains(BlacklistKind::Advertiser, "alice"));
    assert_eq!(store.snapshot().ad_count(), 1);
    assert_eq!(store.snapshot().advertiser_count(), 0);
}

#[test]
fn snapshots_are_not_affected_by_later_writes() {
    let store = BlacklistStore::with_entries(["a"], ["ad-x"]);
    let snapshot = store.snapshot();

    store.add(BlacklistKind::Advertiser, "b");
    store.remove(BlacklistKind::Ad, "ad-x");

    assert_eq!(snapshot.advertisers(), vec!["a"]);
    assert_eq!(snapshot.ads(), vec!["ad-x"]);
    assert_eq!(store.snapshot().advertisers(), vec!["a", "b"]);
    assert!(store.snapshot().ads().is_empty());
}

#[test]
fn concurrent_writers_and_readers() {
    let store = Arc::new(BlacklistStore::new());
    let probe = sell_ad("w0-7", dec!(2950));

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    store.add(BlacklistKind::Advertiser, &format!("w{w}-{i}"));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let probe = probe.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.snapshot();
                    let count = snapshot.advertiser_count();
                    assert!(count <= 200);
                    assert_eq!(snapshot.advertisers().len(), count);
                    let _ = snapshot.is_excluded(&probe);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(store.snapshot().advertiser_count(), 200);
    assert!(store.is_excluded(&probe));
}
