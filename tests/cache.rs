// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::fs::File;
use std::time::{Duration, SystemTime};

use aigcm::services::cache::{MESSAGE_FILE, RecentMessageCache};

const WINDOW: Duration = Duration::from_secs(60);

fn cache_with_message(text: &str) -> (tempfile::TempDir, RecentMessageCache) {
    let dir = tempfile::tempdir().unwrap();
    let cache = RecentMessageCache::new(dir.path(), WINDOW);
    cache.store(text).unwrap();
    (dir, cache)
}

fn set_mtime(cache: &RecentMessageCache, when: SystemTime) {
    let file = File::options().write(true).open(cache.path()).unwrap();
    file.set_modified(when).unwrap();
}

// ─── Freshness window ────────────────────────────────────────────────────────

#[test]
fn fresh_strictly_inside_window() {
    let cache = RecentMessageCache::new(std::path::Path::new("."), WINDOW);
    let stored = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);

    assert!(cache.is_fresh_at(stored, stored));
    assert!(cache.is_fresh_at(stored, stored + WINDOW - Duration::from_millis(1)));
    assert!(!cache.is_fresh_at(stored, stored + WINDOW));
    assert!(!cache.is_fresh_at(stored, stored + WINDOW + Duration::from_secs(1)));
}

#[test]
fn future_timestamp_counts_as_fresh() {
    let cache = RecentMessageCache::new(std::path::Path::new("."), WINDOW);
    let now = SystemTime::now();
    assert!(cache.is_fresh_at(now + Duration::from_secs(3600), now));
}

#[test]
fn lookup_at_respects_file_mtime() {
    let (_dir, cache) = cache_with_message("feat: add cache");
    let stored = SystemTime::now() - Duration::from_secs(10);
    set_mtime(&cache, stored);

    let hit = cache
        .lookup_at(stored + WINDOW - Duration::from_millis(1))
        .unwrap()
        .expect("message inside window");
    assert_eq!(hit.text, "feat: add cache");

    assert!(cache.lookup_at(stored + WINDOW).unwrap().is_none());
}

#[test]
fn stale_file_is_not_reused() {
    let (_dir, cache) = cache_with_message("old message");
    set_mtime(&cache, SystemTime::now() - Duration::from_secs(120));

    assert!(cache.lookup(false).unwrap().is_none());
    // Still readable; just not reusable
    assert_eq!(cache.read().unwrap().unwrap().text, "old message");
}

#[test]
fn recent_file_is_reused() {
    let (_dir, cache) = cache_with_message("fix: recent");
    let hit = cache.lookup(false).unwrap().unwrap();
    assert_eq!(hit.text, "fix: recent");
}

#[test]
fn dry_run_never_reuses() {
    let (_dir, cache) = cache_with_message("fix: recent");
    assert!(cache.lookup(true).unwrap().is_none());
}

#[test]
fn missing_file_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RecentMessageCache::new(dir.path(), WINDOW);
    assert!(cache.read().unwrap().is_none());
    assert!(cache.lookup(false).unwrap().is_none());
}

#[test]
fn stale_undecodable_file_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RecentMessageCache::new(dir.path(), WINDOW);
    std::fs::write(cache.path(), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    set_mtime(&cache, SystemTime::now() - Duration::from_secs(3600));

    assert!(cache.lookup(false).unwrap().is_none());

    cache.store("feat: replace garbage").unwrap();
    assert_eq!(
        cache.lookup(false).unwrap().unwrap().text,
        "feat: replace garbage"
    );
}

#[test]
fn fresh_undecodable_file_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RecentMessageCache::new(dir.path(), WINDOW);
    std::fs::write(cache.path(), b"fix: caf\xff").unwrap();

    let hit = cache.lookup(false).unwrap().unwrap();
    assert_eq!(hit.text, "fix: caf\u{fffd}");
}

#[test]
fn unreadable_fresh_entry_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RecentMessageCache::new(dir.path(), WINDOW);
    std::fs::create_dir(cache.path()).unwrap();

    assert!(cache.lookup(false).unwrap().is_none());
}

// ─── Storage ─────────────────────────────────────────────────────────────────

#[test]
fn store_writes_sentinel_in_directory() {
    let (dir, cache) = cache_with_message("chore: first");
    assert_eq!(cache.path(), dir.path().join(MESSAGE_FILE));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".aigcm_msg")).unwrap(),
        "chore: first"
    );
}

#[test]
fn store_overwrites_previous_message() {
    let (_dir, cache) = cache_with_message("a much longer first message body");
    cache.store("short").unwrap();
    assert_eq!(std::fs::read_to_string(cache.path()).unwrap(), "short");
}
