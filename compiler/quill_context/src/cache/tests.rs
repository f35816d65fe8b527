#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use quill_ir::{CodeLines, Position};

use super::{CacheKey, CallSignature, SignatureCache};
use crate::{CallSignatureDetails, ModuleId};

fn signature(bracket: Position, call_index: usize, target: &'static str) -> CallSignature<&'static str> {
    CallSignature {
        details: CallSignatureDetails {
            bracket,
            call_index,
            keyword_name: None,
        },
        target,
    }
}

fn module() -> ModuleId {
    ModuleId::new("pkg/mod.py")
}

/// Key for a call whose callee starts the line.
fn key(module: ModuleId, source: &str, bracket: Position, cursor: Position) -> CacheKey {
    CacheKey::new(module, &CodeLines::new(source), Position::new(bracket.line, 0), bracket, cursor).unwrap()
}

fn cache() -> SignatureCache<&'static str> {
    SignatureCache::new(Duration::from_secs(60))
}

#[test]
fn test_hit_for_unchanged_text() {
    let cache = cache();
    let bracket = Position::new(1, 3);
    let cursor = Position::new(1, 7);
    cache.store(key(module(), "foo(a, ", bracket, cursor), signature(bracket, 1, "foo"));
    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.get(&key(module(), "foo(a, ", bracket, cursor)),
        Some(signature(bracket, 1, "foo"))
    );
}

#[test]
fn test_key_covers_callee_and_arguments() {
    let bracket = Position::new(1, 5);
    let cursor = Position::new(1, 7);
    let stored = key(module(), "print(a", bracket, cursor);
    assert_ne!(stored, key(module(), "fooba(a", bracket, cursor));
    assert_ne!(stored, key(module(), "print(b", bracket, cursor));
    assert_ne!(stored, key(ModuleId::new("other.py"), "print(a", bracket, cursor));
    assert_eq!(stored, key(module(), "print(a, b)\nmore = 1\n", bracket, cursor));
}

#[test]
fn test_key_starts_at_the_callee_line() {
    let lines = CodeLines::new("x = (os\n    .path).join(a");
    let bracket = Position::new(2, 15);
    let cursor = Position::new(2, 17);
    let from_callee = CacheKey::new(module(), &lines, Position::new(1, 4), bracket, cursor).unwrap();
    let edited = CodeLines::new("x = (sys\n    .path).join(a");
    let other = CacheKey::new(module(), &edited, Position::new(1, 4), bracket, cursor).unwrap();
    assert_ne!(from_callee, other);
}

#[test]
fn test_key_outside_document() {
    let lines = CodeLines::new("foo(");
    assert_eq!(
        CacheKey::new(module(), &lines, Position::START, Position::new(1, 3), Position::new(3, 0)),
        None
    );
}

#[test]
fn test_miss_for_unknown_key() {
    let cache = cache();
    let bracket = Position::new(1, 3);
    cache.store(key(module(), "foo(a", bracket, Position::new(1, 5)), signature(bracket, 0, "foo"));
    assert_eq!(cache.get(&key(module(), "foo(ab", bracket, Position::new(1, 6))), None);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_expired_entries_are_dropped() {
    let cache = SignatureCache::new(Duration::ZERO);
    let bracket = Position::new(1, 3);
    let first = key(module(), "foo(", bracket, Position::new(1, 4));
    cache.store(first.clone(), signature(bracket, 0, "foo"));
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(cache.get(&first), None);
    assert!(cache.is_empty());
}

#[test]
fn test_store_evicts_expired_entries() {
    let cache = SignatureCache::new(Duration::ZERO);
    let bracket = Position::new(1, 3);
    for (source, column) in [("foo(", 4), ("foo(a", 5), ("foo(a,", 6)] {
        cache.store(
            key(ModuleId::new(format!("m{column}.py")), source, bracket, Position::new(1, column)),
            signature(bracket, 0, "foo"),
        );
        std::thread::sleep(Duration::from_millis(2));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_and_clear() {
    let cache = cache();
    let bracket = Position::new(1, 3);
    let cursor = Position::new(1, 4);
    cache.store(key(module(), "foo(", bracket, cursor), signature(bracket, 0, "foo"));
    cache.store(key(ModuleId::new("b.py"), "foo(", bracket, cursor), signature(bracket, 0, "foo"));
    assert_eq!(cache.len(), 2);
    cache.invalidate_module(&module());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key(module(), "foo(", bracket, cursor)), None);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_concurrent_stores() {
    let cache = cache();
    let bracket = Position::new(1, 3);
    let shared = key(module(), "foo(", bracket, Position::new(1, 4));
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                cache.store(shared.clone(), signature(bracket, 0, "foo"));
                cache.get(&shared);
            });
        }
    });
    assert_eq!(cache.len(), 1);
}
