//! Memoized call signatures.
//!
//! An entry is keyed by module, bracket position and the source text from
//! the start of the callee's line up to the cursor it was computed for.
//! Any edit to the callee or inside the argument list changes that text,
//! so a stale entry can never match. Entries also expire after a fixed
//! validity window; expired entries are evicted whenever a new one is
//! stored.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use quill_ir::{CodeLines, Position};
use tracing::{debug, trace};

use crate::{source_window, CallSignatureDetails, ModuleId};

/// Signature details plus the resolved call target, cached as one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSignature<T> {
    pub details: CallSignatureDetails,
    pub target: T,
}

/// Identity of one call as seen from one cursor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    module: ModuleId,
    bracket: Position,
    text: String,
}

impl CacheKey {
    /// Key for the call opened at `bracket`, whose callee starts at
    /// `callee`, as seen from `cursor`. `None` when the positions do not
    /// address `lines`.
    pub fn new(
        module: ModuleId,
        lines: &CodeLines,
        callee: Position,
        bracket: Position,
        cursor: Position,
    ) -> Option<Self> {
        let from = Position::new(callee.line.min(bracket.line), 0);
        match source_window(lines, from, cursor) {
            Ok(text) => Some(CacheKey { module, bracket, text }),
            Err(error) => {
                trace!(%error, %bracket, %cursor, "call not cacheable");
                None
            }
        }
    }
}

struct CacheEntry<T> {
    signature: CallSignature<T>,
    stored: Instant,
}

/// Concurrent signature cache, shared across requests.
///
/// Writers for the same key race harmlessly: equal keys always carry equal
/// values.
pub struct SignatureCache<T> {
    entries: DashMap<CacheKey, CacheEntry<T>>,
    validity: Duration,
}

impl<T: Clone> SignatureCache<T> {
    pub fn new(validity: Duration) -> Self {
        SignatureCache {
            entries: DashMap::new(),
            validity,
        }
    }

    /// The signature stored under `key`, unless it has expired.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %key.module, bracket = %key.bracket))]
    pub fn get(&self, key: &CacheKey) -> Option<CallSignature<T>> {
        let now = Instant::now();
        let found = self
            .entries
            .get(key)
            .filter(|entry| now.duration_since(entry.stored) <= self.validity)
            .map(|entry| entry.signature.clone());
        if found.is_none() {
            self.entries
                .remove_if(key, |_, entry| now.duration_since(entry.stored) > self.validity);
        }
        debug!(hit = found.is_some(), "signature cache lookup");
        found
    }

    /// Remember `signature` under `key`, dropping expired entries first.
    pub fn store(&self, key: CacheKey, signature: CallSignature<T>) {
        let now = Instant::now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.stored) <= self.validity);
        self.entries.insert(
            key,
            CacheEntry {
                signature,
                stored: now,
            },
        );
    }

    /// Drop every entry of `module`.
    pub fn invalidate_module(&self, module: &ModuleId) {
        self.entries.retain(|key, _| key.module != *module);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
