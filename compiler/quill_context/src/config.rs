//! Resolver configuration.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolverConfig {
    /// Memoize call signatures per module.
    pub cache_signatures: bool,
    /// How long a cached signature may be reused.
    pub signature_validity: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            cache_signatures: true,
            signature_validity: Duration::from_secs(3),
        }
    }
}

impl ResolverConfig {
    /// Compute every signature afresh.
    pub fn uncached() -> Self {
        ResolverConfig {
            cache_signatures: false,
            ..ResolverConfig::default()
        }
    }
}
