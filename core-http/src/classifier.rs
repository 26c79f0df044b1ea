//! First-party host classification.
//!
//! Decides whether a URL belongs to the first-party service family. Verdicts
//! are memoized per exact URL string in a bounded LRU cache; a URL's verdict
//! never changes, so entries are only ever evicted for space.

use core_runtime::config::ExecutionMode;
use core_runtime::error::{Error, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::trace;
use url::Url;

/// Dot-anchored suffixes of first-party hostnames.
///
/// The leading dot keeps `evilthirdweb.com` from matching `.thirdweb.com`.
pub const FIRST_PARTY_DOMAINS: &[&str] = &[".thirdweb.com", ".ipfscdn.io", ".thirdweb-dev.com"];

/// Hostname accepted as first-party outside production
const LOCALHOST: &str = "localhost";

/// Hostname prefix of the pay subservice
const PAY_HOST_PREFIX: &str = "pay.";

/// Cache hit/miss counters for a [`HostClassifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that parsed the URL
    pub misses: u64,
}

/// Memoizing first-party URL classifier.
pub struct HostClassifier {
    cache: Mutex<LruCache<String, bool>>,
    mode: ExecutionMode,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HostClassifier {
    /// Create a classifier holding at most `capacity` verdicts
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `capacity` is zero.
    pub fn new(capacity: usize, mode: ExecutionMode) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            Error::Config("Host cache capacity must be greater than 0".to_string())
        })?;

        Ok(Self {
            cache: Mutex::new(LruCache::new(capacity)),
            mode,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Whether `url` targets a first-party endpoint.
    ///
    /// Malformed URLs classify as `false`; that verdict is cached like any other.
    pub fn is_first_party(&self, url: &str) -> bool {
        if let Some(verdict) = self.lock().get(url).copied() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return verdict;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let verdict = self.classify(url);
        self.lock().put(url.to_string(), verdict);
        trace!(url = %url, first_party = verdict, "Classified URL");
        verdict
    }

    /// Cached verdict for `url`, without touching its recency
    pub fn cached_verdict(&self, url: &str) -> Option<bool> {
        self.lock().peek(url).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn classify(&self, url: &str) -> bool {
        let Some(host) = parse_host(url) else {
            return false;
        };

        if !self.mode.is_production() && host == LOCALHOST {
            return true;
        }

        FIRST_PARTY_DOMAINS
            .iter()
            .any(|suffix| host.ends_with(suffix))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, bool>> {
        // Verdicts are plain bools, a poisoned cache is still consistent
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for HostClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClassifier")
            .field("mode", &self.mode)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Whether `url` targets the pay subservice (`pay.*`).
///
/// Malformed URLs yield `false`.
pub fn is_pay_endpoint(url: &str) -> bool {
    parse_host(url).is_some_and(|host| host.starts_with(PAY_HOST_PREFIX))
}

fn parse_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(mode: ExecutionMode) -> HostClassifier {
        HostClassifier::new(4096, mode).unwrap()
    }

    #[test]
    fn test_first_party_suffixes() {
        let classifier = classifier(ExecutionMode::Production);

        assert!(classifier.is_first_party("https://api.thirdweb.com/v1/wallets"));
        assert!(classifier.is_first_party("https://1.rpc.thirdweb.com"));
        assert!(classifier.is_first_party("https://gateway.ipfscdn.io/ipfs/Qm"));
        assert!(classifier.is_first_party("https://embedded-wallet.thirdweb-dev.com/api"));
    }

    #[test]
    fn test_suffix_is_dot_anchored() {
        let classifier = classifier(ExecutionMode::Production);

        assert!(!classifier.is_first_party("https://otherthirdweb.com/api"));
        assert!(!classifier.is_first_party("https://evilthirdweb.com"));
        assert!(!classifier.is_first_party("https://thirdweb.com.evil.io"));
        // the apex has no leading label, so no suffix matches
        assert!(!classifier.is_first_party("https://thirdweb.com"));
    }

    #[test]
    fn test_localhost_only_outside_production() {
        assert!(classifier(ExecutionMode::Development).is_first_party("http://localhost:8787/rpc"));
        assert!(classifier(ExecutionMode::Test).is_first_party("http://localhost/"));
        assert!(!classifier(ExecutionMode::Production).is_first_party("http://localhost:8787/rpc"));

        // exact hostname only
        assert!(!classifier(ExecutionMode::Development).is_first_party("http://localhost.example.com"));
    }

    #[test]
    fn test_malformed_url_cached_as_false() {
        let classifier = classifier(ExecutionMode::Development);

        assert!(!classifier.is_first_party("not a url"));
        assert_eq!(classifier.cached_verdict("not a url"), Some(false));
        assert!(!classifier.is_first_party("mailto:dev@thirdweb.com"));
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let classifier = classifier(ExecutionMode::Production);
        let url = "https://api.thirdweb.com/v1";

        assert!(classifier.is_first_party(url));
        assert_eq!(classifier.stats(), ClassifierStats { hits: 0, misses: 1 });

        assert!(classifier.is_first_party(url));
        assert_eq!(classifier.stats(), ClassifierStats { hits: 1, misses: 1 });
        assert_eq!(classifier.len(), 1);
    }

    #[test]
    fn test_exact_string_keys() {
        let classifier = classifier(ExecutionMode::Production);

        classifier.is_first_party("https://api.thirdweb.com/v1");
        classifier.is_first_party("https://API.thirdweb.com/v1");

        // equivalent spellings are cached separately
        assert_eq!(classifier.len(), 2);
        assert_eq!(classifier.stats().misses, 2);
    }

    #[test]
    fn test_capacity_bound_evicts_least_recently_used() {
        let classifier = classifier(ExecutionMode::Production);
        for i in 0..4096 {
            classifier.is_first_party(&format!("https://h{}.example.com/", i));
        }
        assert_eq!(classifier.len(), 4096);

        classifier.is_first_party("https://api.thirdweb.com/entry-4097");

        assert_eq!(classifier.len(), 4096);
        assert_eq!(classifier.cached_verdict("https://h0.example.com/"), None);
        assert_eq!(classifier.cached_verdict("https://h1.example.com/"), Some(false));
        assert_eq!(
            classifier.cached_verdict("https://api.thirdweb.com/entry-4097"),
            Some(true)
        );
    }

    #[test]
    fn test_lookup_refreshes_recency() {
        let classifier = HostClassifier::new(2, ExecutionMode::Production).unwrap();

        classifier.is_first_party("https://a.example.com");
        classifier.is_first_party("https://b.example.com");
        // touch a so b becomes least recently used
        classifier.is_first_party("https://a.example.com");
        classifier.is_first_party("https://c.example.com");

        assert_eq!(classifier.cached_verdict("https://a.example.com"), Some(false));
        assert_eq!(classifier.cached_verdict("https://b.example.com"), None);
        assert_eq!(classifier.capacity(), 2);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(HostClassifier::new(0, ExecutionMode::Production).is_err());
    }

    #[test]
    fn test_pay_endpoint_detection() {
        assert!(is_pay_endpoint("https://pay.thirdweb.com/buy-with-crypto"));
        assert!(is_pay_endpoint("https://pay.thirdweb-dev.com"));
        assert!(!is_pay_endpoint("https://api.thirdweb.com/pay"));
        assert!(!is_pay_endpoint("https://paymaster.thirdweb.com"));
        assert!(!is_pay_endpoint("::not-a-url::"));
    }
}
