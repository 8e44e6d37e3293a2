//! Scoped access to capability-protected locations
//!
//! [`ScopeGuard`] calls `begin_access` when acquired and `end_access` when
//! dropped. Because release happens in `Drop`, it also runs when the body
//! returns early, fails, panics, or when an async workflow holding the
//! guard is dropped before it finishes.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::capability::{AccessCapability, CapabilityProvider};
use crate::error::{Error, Result};

/// Active access grant for one capability. Released exactly once on drop.
pub struct ScopeGuard {
    provider: Arc<dyn CapabilityProvider>,
    capability: AccessCapability,
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("key", &self.capability.key())
            .finish_non_exhaustive()
    }
}

impl ScopeGuard {
    /// Begin access to `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] if the provider refuses the grant; in
    /// that case `end_access` is never called.
    pub fn acquire(provider: Arc<dyn CapabilityProvider>, capability: AccessCapability) -> Result<Self> {
        if !provider.begin_access(&capability) {
            return Err(Error::AccessDenied {
                key: capability.key().to_string(),
            });
        }
        tracing::debug!("Access granted: {}", capability.key());
        Ok(Self { provider, capability })
    }

    #[must_use]
    pub fn capability(&self) -> &AccessCapability {
        &self.capability
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.provider.end_access(&self.capability);
        tracing::debug!("Access released: {}", self.capability.key());
    }
}

/// Run `body` while holding access to `capability`.
///
/// # Errors
///
/// Returns [`Error::AccessDenied`] without running `body` if access is refused.
pub fn with_scope<R>(
    provider: Arc<dyn CapabilityProvider>,
    capability: AccessCapability,
    body: impl FnOnce(&AccessCapability) -> R,
) -> Result<R> {
    let guard = ScopeGuard::acquire(provider, capability)?;
    Ok(body(guard.capability()))
}

/// Async form of [`with_scope`]. The grant is held across every await in
/// `body` and released even if the returned future is dropped early.
///
/// # Errors
///
/// Returns [`Error::AccessDenied`] without running `body` if access is refused.
pub async fn with_scope_async<R, F, Fut>(
    provider: Arc<dyn CapabilityProvider>,
    capability: AccessCapability,
    body: F,
) -> Result<R>
where
    F: FnOnce(AccessCapability) -> Fut,
    Fut: Future<Output = R>,
{
    let guard = ScopeGuard::acquire(provider, capability)?;
    let output = body(guard.capability().clone()).await;
    drop(guard);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        deny: AtomicBool,
        begins: AtomicUsize,
        ends: AtomicUsize,
    }

    impl CapabilityProvider for CountingProvider {
        fn create(&self, location: &Path) -> Result<AccessCapability> {
            Ok(AccessCapability::new(Vec::new(), location.display().to_string()))
        }

        fn resolve(&self, capability: &AccessCapability) -> Result<PathBuf> {
            Ok(PathBuf::from(capability.key()))
        }

        fn begin_access(&self, _capability: &AccessCapability) -> bool {
            self.begins.fetch_add(1, Ordering::SeqCst);
            !self.deny.load(Ordering::SeqCst)
        }

        fn end_access(&self, _capability: &AccessCapability) {
            self.ends.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn cap() -> AccessCapability {
        AccessCapability::new(Vec::new(), "/a/doc.txt".to_string())
    }

    #[test]
    fn test_body_runs_inside_scope() {
        let provider = Arc::new(CountingProvider::default());
        let seen = with_scope(provider.clone(), cap(), |c| {
            assert_eq!(provider.ends.load(Ordering::SeqCst), 0);
            c.key().to_string()
        })
        .unwrap();
        assert_eq!(seen, "/a/doc.txt");
        assert_eq!(provider.begins.load(Ordering::SeqCst), 1);
        assert_eq!(provider.ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_body_still_releases() {
        let provider = Arc::new(CountingProvider::default());
        let result: Result<std::result::Result<(), &str>> =
            with_scope(provider.clone(), cap(), |_| Err("load failed"));
        assert!(matches!(result, Ok(Err("load failed"))));
        assert_eq!(provider.ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_body_still_releases() {
        let provider = Arc::new(CountingProvider::default());
        let p = provider.clone();
        let outcome = catch_unwind(AssertUnwindSafe(move || {
            with_scope::<()>(p, cap(), |_| panic!("boom"))
        }));
        assert!(outcome.is_err());
        assert_eq!(provider.ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_denied_skips_body_and_release() {
        let provider = Arc::new(CountingProvider::default());
        provider.deny.store(true, Ordering::SeqCst);
        let mut ran = false;
        let result = with_scope(provider.clone(), cap(), |_| ran = true);
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
        assert!(!ran);
        assert_eq!(provider.ends.load(Ordering::SeqCst), 0);
    }
}
