//! Traveler code generation.

use std::sync::LazyLock;
use std::time::Duration;

use rand::Rng;
use regex::Regex;
use tracing::warn;

use crate::store::ProfileStore;

/// Code returned alongside the degraded result on internal failure.
pub const ERROR_CODE: &str = "JET-ERR-500";

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^JET-[A-Z]{2,4}-\d{4}$").expect("code pattern is valid")
});

/// Whether `code` has the `JET-<prefix>-<4 digits>` shape.
pub fn is_valid_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Draw a random code for `prefix`. The number is uniform in 1000..=9999.
pub fn draw_code<R: Rng>(prefix: &str, rng: &mut R) -> String {
    let number: u16 = rng.gen_range(1000..=9999);
    format!("JET-{prefix}-{number}")
}

/// Issue a code for `prefix`, redrawing while the store reports a collision.
///
/// Gives up after `attempts` draws and issues the last one. A failing store
/// is treated as "no collision" so issuance never blocks on persistence, and
/// lookups that together take longer than `deadline` are abandoned in favor
/// of an unchecked draw.
pub async fn issue_code(
    store: &dyn ProfileStore,
    prefix: &str,
    attempts: u32,
    deadline: Duration,
) -> String {
    match tokio::time::timeout(deadline, draw_unique(store, prefix, attempts)).await {
        Ok(code) => code,
        Err(_) => {
            let code = draw_code(prefix, &mut rand::thread_rng());
            warn!(code = %code, timeout = ?deadline, "Code uniqueness check timed out, issuing unchecked");
            code
        }
    }
}

async fn draw_unique(store: &dyn ProfileStore, prefix: &str, attempts: u32) -> String {
    let attempts = attempts.max(1);
    let mut code = String::new();

    for attempt in 1..=attempts {
        code = draw_code(prefix, &mut rand::thread_rng());
        match store.code_exists(&code).await {
            Ok(false) => return code,
            Ok(true) => {
                warn!(code = %code, attempt, "Traveler code collision, redrawing");
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Code uniqueness check failed, issuing unchecked");
                return code;
            }
        }
    }

    warn!(code = %code, attempts, "No free code found, issuing last draw");
    code
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::conversation::ConversationRecord;
    use crate::error::StoreError;
    use crate::store::TravelerProfile;

    /// Reports a collision for the first `collisions` lookups.
    struct CollidingStore {
        collisions: u32,
        calls: AtomicU32,
        fail: bool,
        delay: Duration,
    }

    impl CollidingStore {
        fn new(collisions: u32) -> Self {
            Self {
                collisions,
                calls: AtomicU32::new(0),
                fail: false,
                delay: Duration::ZERO,
            }
        }
    }

    const DEADLINE: Duration = Duration::from_secs(5);

    #[async_trait]
    impl ProfileStore for CollidingStore {
        async fn code_exists(&self, _code: &str) -> Result<bool, StoreError> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(StoreError::Unavailable("offline".into()));
            }
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(n < self.collisions)
        }
        async fn save_profile(&self, _profile: &TravelerProfile) -> Result<(), StoreError> {
            Ok(())
        }
        async fn get_profile(&self, _id: &str) -> Result<Option<TravelerProfile>, StoreError> {
            Ok(None)
        }
        async fn save_conversation(
            &self,
            _id: &str,
            _record: &ConversationRecord,
        ) -> Result<(), StoreError> {
            Ok(())
        }
        async fn get_conversation(
            &self,
            _id: &str,
        ) -> Result<Option<ConversationRecord>, StoreError> {
            Ok(None)
        }
    }

    #[test]
    fn drawn_codes_have_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = draw_code("VIP", &mut rng);
            assert!(is_valid_code(&code), "{code}");
            let number: u16 = code[8..].parse().unwrap();
            assert!((1000..=9999).contains(&number));
        }
    }

    #[test]
    fn validates_code_format() {
        assert!(is_valid_code("JET-VIP-4821"));
        assert!(is_valid_code("JET-SOLO-1000"));
        assert!(!is_valid_code("JET-V-4821"));
        assert!(!is_valid_code("JET-VIPXX-4821"));
        assert!(!is_valid_code("JET-vip-4821"));
        assert!(!is_valid_code("JET-VIP-482"));
        assert!(!is_valid_code("XJET-VIP-4821"));
        // Reserved error code is not an issuable code.
        assert!(!is_valid_code(ERROR_CODE));
    }

    #[tokio::test]
    async fn redraws_on_collision() {
        let store = CollidingStore::new(2);
        let code = issue_code(&store, "ADV", 5, DEADLINE).await;
        assert!(code.starts_with("JET-ADV-"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_attempts() {
        let store = CollidingStore::new(u32::MAX);
        let code = issue_code(&store, "ECO", 4, DEADLINE).await;
        assert!(is_valid_code(&code));
        assert_eq!(store.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn store_failure_still_issues() {
        let store = CollidingStore {
            fail: true,
            ..CollidingStore::new(0)
        };
        let code = issue_code(&store, "STD", 3, DEADLINE).await;
        assert!(code.starts_with("JET-STD-"));
    }

    #[tokio::test]
    async fn slow_store_is_bounded_by_deadline() {
        let store = CollidingStore {
            delay: Duration::from_secs(30),
            ..CollidingStore::new(0)
        };
        let started = Instant::now();
        let code = issue_code(&store, "BUD", 5, Duration::from_millis(50)).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(code.starts_with("JET-BUD-"));
        assert!(is_valid_code(&code));
    }
}
