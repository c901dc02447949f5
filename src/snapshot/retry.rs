//! Limits on how many times a snapshot may be retried.

/// The number of attempts allowed by [`RetryPolicy::default`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1 << 16;

/// How many collect-and-verify attempts a snapshot may make before giving up.
///
/// A snapshot has to start over whenever an update lands while it is
/// reading. Under a steady enough stream of updates that can go on forever,
/// so by default the number of attempts is capped and the caller receives
/// [`Error::SnapshotUnstable`](crate::Error::SnapshotUnstable) instead.
///
/// # Examples
///
/// ```
/// use mrmw_snapshot::snapshot::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
///
/// assert_eq!(RetryPolicy::default().max_attempts(), Some(DEFAULT_MAX_ATTEMPTS));
/// assert_eq!(RetryPolicy::bounded(0).max_attempts(), Some(1));
/// assert_eq!(RetryPolicy::unbounded().max_attempts(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Allows at most `max_attempts` attempts. Every snapshot makes at least
    /// one attempt, so `0` is treated as `1`.
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
        }
    }

    /// Retries until a snapshot succeeds, however long that takes.
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Returns the attempt limit, or `None` if there is no limit.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Returns whether another attempt may follow `attempts` failed ones.
    pub(crate) fn allows_retry(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_ATTEMPTS)
    }
}
