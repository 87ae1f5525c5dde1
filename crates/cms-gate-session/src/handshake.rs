//! Poll task behind `authenticate()`.
//!
//! # Design
//! - A repeating tick plus one deadline, both owned by the waiting future. Dropping the
//!   poll (on success, timeout, or cancellation of the caller) stops the ticker.
//! - The first check happens one interval after the wait starts.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep, interval_at, sleep_until};

/// Delay between session checks while waiting for a login.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Ceiling after which a pending `authenticate()` gives up.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(5 * 60);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
/// Stand-in for deadlines that do not fit in an `Instant` (roughly thirty years out).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Timing of the authentication handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatePolicy {
    /// Delay between session checks.
    pub poll_interval: Duration,
    /// Maximum time to wait for a login.
    pub timeout: Duration,
}

impl Default for AuthenticatePolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_AUTH_TIMEOUT,
        }
    }
}

pub(crate) enum PollEvent {
    Tick,
    Expired,
}

pub(crate) struct SessionPoll {
    ticker: Interval,
    deadline: Pin<Box<Sleep>>,
}

impl SessionPoll {
    pub(crate) fn start(policy: AuthenticatePolicy) -> Self {
        let period = policy.poll_interval.max(MIN_POLL_INTERVAL);
        let now = Instant::now();
        let mut ticker = interval_at(saturating_after(now, period), period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            ticker,
            deadline: Box::pin(sleep_until(saturating_after(now, policy.timeout))),
        }
    }

    /// Wait for the next check or the deadline, whichever comes first.
    ///
    /// A tick due at the same instant as the deadline is delivered first.
    pub(crate) async fn next(&mut self) -> PollEvent {
        tokio::select! {
            biased;
            _ = self.ticker.tick() => PollEvent::Tick,
            () = &mut self.deadline => PollEvent::Expired,
        }
    }
}

fn saturating_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{AuthenticatePolicy, PollEvent, SessionPoll};

    #[test]
    fn default_policy_matches_reference_timing() {
        let policy = AuthenticatePolicy::default();
        assert_eq!(policy.poll_interval, Duration::from_millis(500));
        assert_eq!(policy.timeout, Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_interval_until_deadline() {
        let started = Instant::now();
        let mut poll = SessionPoll::start(AuthenticatePolicy {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(2),
        });

        let mut ticks = 0;
        loop {
            match poll.next().await {
                PollEvent::Tick => {
                    ticks += 1;
                    assert_eq!(started.elapsed(), Duration::from_millis(500) * ticks);
                }
                PollEvent::Expired => break,
            }
        }
        assert_eq!(ticks, 4);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn unrepresentable_timeout_still_ticks() {
        let started = Instant::now();
        let mut poll = SessionPoll::start(AuthenticatePolicy {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(u64::MAX),
        });
        assert!(matches!(poll.next().await, PollEvent::Tick));
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped() {
        let mut poll = SessionPoll::start(AuthenticatePolicy {
            poll_interval: Duration::ZERO,
            timeout: Duration::from_millis(3),
        });
        assert!(matches!(poll.next().await, PollEvent::Tick));
    }
}
