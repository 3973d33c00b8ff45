use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

/// Default time after a successful submission during which resubmitting is blocked.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Idle,
    Armed { remaining_secs: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CooldownState {
    pub last_success: Option<DateTime<Utc>>,
    pub remaining_secs: u64,
}

/// Session-scoped resubmission guard. Advisory only: it lives in memory and a
/// reload starts a fresh session, so duplicates are also rejected server-side.
#[derive(Debug)]
pub struct CooldownGuard {
    window_secs: u64,
    state: Mutex<CooldownState>,
}

impl CooldownGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window_secs: window.as_secs(),
            state: Mutex::new(CooldownState::default()),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    fn lock(&self) -> MutexGuard<'_, CooldownState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Idle → Armed(window) after a successful submission.
    pub fn arm(&self) -> CooldownStatus {
        let mut state = self.lock();
        state.last_success = Some(Utc::now());
        state.remaining_secs = self.window_secs;
        status_of(&state)
    }

    /// One elapsed second.
    pub fn tick(&self) -> CooldownStatus {
        self.advance(1)
    }

    pub fn advance(&self, secs: u64) -> CooldownStatus {
        let mut state = self.lock();
        state.remaining_secs = state.remaining_secs.saturating_sub(secs);
        status_of(&state)
    }

    pub fn status(&self) -> CooldownStatus {
        status_of(&self.lock())
    }

    /// Ok when a submit may proceed, otherwise the seconds left.
    pub fn check(&self) -> Result<(), u64> {
        match self.status() {
            CooldownStatus::Idle => Ok(()),
            CooldownStatus::Armed { remaining_secs } => Err(remaining_secs),
        }
    }

    pub fn reset(&self) {
        *self.lock() = CooldownState::default();
    }

    pub fn snapshot(&self) -> CooldownState {
        self.lock().clone()
    }
}

impl Default for CooldownGuard {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

fn status_of(state: &CooldownState) -> CooldownStatus {
    match state.remaining_secs {
        0 => CooldownStatus::Idle,
        remaining_secs => CooldownStatus::Armed { remaining_secs },
    }
}

/// Decrements a guard once per second until it is idle. Aborted when dropped.
pub struct CooldownTicker {
    handle: JoinHandle<()>,
}

impl CooldownTicker {
    /// Must be called from within a Tokio runtime.
    pub fn spawn(guard: Arc<CooldownGuard>) -> Self {
        let handle = tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

            loop {
                interval.tick().await;
                if guard.tick() == CooldownStatus::Idle {
                    break;
                }
            }

            tracing::debug!("Cooldown elapsed");
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CooldownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let guard = CooldownGuard::default();
        assert_eq!(guard.status(), CooldownStatus::Idle);
        assert_eq!(guard.snapshot(), CooldownState::default());
        assert!(guard.check().is_ok());
    }

    #[test]
    fn arm_then_count_down() {
        let guard = CooldownGuard::new(Duration::from_secs(3));
        assert_eq!(guard.arm(), CooldownStatus::Armed { remaining_secs: 3 });
        assert!(guard.snapshot().last_success.is_some());
        assert_eq!(guard.check(), Err(3));

        assert_eq!(guard.tick(), CooldownStatus::Armed { remaining_secs: 2 });
        assert_eq!(guard.tick(), CooldownStatus::Armed { remaining_secs: 1 });
        assert_eq!(guard.tick(), CooldownStatus::Idle);
        assert_eq!(guard.tick(), CooldownStatus::Idle);
        assert!(guard.check().is_ok());
    }

    #[test]
    fn advancing_past_the_window_releases() {
        let guard = CooldownGuard::default();
        guard.arm();
        assert_eq!(guard.advance(299), CooldownStatus::Armed { remaining_secs: 1 });
        assert_eq!(guard.advance(10), CooldownStatus::Idle);
    }

    #[test]
    fn zero_window_never_arms() {
        let guard = CooldownGuard::new(Duration::ZERO);
        assert_eq!(guard.arm(), CooldownStatus::Idle);
    }

    #[test]
    fn reset_clears_state() {
        let guard = CooldownGuard::default();
        guard.arm();
        guard.reset();
        assert_eq!(guard.snapshot(), CooldownState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_down_and_stops() {
        let guard = Arc::new(CooldownGuard::new(Duration::from_secs(3)));
        guard.arm();
        let ticker = CooldownTicker::spawn(guard.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(guard.status(), CooldownStatus::Armed { remaining_secs: 2 });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(guard.status(), CooldownStatus::Idle);

        tokio::task::yield_now().await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_ticker_stops_countdown() {
        let guard = Arc::new(CooldownGuard::new(Duration::from_secs(10)));
        guard.arm();
        let ticker = CooldownTicker::spawn(guard.clone());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(ticker);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(guard.status(), CooldownStatus::Armed { remaining_secs: 8 });
    }
}
