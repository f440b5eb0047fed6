//! Water intake tracker with a periodic reminder.
//!
//! Intake is accumulated through [`WaterReminder::add_water`] on the caller's
//! thread. [`WaterReminder::start`] spawns a notifier thread that wakes on a
//! fixed-rate schedule and invokes the registered callback with a snapshot of
//! the intake. Both sides go through the same mutex, so a reminder always
//! reports a complete intake value.
//!
//! The notifier stops when the goal is met, on [`WaterReminder::cancel`], or
//! when the reminder is dropped. `cancel` joins the thread, so once it returns
//! no further reminders are delivered.

use crate::types::Progress;
use crate::{validate, Error, Result};
use serde::Serialize;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Callback invoked on the notifier thread for every reminder
pub type ReminderCallback = Arc<dyn Fn(Reminder) + Send + Sync>;

/// Snapshot delivered with each reminder
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Reminder {
    /// 1 for the first reminder of this tracker, then 2, 3, ...
    pub firing: u64,
    pub drunk_liters: f64,
    pub goal_liters: f64,
    pub remaining_liters: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WaterPhase {
    Tracking,
    Met,
}

/// Snapshot of the shared water state
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WaterState {
    pub phase: WaterPhase,
    pub goal_liters: f64,
    pub drunk_liters: f64,
    pub remaining_liters: f64,
    /// Period of the last started schedule
    pub interval: Option<Duration>,
}

struct Shared {
    progress: Progress,
    interval: Option<Duration>,
    firings: u64,
}

impl Shared {
    fn snapshot(&self) -> WaterState {
        WaterState {
            phase: if self.progress.is_met() {
                WaterPhase::Met
            } else {
                WaterPhase::Tracking
            },
            goal_liters: self.progress.goal,
            drunk_liters: self.progress.achieved,
            remaining_liters: self.progress.remaining(),
            interval: self.interval,
        }
    }
}

struct Notifier {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct WaterReminder {
    shared: Arc<Mutex<Shared>>,
    on_remind: Option<ReminderCallback>,
    notifier: Option<Notifier>,
}

impl WaterReminder {
    /// New tracker with nothing drunk yet; the goal must be positive
    pub fn new(goal_liters: f64) -> Result<Self> {
        let goal_liters = validate::positive(goal_liters)
            .map_err(|e| Error::InvalidInput(format!("goal: {}", e)))?;
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                progress: Progress::new(goal_liters, 0.0),
                interval: None,
                firings: 0,
            })),
            on_remind: None,
            notifier: None,
        })
    }

    /// Register the reminder callback, replacing any previous one
    ///
    /// Takes effect from the next [`start`](Self::start).
    pub fn on_remind<F>(&mut self, callback: F)
    where
        F: Fn(Reminder) + Send + Sync + 'static,
    {
        self.on_remind = Some(Arc::new(callback));
    }

    /// Remind every `interval_seconds` until the goal is met or cancelled
    pub fn start(&mut self, interval_seconds: i64) -> Result<()> {
        let seconds = validate::check_interval(interval_seconds)?;
        self.start_every(Duration::from_secs(seconds))
    }

    /// Remind on an arbitrary period
    ///
    /// A running schedule is replaced. Nothing is spawned when the goal is
    /// already met.
    pub fn start_every(&mut self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(Error::InvalidInterval("period must be greater than zero".into()));
        }
        let first = Instant::now().checked_add(period).ok_or_else(|| {
            Error::InvalidInterval(format!("{:?} is too long to schedule", period))
        })?;
        self.cancel();

        {
            let mut shared = self.lock();
            shared.interval = Some(period);
            if shared.progress.is_met() {
                tracing::debug!("Water goal already met, reminder not started");
                return Ok(());
            }
        }

        let (stop, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let callback = self.on_remind.clone();
        let handle = thread::Builder::new()
            .name("water-reminder".into())
            .spawn(move || run_notifier(shared, callback, first, period, stop_rx))?;

        tracing::info!("Water reminder started, every {:?}", period);
        self.notifier = Some(Notifier { stop, handle });
        Ok(())
    }

    /// Stop the notifier; returns whether one was running
    ///
    /// Safe to call repeatedly. Blocks until an in-flight reminder finishes.
    pub fn cancel(&mut self) -> bool {
        let Some(notifier) = self.notifier.take() else {
            return false;
        };
        let _ = notifier.stop.send(());
        if notifier.handle.join().is_err() {
            tracing::warn!("Water reminder thread panicked");
        }
        tracing::debug!("Water reminder cancelled");
        true
    }

    /// Record intake; reaching the goal stops the notifier
    pub fn add_water(&mut self, liters: f64) -> Result<WaterState> {
        let state = {
            let mut shared = self.lock();
            if shared.progress.is_met() {
                return Err(Error::GoalMet);
            }
            let liters = validate::check_amount(liters)?;
            shared.progress.add(liters);
            shared.snapshot()
        };

        if state.phase == WaterPhase::Met {
            tracing::info!(
                "Water goal met: {} of {} liters",
                state.drunk_liters,
                state.goal_liters
            );
            self.cancel();
        } else {
            tracing::debug!("Water: {} liters remaining", state.remaining_liters);
        }
        Ok(state)
    }

    pub fn state(&self) -> WaterState {
        self.lock().snapshot()
    }

    pub fn phase(&self) -> WaterPhase {
        self.state().phase
    }

    /// Liters drunk beyond the goal
    pub fn surplus(&self) -> f64 {
        self.lock().progress.surplus()
    }

    /// Reminders delivered so far
    pub fn firings(&self) -> u64 {
        self.lock().firings
    }

    pub fn is_running(&self) -> bool {
        self.notifier
            .as_ref()
            .is_some_and(|n| !n.handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for WaterReminder {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_notifier(
    shared: Arc<Mutex<Shared>>,
    callback: Option<ReminderCallback>,
    first: Instant,
    period: Duration,
    stop: mpsc::Receiver<()>,
) {
    let mut next = first;
    loop {
        match stop.recv_timeout(next.saturating_duration_since(Instant::now())) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        let Some(following) = next.checked_add(period) else {
            tracing::warn!("Water reminder schedule exhausted, stopping");
            break;
        };
        next = following;

        let reminder = {
            let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if shared.progress.is_met() {
                tracing::debug!("Water goal met, reminder stopping");
                break;
            }
            shared.firings += 1;
            Reminder {
                firing: shared.firings,
                drunk_liters: shared.progress.achieved,
                goal_liters: shared.progress.goal,
                remaining_liters: shared.progress.remaining(),
            }
        };

        tracing::info!(
            "Reminder {}: {} of {} liters",
            reminder.firing,
            reminder.drunk_liters,
            reminder.goal_liters
        );
        if let Some(callback) = &callback {
            callback(reminder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    const TICK: Duration = Duration::from_millis(30);

    fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        cond()
    }

    fn recording(goal: f64) -> (WaterReminder, Arc<Mutex<Vec<Reminder>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reminder = WaterReminder::new(goal).unwrap();
        let sink = Arc::clone(&log);
        reminder.on_remind(move |r| sink.lock().unwrap().push(r));
        (reminder, log)
    }

    #[test]
    fn test_fires_every_second_until_met() {
        let (mut reminder, log) = recording(2.0);
        reminder.start(1).unwrap();

        assert!(wait_until(Duration::from_secs(5), || log.lock().unwrap().len() >= 2));
        assert!(log.lock().unwrap().iter().all(|r| r.drunk_liters < r.goal_liters));

        let state = reminder.add_water(2.5).unwrap();
        assert_eq!(state.phase, WaterPhase::Met);
        assert!(!reminder.is_running());

        let count = log.lock().unwrap().len();
        thread::sleep(Duration::from_millis(1500));
        assert_eq!(log.lock().unwrap().len(), count);
        assert_eq!(reminder.firings(), count as u64);
        assert_eq!(reminder.surplus(), 0.5);
    }

    #[test]
    fn test_reminders_report_latest_intake() {
        let (mut reminder, log) = recording(3.0);
        reminder.start_every(TICK).unwrap();

        reminder.add_water(0.5).unwrap();
        reminder.add_water(0.25).unwrap();
        assert!(wait_until(Duration::from_secs(2), || {
            log.lock().unwrap().iter().any(|r| r.drunk_liters == 0.75)
        }));

        let reminders = log.lock().unwrap().clone();
        let firings: Vec<u64> = reminders.iter().map(|r| r.firing).collect();
        let expected: Vec<u64> = (1..=reminders.len() as u64).collect();
        assert_eq!(firings, expected);
        assert!(reminders
            .iter()
            .all(|r| r.drunk_liters == 0.0 || r.drunk_liters == 0.5 || r.drunk_liters == 0.75));
    }

    #[test]
    fn test_cancel_stops_firings_and_is_idempotent() {
        let fired = Arc::new(AtomicU64::new(0));
        let mut reminder = WaterReminder::new(2.0).unwrap();
        let counter = Arc::clone(&fired);
        reminder.on_remind(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        reminder.start_every(TICK).unwrap();

        assert!(wait_until(Duration::from_secs(2), || fired.load(Ordering::SeqCst) >= 1));
        assert!(reminder.cancel());
        let count = fired.load(Ordering::SeqCst);

        thread::sleep(TICK * 5);
        assert_eq!(fired.load(Ordering::SeqCst), count);
        assert!(!reminder.cancel());
        assert!(!reminder.is_running());
        assert_eq!(reminder.phase(), WaterPhase::Tracking);
    }

    #[test]
    fn test_drop_stops_notifier() {
        let fired = Arc::new(AtomicU64::new(0));
        {
            let mut reminder = WaterReminder::new(1.0).unwrap();
            let counter = Arc::clone(&fired);
            reminder.on_remind(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            reminder.start_every(TICK).unwrap();
            assert!(wait_until(Duration::from_secs(2), || fired.load(Ordering::SeqCst) >= 1));
        }
        let count = fired.load(Ordering::SeqCst);
        thread::sleep(TICK * 5);
        assert_eq!(fired.load(Ordering::SeqCst), count);
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let (mut reminder, log) = recording(2.0);
        reminder.start_every(Duration::from_secs(60)).unwrap();
        reminder.start_every(TICK).unwrap();

        assert!(wait_until(Duration::from_secs(2), || !log.lock().unwrap().is_empty()));
        assert_eq!(reminder.state().interval, Some(TICK));
    }

    #[test]
    fn test_invalid_interval() {
        let mut reminder = WaterReminder::new(2.0).unwrap();
        assert!(matches!(reminder.start(0), Err(Error::InvalidInterval(_))));
        assert!(matches!(reminder.start(-3), Err(Error::InvalidInterval(_))));
        assert!(matches!(
            reminder.start_every(Duration::ZERO),
            Err(Error::InvalidInterval(_))
        ));
        assert!(!reminder.is_running());
    }

    #[test]
    fn test_unschedulable_interval_is_rejected() {
        let mut reminder = WaterReminder::new(2.0).unwrap();
        assert!(matches!(reminder.start(i64::MAX), Err(Error::InvalidInterval(_))));
        assert!(matches!(
            reminder.start_every(Duration::MAX),
            Err(Error::InvalidInterval(_))
        ));
        assert!(!reminder.is_running());
        assert_eq!(reminder.state().interval, None);
    }

    #[test]
    fn test_rejected_interval_keeps_running_schedule() {
        let mut reminder = WaterReminder::new(2.0).unwrap();
        reminder.start(3600).unwrap();
        assert!(reminder.start(i64::MAX).is_err());
        assert!(reminder.is_running());
        assert_eq!(reminder.state().interval, Some(Duration::from_secs(3600)));
        assert!(reminder.cancel());
    }

    #[test]
    fn test_invalid_amount_leaves_state() {
        let mut reminder = WaterReminder::new(2.0).unwrap();
        reminder.add_water(0.5).unwrap();
        assert!(matches!(reminder.add_water(0.0), Err(Error::InvalidAmount(_))));
        assert!(matches!(reminder.add_water(-1.0), Err(Error::InvalidAmount(_))));
        assert_eq!(reminder.state().drunk_liters, 0.5);
        assert!(matches!(WaterReminder::new(0.0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_add_after_met_is_rejected() {
        let mut reminder = WaterReminder::new(1.0).unwrap();
        reminder.add_water(1.0).unwrap();
        assert!(matches!(reminder.add_water(0.2), Err(Error::GoalMet)));
        assert_eq!(reminder.state().drunk_liters, 1.0);
    }

    #[test]
    fn test_start_after_met_spawns_nothing() {
        let (mut reminder, log) = recording(1.0);
        reminder.add_water(1.5).unwrap();
        reminder.start_every(TICK).unwrap();

        assert!(!reminder.is_running());
        thread::sleep(TICK * 4);
        assert!(log.lock().unwrap().is_empty());
    }
}
