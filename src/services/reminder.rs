use crate::bot::transport::Transport;
use crate::utils::logging::{log_reminder_event, log_transport_error};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teloxide::types::ChatId;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Delay before the first reminder after `/start`.
pub const FIRST_TICK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub interval: Duration,
    pub first_delay: Duration,
    pub fallback_text: String,
}

impl ReminderSettings {
    pub fn new(interval: Duration, fallback_text: impl Into<String>) -> Self {
        Self {
            interval,
            first_delay: FIRST_TICK_DELAY,
            fallback_text: fallback_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    Restarted,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn notice(self, interval_secs: u64) -> String {
        match self {
            StartOutcome::Started => {
                format!("I'm starting sending the reminders every {interval_secs}s.")
            }
            StartOutcome::Restarted => {
                format!("I'm re-starting sending the reminders every {interval_secs}s.")
            }
            StartOutcome::AlreadyRunning => {
                format!("I'm already sending the reminders every {interval_secs}s.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

pub const STOP_NOTICE: &str = "I'm stopping sending the reminders.";

/// Point-in-time view of a chat's reminder record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReminder {
    pub chat_id: ChatId,
    pub interval_seconds: u64,
    pub enabled: bool,
    pub next_fire_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderCounts {
    pub active: usize,
    pub paused: usize,
}

struct ArmedTimer {
    handle: JoinHandle<()>,
    first_fire: DateTime<Utc>,
}

struct ChatSlot {
    interval: Duration,
    // Some while the chat is active. Pausing takes and aborts it, so a chat
    // can never own more than one timer.
    timer: Option<ArmedTimer>,
}

impl ChatSlot {
    fn summary(&self) -> SlotSummary {
        SlotSummary {
            interval: self.interval,
            first_fire: self.timer.as_ref().map(|t| t.first_fire),
        }
    }
}

/// Copy of a chat's record kept in the outer map. Readers use it instead of
/// the per-chat lock, which may be held across a network send.
#[derive(Debug, Clone, Copy)]
struct SlotSummary {
    interval: Duration,
    first_fire: Option<DateTime<Utc>>,
}

impl SlotSummary {
    fn snapshot(&self, chat_id: ChatId, now: DateTime<Utc>) -> ChatReminder {
        ChatReminder {
            chat_id,
            interval_seconds: self.interval.as_secs(),
            enabled: self.first_fire.is_some(),
            next_fire_time: self
                .first_fire
                .map(|first| next_fire_after(first, self.interval, now)),
        }
    }
}

type ChatCell = Arc<tokio::sync::Mutex<Option<ChatSlot>>>;

/// Owns one recurring reminder timer per chat.
///
/// The outer map lock is held only briefly and never across an await. All
/// state transitions for a chat happen under that chat's own async lock, so
/// commands for one chat apply in order while other chats proceed
/// independently. Each transition publishes a summary of the record before any
/// notice goes out, and snapshots read only those summaries.
pub struct ReminderScheduler {
    transport: Arc<dyn Transport>,
    settings: ReminderSettings,
    chats: Mutex<HashMap<ChatId, ChatCell>>,
    summaries: Mutex<HashMap<ChatId, SlotSummary>>,
}

impl ReminderScheduler {
    pub fn new(transport: Arc<dyn Transport>, settings: ReminderSettings) -> Self {
        Self {
            transport,
            settings,
            chats: Mutex::new(HashMap::new()),
            summaries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn start(&self, chat_id: ChatId) -> StartOutcome {
        let cell = self.cell(chat_id);
        let mut slot = cell.lock().await;

        let outcome = match slot.as_ref().map(|s| s.timer.is_some()) {
            None => StartOutcome::Started,
            Some(false) => StartOutcome::Restarted,
            Some(true) => StartOutcome::AlreadyRunning,
        };

        let interval = match outcome {
            StartOutcome::Started => {
                let interval = self.settings.interval;
                *slot = Some(ChatSlot {
                    interval,
                    timer: Some(self.arm(chat_id, interval)),
                });
                interval
            }
            StartOutcome::Restarted | StartOutcome::AlreadyRunning => {
                let Some(existing) = slot.as_mut() else {
                    return outcome;
                };
                if existing.timer.is_none() {
                    existing.timer = Some(self.arm(chat_id, existing.interval));
                }
                existing.interval
            }
        };

        if let Some(current) = slot.as_ref() {
            self.publish(chat_id, current.summary());
        }

        log_reminder_event(&format!("{outcome:?}"), chat_id, None);
        self.notify(chat_id, &outcome.notice(interval.as_secs())).await;
        outcome
    }

    pub async fn stop(&self, chat_id: ChatId) -> StopOutcome {
        let Some(cell) = self.existing_cell(chat_id) else {
            return StopOutcome::NotRunning;
        };
        let mut slot = cell.lock().await;

        let Some(timer) = slot.as_mut().and_then(|s| s.timer.take()) else {
            return StopOutcome::NotRunning;
        };
        timer.handle.abort();
        if let Some(current) = slot.as_ref() {
            self.publish(chat_id, current.summary());
        }

        log_reminder_event("Stopped", chat_id, None);
        self.notify(chat_id, STOP_NOTICE).await;
        StopOutcome::Stopped
    }

    /// Never waits on a chat that is mid-transition.
    pub async fn state(&self, chat_id: ChatId) -> Option<ChatReminder> {
        let summaries = self.summaries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        summaries.get(&chat_id).map(|s| s.snapshot(chat_id, Utc::now()))
    }

    pub async fn counts(&self) -> ReminderCounts {
        let summaries = self.summaries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        summaries
            .values()
            .fold(ReminderCounts::default(), |mut counts, summary| {
                if summary.first_fire.is_some() {
                    counts.active += 1;
                } else {
                    counts.paused += 1;
                }
                counts
            })
    }

    /// Number of timer tasks still alive across all chats.
    pub async fn live_timers(&self) -> usize {
        let mut live = 0;
        for (_, cell) in self.cells() {
            if let Some(timer) = cell.lock().await.as_ref().and_then(|s| s.timer.as_ref()) {
                if !timer.handle.is_finished() {
                    live += 1;
                }
            }
        }
        live
    }

    /// Cancels every armed timer. Records are kept.
    pub async fn shutdown(&self) {
        for (chat_id, cell) in self.cells() {
            let mut slot = cell.lock().await;
            if let Some(current) = slot.as_mut() {
                if let Some(timer) = current.timer.take() {
                    timer.handle.abort();
                }
                self.publish(chat_id, current.summary());
            }
        }
    }

    fn arm(&self, chat_id: ChatId, interval: Duration) -> ArmedTimer {
        let transport = Arc::clone(&self.transport);
        let fallback = self.settings.fallback_text.clone();
        let first_delay = self.settings.first_delay;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + first_delay, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                send_reminder(transport.as_ref(), chat_id, &fallback).await;
            }
        });

        let first_fire = Utc::now()
            + chrono::Duration::from_std(first_delay).unwrap_or_else(|_| chrono::Duration::zero());
        ArmedTimer { handle, first_fire }
    }

    async fn notify(&self, chat_id: ChatId, text: &str) {
        if let Err(e) = self.transport.send_message(chat_id, text, None).await {
            log_transport_error("send reminder notice", chat_id, &e.to_string());
        }
    }

    fn cell(&self, chat_id: ChatId) -> ChatCell {
        let mut chats = self.chats.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(chats.entry(chat_id).or_default())
    }

    fn existing_cell(&self, chat_id: ChatId) -> Option<ChatCell> {
        let chats = self.chats.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        chats.get(&chat_id).cloned()
    }

    fn cells(&self) -> Vec<(ChatId, ChatCell)> {
        let chats = self.chats.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        chats.iter().map(|(id, cell)| (*id, Arc::clone(cell))).collect()
    }

    fn publish(&self, chat_id: ChatId, summary: SlotSummary) {
        let mut summaries = self.summaries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        summaries.insert(chat_id, summary);
    }
}

/// One tick: forward the chat's pinned message back into it, or post the
/// fallback text when nothing is pinned. Failures are logged and the tick is
/// abandoned; the timer keeps running.
pub async fn send_reminder(transport: &dyn Transport, chat_id: ChatId, fallback: &str) {
    log_reminder_event("Sending reminder", chat_id, None);

    match transport.pinned_message(chat_id).await {
        Ok(Some(pinned)) => {
            if let Err(e) = transport.forward_message(chat_id, chat_id, pinned).await {
                log_transport_error("forward pinned message", chat_id, &e.to_string());
            }
        }
        Ok(None) => {
            if let Err(e) = transport.send_message(chat_id, fallback, None).await {
                log_transport_error("send fallback reminder", chat_id, &e.to_string());
            }
        }
        Err(e) => log_transport_error("fetch pinned message", chat_id, &e.to_string()),
    }
}

fn next_fire_after(first_fire: DateTime<Utc>, interval: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    if now <= first_fire {
        return first_fire;
    }
    let period = match chrono::Duration::from_std(interval) {
        Ok(p) if p > chrono::Duration::zero() => p,
        _ => return first_fire,
    };
    let elapsed = (now - first_fire).num_milliseconds();
    let step = period.num_milliseconds();
    let ticks = elapsed / step + 1;
    first_fire + chrono::Duration::milliseconds(ticks * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_notices_mention_interval() {
        assert_eq!(
            StartOutcome::Started.notice(1800),
            "I'm starting sending the reminders every 1800s."
        );
        assert_eq!(
            StartOutcome::Restarted.notice(60),
            "I'm re-starting sending the reminders every 60s."
        );
        assert_eq!(
            StartOutcome::AlreadyRunning.notice(60),
            "I'm already sending the reminders every 60s."
        );
    }

    #[test]
    fn test_next_fire_after_first_tick() {
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let interval = Duration::from_secs(1800);

        let before = first - chrono::Duration::seconds(1);
        assert_eq!(next_fire_after(first, interval, before), first);

        let later = first + chrono::Duration::minutes(45);
        assert_eq!(
            next_fire_after(first, interval, later),
            first + chrono::Duration::minutes(60)
        );

        let exactly = first + chrono::Duration::minutes(30);
        assert_eq!(
            next_fire_after(first, interval, exactly),
            first + chrono::Duration::minutes(60)
        );
    }
}
