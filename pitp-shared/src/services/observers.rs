// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Result;
use dashmap::DashMap;
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::snapshot::SessionSnapshot;

/// Per-subscriber channel depth
const SUBSCRIBER_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct Subscriber {
    pub id: Uuid,
    pub label: String,
    pub sender: broadcast::Sender<SessionSnapshot>,
}

/// Fans out one snapshot per applied transition to every subscriber
pub struct ObserverBus {
    subscribers: Arc<DashMap<Uuid, Subscriber>>,
    history: Mutex<VecDeque<SessionSnapshot>>,
    max_history_size: usize,
    max_subscribers: usize,
}

impl Default for ObserverBus {
    fn default() -> Self {
        Self::new(100, 16)
    }
}

impl ObserverBus {
    #[must_use]
    pub fn new(max_history_size: usize, max_subscribers: usize) -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            history: Mutex::new(VecDeque::with_capacity(max_history_size)),
            max_history_size,
            max_subscribers,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the maximum number of subscribers is reached.
    pub fn subscribe(
        &self,
        label: impl Into<String>,
    ) -> Result<(Uuid, broadcast::Receiver<SessionSnapshot>)> {
        if self.subscribers.len() >= self.max_subscribers {
            return Err(anyhow::anyhow!("Maximum number of subscribers reached"));
        }

        let id = Uuid::new_v4();
        let (sender, receiver) = broadcast::channel(SUBSCRIBER_CHANNEL_CAPACITY);
        let subscriber = Subscriber {
            id,
            label: label.into(),
            sender,
        };

        debug!("Observer {} ({id}) subscribed", subscriber.label);
        self.subscribers.insert(id, subscriber);

        Ok((id, receiver))
    }

    /// Drop a subscriber; its receiver sees the channel close
    pub fn unsubscribe(&self, id: &Uuid) {
        if let Some((_, subscriber)) = self.subscribers.remove(id) {
            debug!("Observer {} ({}) unsubscribed", subscriber.label, subscriber.id);
        }
    }

    /// Deliver a snapshot to every subscriber and record it in the history.
    /// Returns the number of subscribers it reached.
    pub fn publish(&self, snapshot: &SessionSnapshot) -> usize {
        self.record(snapshot);

        let mut delivered = 0;
        let mut failed = Vec::new();
        for subscriber in self.subscribers.iter() {
            match subscriber.sender.send(snapshot.clone()) {
                Ok(_) => delivered += 1,
                Err(_) => failed.push(subscriber.id),
            }
        }

        for id in failed {
            if let Some((_, subscriber)) = self.subscribers.remove(&id) {
                debug!("Dropped disconnected observer {}", subscriber.label);
            }
        }

        debug!(
            "Snapshot #{} delivered to {delivered} observers",
            snapshot.sequence
        );
        delivered
    }

    fn record(&self, snapshot: &SessionSnapshot) {
        let Ok(mut history) = self.history.lock() else {
            warn!("Snapshot history lock poisoned, skipping record");
            return;
        };
        if history.len() >= self.max_history_size {
            history.pop_front();
        }
        history.push_back(snapshot.clone());
    }

    /// Most recent snapshots, newest first
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<SessionSnapshot> {
        self.history
            .lock()
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn latest(&self) -> Option<SessionSnapshot> {
        self.recent(1).into_iter().next()
    }

    /// Subscriber and history counters for the console status view
    #[must_use]
    pub fn stats(&self) -> serde_json::Value {
        let total = self.subscribers.len();
        let active = self
            .subscribers
            .iter()
            .filter(|entry| entry.value().sender.receiver_count() > 0)
            .count();
        let history = self.history.lock().map(|h| h.len()).unwrap_or_default();

        serde_json::json!({
            "total_subscribers": total,
            "active_subscribers": active,
            "inactive_subscribers": total - active,
            "snapshots_in_history": history,
            "max_history_size": self.max_history_size,
            "max_subscribers": self.max_subscribers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use chrono::Utc;

    fn snapshot(sequence: u64) -> SessionSnapshot {
        SessionSnapshot {
            sequence,
            status: SessionStatus::Loading,
            episode: 1,
            checklist: vec![false; CHECKLIST_STEP_COUNT],
            pending_phase: IndicatorPhase::ZERO,
            screen: Screen::Readiness,
            occupancy: 0,
            revealed: false,
            listening_phase: IndicatorPhase::ZERO,
            language: UiLanguage::English,
            direction: TextDirection::Ltr,
            connection_lost: false,
            facility: FacilityMode::Prison,
            taken_at: Utc::now(),
        }
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let bus = ObserverBus::new(10, 4);
        let (_, mut first) = bus.subscribe("renderer").unwrap();
        let (_, mut second) = bus.subscribe("audit").unwrap();

        assert_eq!(bus.publish(&snapshot(1)), 2);
        assert_eq!(first.try_recv().unwrap().sequence, 1);
        assert_eq!(second.try_recv().unwrap().sequence, 1);
    }

    #[test]
    fn test_subscriber_limit() {
        let bus = ObserverBus::new(10, 1);
        let _keep = bus.subscribe("one").unwrap();
        assert!(bus.subscribe("two").is_err());
    }

    #[test]
    fn test_disconnected_subscribers_are_pruned() {
        let bus = ObserverBus::new(10, 4);
        let (_, receiver) = bus.subscribe("short-lived").unwrap();
        let (_, _kept) = bus.subscribe("kept").unwrap();
        drop(receiver);

        assert_eq!(bus.publish(&snapshot(1)), 1);
        assert_eq!(bus.stats()["total_subscribers"], 1);
    }

    #[test]
    fn test_unsubscribe_closes_receiver() {
        let bus = ObserverBus::new(10, 4);
        let (id, mut receiver) = bus.subscribe("renderer").unwrap();
        let (_, dropped) = bus.subscribe("audit").unwrap();
        drop(dropped);

        let stats = bus.stats();
        assert_eq!(stats["total_subscribers"], 2);
        assert_eq!(stats["inactive_subscribers"], 1);

        bus.unsubscribe(&id);
        assert!(matches!(
            receiver.try_recv(),
            Err(broadcast::error::TryRecvError::Closed)
        ));
        assert_eq!(bus.publish(&snapshot(1)), 0);
        assert_eq!(bus.stats()["total_subscribers"], 0);
        assert_eq!(bus.stats()["snapshots_in_history"], 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let bus = ObserverBus::new(3, 4);
        for sequence in 1..=5 {
            bus.publish(&snapshot(sequence));
        }
        let recent: Vec<u64> = bus.recent(10).iter().map(|s| s.sequence).collect();
        assert_eq!(recent, vec![5, 4, 3]);
        assert_eq!(bus.latest().map(|s| s.sequence), Some(5));
    }
}
