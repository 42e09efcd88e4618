// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Event bus: named events fanned out to ordered listener chains.
//!
//! The bus maps an event name (case-insensitive) to the listeners subscribed
//! to it, in subscription order. Order is semantically meaningful: a listener
//! that returns [`Control::Halt`] vetoes every listener after it for that
//! publish call. The bus holds no other per-event state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::errors::{BusError, DispatchError};
use crate::observability::messages::bus::{EventHalted, EventPublished};
use crate::observability::messages::StructuredLog;
use crate::orchestrator::Hub;

/// Control-flow verdict from a listener or worker.
///
/// `Halt` is the distinguished "stop processing this event" signal. It is not
/// a failure: the bus swallows it and ends the publish call cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Halt,
}

/// Identity of the component that published an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub kind: String,
    pub id: String,
}

impl Sender {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// A recipient of published events.
///
/// The hub is passed through so listeners can resolve flows and republish
/// without holding a reference back into the engine.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn on_event(
        &self,
        hub: &Arc<Hub>,
        event: &str,
        ctx: &mut Context,
        sender: &Sender,
    ) -> Result<Control, DispatchError>;
}

/// Handle returned by `subscribe`, needed to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    index: usize,
}

/// Publish/subscribe dispatcher over named events.
#[derive(Default)]
pub struct EventBus {
    // Keyed by lowercased event name. Unsubscribed slots become `None` so
    // earlier handles stay valid.
    listeners: HashMap<String, Vec<Option<Arc<dyn EventListener>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener to the event's chain and return its handle.
    pub fn subscribe(&mut self, event: &str, listener: Arc<dyn EventListener>) -> Subscription {
        let chain = self.listeners.entry(event.to_lowercase()).or_default();
        chain.push(Some(listener));
        Subscription {
            index: chain.len() - 1,
        }
    }

    /// Remove a subscription. Fails if the event name or handle is unknown.
    pub fn unsubscribe(&mut self, event: &str, sub: Subscription) -> Result<(), BusError> {
        let key = event.to_lowercase();
        let chain = self.listeners.get_mut(&key).ok_or(BusError::UnknownEvent {
            event: key.clone(),
        })?;
        match chain.get_mut(sub.index) {
            Some(slot @ Some(_)) => {
                *slot = None;
                Ok(())
            }
            _ => Err(BusError::UnknownSubscription {
                event: key,
                index: sub.index,
            }),
        }
    }

    /// Number of live subscriptions for an event name.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .get(&event.to_lowercase())
            .map(|chain| chain.iter().flatten().count())
            .unwrap_or(0)
    }

    /// Dispatch an event to its listener chain, in subscription order.
    ///
    /// Publishing to an event nobody subscribed to is a silent no-op. Each
    /// listener is awaited before the next runs; a `Halt` verdict stops the
    /// iteration and returns `Ok`, any error aborts the remaining listeners
    /// and propagates unmodified.
    pub async fn publish(
        &self,
        hub: &Arc<Hub>,
        event: &str,
        ctx: &mut Context,
        sender: &Sender,
    ) -> Result<(), DispatchError> {
        let key = event.to_lowercase();
        let chain = match self.listeners.get(&key) {
            Some(chain) => chain,
            None => return Ok(()), // no listeners, that's OK
        };

        EventPublished {
            event: &key,
            sender_id: &sender.id,
            listener_count: chain.iter().flatten().count(),
        }
        .log();

        for (position, listener) in chain.iter().enumerate() {
            let Some(listener) = listener else { continue };
            if listener.on_event(hub, &key, ctx, sender).await? == Control::Halt {
                EventHalted {
                    event: &key,
                    position,
                }
                .log();
                break;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&String, usize> = self
            .listeners
            .iter()
            .map(|(event, chain)| (event, chain.iter().flatten().count()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Listener that records its label and answers with a fixed verdict.
    struct Recorder {
        label: &'static str,
        verdict: Result<Control, ()>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl EventListener for Recorder {
        async fn on_event(
            &self,
            _hub: &Arc<Hub>,
            _event: &str,
            _ctx: &mut Context,
            _sender: &Sender,
        ) -> Result<Control, DispatchError> {
            self.calls.lock().unwrap().push(self.label);
            self.verdict.map_err(|_| DispatchError::WorkerFailed {
                id: self.label.to_string(),
                reason: "boom".to_string(),
            })
        }
    }

    fn recorder(
        label: &'static str,
        verdict: Result<Control, ()>,
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn EventListener> {
        Arc::new(Recorder {
            label,
            verdict,
            calls: Arc::clone(calls),
        })
    }

    fn empty_hub() -> Arc<Hub> {
        Arc::new(Hub::for_tests())
    }

    #[tokio::test]
    async fn publish_without_subscriptions_is_a_no_op() {
        let bus = EventBus::new();
        let mut ctx = Context::new();
        let result = bus
            .publish(&empty_hub(), "nobody_home", &mut ctx, &Sender::new("t", "s1"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn listeners_run_in_subscription_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe("tick", recorder("first", Ok(Control::Continue), &calls));
        bus.subscribe("tick", recorder("second", Ok(Control::Continue), &calls));
        bus.subscribe("tick", recorder("third", Ok(Control::Continue), &calls));

        let mut ctx = Context::new();
        bus.publish(&empty_hub(), "tick", &mut ctx, &Sender::new("t", "s1"))
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn event_names_match_case_insensitively() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe("Timer_Tick", recorder("only", Ok(Control::Continue), &calls));

        let mut ctx = Context::new();
        bus.publish(&empty_hub(), "TIMER_TICK", &mut ctx, &Sender::new("t", "s1"))
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["only"]);
        assert_eq!(bus.listener_count("timer_tick"), 1);
    }

    #[tokio::test]
    async fn halt_vetoes_the_rest_of_the_chain() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe("tick", recorder("first", Ok(Control::Continue), &calls));
        bus.subscribe("tick", recorder("veto", Ok(Control::Halt), &calls));
        bus.subscribe("tick", recorder("never", Ok(Control::Continue), &calls));

        let mut ctx = Context::new();
        let result = bus
            .publish(&empty_hub(), "tick", &mut ctx, &Sender::new("t", "s1"))
            .await;

        // Halt ends the publish cleanly, it is not an error.
        assert!(result.is_ok());
        assert_eq!(*calls.lock().unwrap(), vec!["first", "veto"]);
    }

    #[tokio::test]
    async fn listener_failure_aborts_remaining_listeners() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe("tick", recorder("first", Ok(Control::Continue), &calls));
        bus.subscribe("tick", recorder("bad", Err(()), &calls));
        bus.subscribe("tick", recorder("never", Ok(Control::Continue), &calls));

        let mut ctx = Context::new();
        let result = bus
            .publish(&empty_hub(), "tick", &mut ctx, &Sender::new("t", "s1"))
            .await;

        assert!(matches!(
            result,
            Err(DispatchError::WorkerFailed { ref id, .. }) if id == "bad"
        ));
        assert_eq!(*calls.lock().unwrap(), vec!["first", "bad"]);
    }

    #[tokio::test]
    async fn unsubscribe_skips_the_listener_but_keeps_handles_stable() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let first = bus.subscribe("tick", recorder("first", Ok(Control::Continue), &calls));
        let second = bus.subscribe("tick", recorder("second", Ok(Control::Continue), &calls));
        bus.subscribe("tick", recorder("third", Ok(Control::Continue), &calls));

        bus.unsubscribe("tick", first).unwrap();
        assert_eq!(bus.listener_count("tick"), 2);

        let mut ctx = Context::new();
        bus.publish(&empty_hub(), "tick", &mut ctx, &Sender::new("t", "s1"))
            .await
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["second", "third"]);

        // The handle issued before the unsubscribe still names its own slot.
        bus.unsubscribe("tick", second).unwrap();
        assert_eq!(bus.listener_count("tick"), 1);
    }

    #[test]
    fn unsubscribe_unknown_event_or_handle_fails() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sub = bus.subscribe("tick", recorder("only", Ok(Control::Continue), &calls));

        assert_eq!(
            bus.unsubscribe("no_such_event", sub),
            Err(BusError::UnknownEvent {
                event: "no_such_event".to_string()
            })
        );

        bus.unsubscribe("tick", sub).unwrap();
        assert_eq!(
            bus.unsubscribe("tick", sub),
            Err(BusError::UnknownSubscription {
                event: "tick".to_string(),
                index: 0
            })
        );
    }
}
