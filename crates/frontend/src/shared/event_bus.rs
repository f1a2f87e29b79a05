//! Простая шина событий между независимыми компонентами.
//!
//! A subscriber keeps the returned [`Subscription`]; dropping it (normally in
//! `on_cleanup`) detaches the handler, so a disposed view is never called.

use leptos::prelude::*;
use std::sync::Arc;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Shared through context; clones point at the same registry.
pub struct EventBus<T: 'static> {
    registry: ArcStoredValue<Registry<T>>,
}

impl<T: 'static> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventBus<T> {
    pub fn new() -> Self {
        Self {
            registry: ArcStoredValue::new(Registry {
                next_id: 1,
                handlers: Vec::new(),
            }),
        }
    }

    #[must_use = "the handler is removed when the subscription is dropped"]
    pub fn subscribe(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let mut id = 0;
        self.registry.update_value(|r| {
            id = r.next_id;
            r.next_id += 1;
            r.handlers.push((id, Arc::new(handler)));
        });
        let registry = self.registry.clone();
        Subscription {
            detach: Some(Box::new(move || {
                registry.update_value(|r| r.handlers.retain(|(hid, _)| *hid != id));
            })),
        }
    }

    /// Handlers run on a copy of the list and may subscribe or emit themselves.
    pub fn emit(&self, event: T) {
        let snapshot: Vec<Handler<T>> = self
            .registry
            .with_value(|r| r.handlers.iter().map(|(_, h)| h.clone()).collect());
        for handler in snapshot {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.with_value(|r| r.handlers.len())
    }
}

/// Отписка при drop.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_live_subscribers_only() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let first = {
            let seen = seen.clone();
            bus.subscribe(move |v| {
                seen.fetch_add(*v as usize, Ordering::SeqCst);
            })
        };
        let second = {
            let seen = seen.clone();
            bus.subscribe(move |v| {
                seen.fetch_add(*v as usize * 10, Ordering::SeqCst);
            })
        };

        bus.emit(1);
        assert_eq!(seen.load(Ordering::SeqCst), 11);

        drop(first);
        bus.emit(1);
        assert_eq!(seen.load(Ordering::SeqCst), 21);
        assert_eq!(bus.subscriber_count(), 1);

        second.unsubscribe();
        bus.emit(1);
        assert_eq!(seen.load(Ordering::SeqCst), 21);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_emit_again() {
        let bus: EventBus<u32> = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let _sub = {
            let bus2 = bus.clone();
            let count = count.clone();
            bus.subscribe(move |v| {
                count.fetch_add(1, Ordering::SeqCst);
                if *v > 0 {
                    bus2.emit(v - 1);
                }
            })
        };
        bus.emit(2);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus: EventBus<()> = EventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }
}
