use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use supplymap_core::{CategoryFilter, EntityId, SeverityFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Focus
    /// Click on an entity. Clicking the selected entity again clears it.
    SelectEntity {
        id: EntityId,
    },
    /// Pointer entered (`Some`) or left (`None`) an entity.
    HoverEntity {
        id: Option<EntityId>,
    },
    /// Explicit "Close" on the detail panel.
    ClearSelection,

    // Filters
    SetSearchTerm {
        term: String,
    },
    SetCategoryFilter(CategoryFilter),
    SetSeverityFilter(SeverityFilter),

    // Viewport
    ZoomIn,
    ZoomOut,

    // Panels
    ToggleDataSources,

    /// Client-side navigation requested by a reorder action.
    Navigate {
        href: String,
    },
}

impl Event {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectEntity { .. } => "SelectEntity",
            Event::HoverEntity { .. } => "HoverEntity",
            Event::ClearSelection => "ClearSelection",
            Event::SetSearchTerm { .. } => "SetSearchTerm",
            Event::SetCategoryFilter(_) => "SetCategoryFilter",
            Event::SetSeverityFilter(_) => "SetSeverityFilter",
            Event::ZoomIn => "ZoomIn",
            Event::ZoomOut => "ZoomOut",
            Event::ToggleDataSources => "ToggleDataSources",
            Event::Navigate { .. } => "Navigate",
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        tracing::trace!(event = event.name(), "publish");
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener.
    /// Returns the number of events delivered.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
            delivered += 1;
        }
        delivered
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplymap_core::{CategoryId, Severity};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Event>,
    }

    impl EventListener for Recorder {
        fn handle_event(&mut self, event: &Event) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn test_event_bus_publish_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        sender
            .send(Event::SelectEntity { id: EntityId(101) })
            .unwrap();

        match receiver.recv().unwrap() {
            Event::SelectEntity { id } => assert_eq!(id, EntityId(101)),
            other => panic!("Expected SelectEntity, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_preserves_order() {
        let bus = EventBus::new();
        bus.publish(Event::SetCategoryFilter(CategoryFilter::Only(CategoryId(2))));
        bus.publish(Event::SetSeverityFilter(SeverityFilter::Only(Severity::High)));
        bus.publish(Event::ZoomIn);

        let mut recorder = Recorder::default();
        assert_eq!(bus.dispatch_to(&mut recorder), 3);
        assert_eq!(recorder.seen[2], Event::ZoomIn);
        assert_eq!(
            recorder.seen[0],
            Event::SetCategoryFilter(CategoryFilter::Only(CategoryId(2)))
        );

        // Queue is drained.
        assert_eq!(bus.dispatch_to(&mut recorder), 0);
    }

    #[test]
    fn test_event_serializes() {
        let json = serde_json::to_string(&Event::Navigate {
            href: "/orders/new?item=ppe".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"Navigate":{"href":"/orders/new?item=ppe"}}"#);
    }
}
