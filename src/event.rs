// src/event.rs

/// ===============================
/// Control events
/// ===============================

/// An event the knob sends to its host.
///
/// The host only needs to know *that* the value changed; the committed value
/// is carried along so observers don't have to read it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    ValueChanged { value: f32 },
}

/// ===============================
/// Observers
/// ===============================

/// Callback invoked with the committed value on every value-changed event.
pub type ValueChangedObserver = Box<dyn FnMut(f32)>;

/// Host notification sinks registered on a controller.
#[derive(Default)]
pub struct Observers {
    value_changed: Vec<ValueChangedObserver>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value_changed(&mut self, observer: ValueChangedObserver) {
        self.value_changed.push(observer);
    }

    pub fn clear(&mut self) {
        self.value_changed.clear();
    }

    pub fn len(&self) -> usize {
        self.value_changed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_changed.is_empty()
    }

    /// Deliver an event to every registered observer.
    pub fn send(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::ValueChanged { value } => {
                for observer in self.value_changed.iter_mut() {
                    observer(value);
                }
            }
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("value_changed", &self.value_changed.len())
            .finish()
    }
}
