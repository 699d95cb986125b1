use std::fmt;
use std::sync::{Mutex, RwLock};

use crate::model::ViewState;

type Observer = Box<dyn Fn(&ViewState) + Send + Sync>;

/// Holds the single active [`ViewState`] and notifies observers on every
/// transition, synchronously and in transition order.
///
/// There is one logical writer (the orchestrator); observers are expected to
/// only read the state handed to them and must not call back into the cell.
pub struct ViewStateCell {
    state: Mutex<ViewState>,
    observers: RwLock<Vec<Observer>>,
}

impl ViewStateCell {
    /// A fresh cell starts in [`ViewState::Idle`].
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewState::Idle),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the active state.
    pub fn current(&self) -> ViewState {
        self.state.lock().expect("view state lock poisoned").clone()
    }

    /// Register an observer invoked on every subsequent transition.
    pub fn subscribe(&self, observer: impl Fn(&ViewState) + Send + Sync + 'static) {
        self.observers
            .write()
            .expect("observer list lock poisoned")
            .push(Box::new(observer));
    }

    /// Replace the active state, notifying observers before returning.
    pub fn transition(&self, next: ViewState) {
        let mut state = self.state.lock().expect("view state lock poisoned");
        *state = next;

        let observers = self.observers.read().expect("observer list lock poisoned");
        for observer in observers.iter() {
            observer(&state);
        }
    }
}

impl Default for ViewStateCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewStateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateCell")
            .field("state", &self.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_idle() {
        let cell = ViewStateCell::new();
        assert_eq!(cell.current(), ViewState::Idle);
    }

    #[test]
    fn observers_see_every_transition_in_order() {
        let cell = ViewStateCell::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorder = Arc::clone(&seen);
        cell.subscribe(move |state| {
            recorder
                .lock()
                .expect("recorder lock")
                .push(state.clone());
        });

        cell.transition(ViewState::Loading);
        cell.transition(ViewState::error("boom"));
        cell.transition(ViewState::Loading);

        let seen = seen.lock().expect("recorder lock");
        assert_eq!(
            *seen,
            vec![
                ViewState::Loading,
                ViewState::error("boom"),
                ViewState::Loading,
            ]
        );
    }

    #[test]
    fn notification_happens_before_transition_returns() {
        let cell = ViewStateCell::new();
        let seen = Arc::new(Mutex::new(false));

        let flag = Arc::clone(&seen);
        cell.subscribe(move |_| {
            *flag.lock().expect("flag lock") = true;
        });

        cell.transition(ViewState::Loading);
        assert!(*seen.lock().expect("flag lock"));
    }

    #[test]
    fn current_reflects_last_transition() {
        let cell = ViewStateCell::new();
        cell.transition(ViewState::Loading);
        cell.transition(ViewState::error("no luck"));
        assert_eq!(cell.current(), ViewState::error("no luck"));
    }
}
