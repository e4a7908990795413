//! Typed intents and notifications decoupling the UI layers (terminal
//! commands, window hotkeys) from the digit store and the lifecycle
//! controller. Intents are handled sequentially by a single coordinator
//! task; internal failures are logged, never surfaced to the UI.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::controller::VizController;
use crate::digits::{DigitStore, MAX_DIGITS};
use crate::viz::VizKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    ChangeVisualization(VizKind),
    ContinueDigits(usize),
    ResetWalk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    DigitCountChanged(usize),
    LoadingStateChanged(bool),
}

pub struct Coordinator {
    store: DigitStore,
    controller: Arc<Mutex<VizController>>,
    notify: mpsc::UnboundedSender<Notification>,
}

impl Coordinator {
    pub fn new(
        store: DigitStore,
        controller: Arc<Mutex<VizController>>,
        notify: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        Coordinator {
            store,
            controller,
            notify,
        }
    }

    pub async fn handle(&self, intent: Intent) {
        match intent {
            Intent::ChangeVisualization(kind) => {
                let snapshot = self.store.snapshot();
                let mut controller = self.controller.lock().unwrap();
                if let Err(e) = controller.select(kind, snapshot) {
                    log::error!("could not activate {kind}: {e}");
                }
            }
            Intent::ContinueDigits(target) => {
                if self.store.count() >= MAX_DIGITS {
                    // Cap reached: nothing to load, just restate the count.
                    self.send(Notification::DigitCountChanged(self.store.count()));
                    return;
                }
                self.send(Notification::LoadingStateChanged(true));
                let count = self.store.grow(target).await;
                self.controller
                    .lock()
                    .unwrap()
                    .notify_digits_grew(self.store.snapshot());
                self.send(Notification::DigitCountChanged(count));
                self.send(Notification::LoadingStateChanged(false));
            }
            Intent::ResetWalk => {
                self.controller.lock().unwrap().reset_active();
            }
        }
    }

    fn send(&self, notification: Notification) {
        // A closed notification channel just means nobody is listening.
        let _ = self.notify.send(notification);
    }
}

/// Spawn the coordinator task. Returns the intent sender for UI layers and
/// the notification receiver for whoever reports state back to the user.
pub fn spawn(
    store: DigitStore,
    controller: Arc<Mutex<VizController>>,
) -> (
    mpsc::UnboundedSender<Intent>,
    mpsc::UnboundedReceiver<Notification>,
) {
    let (intent_tx, mut intent_rx) = mpsc::unbounded_channel();
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let coordinator = Coordinator::new(store, controller, notify_tx);
    tokio::spawn(async move {
        while let Some(intent) = intent_rx.recv().await {
            coordinator.handle(intent).await;
        }
        log::debug!("intent channel closed, coordinator stopping");
    });
    (intent_tx, notify_rx)
}
