//! Runtime bridge between the UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{BackendCommand, BackendEvent, EventSink, HttpVisitorGateway, Worker};
use crossbeam_channel::{Receiver, Sender};

use crate::controller::events::UiEvent;

struct UiEventSink(Sender<UiEvent>);

/// Blocks the emitting worker task while the UI queue is full; every outcome
/// has to reach the controller or its busy flag or delete marker never clears.
impl EventSink for UiEventSink {
    fn emit(&self, event: BackendEvent) {
        if self.0.send(UiEvent::Backend(event)).is_err() {
            tracing::debug!("ui closed; dropping backend event");
        }
    }
}

/// Spawns the worker thread. It exits once every command sender is dropped;
/// the pending success-notice timer is cancelled with it.
pub fn launch(api_base_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let gateway = HttpVisitorGateway::new(api_base_url.clone());
            let mut worker = Worker::new(Arc::new(gateway), Arc::new(UiEventSink(ui_tx.clone())));
            tracing::info!(api_base_url = %api_base_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::BackendReady { api_base_url });

            while let Ok(cmd) = cmd_rx.recv() {
                worker.dispatch(cmd);
            }
            tracing::info!("backend worker stopping");
        });
    });
}
