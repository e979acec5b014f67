use std::collections::VecDeque;

use crate::{
    controller::{BackendCommand, Controller, UiAction, ViewState},
    gateway::VisitorGateway,
    worker::perform,
};

/// Drives a [`Controller`] against a gateway one action at a time, awaiting
/// every resulting call (including follow-up reloads) before returning.
///
/// Notice expiry is not scheduled here: the success notice stays visible until
/// the caller applies the expiry itself.
pub struct VisitorSession<G: VisitorGateway> {
    controller: Controller,
    gateway: G,
}

impl<G: VisitorGateway> VisitorSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            controller: Controller::new(),
            gateway,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub async fn dispatch(&mut self, action: UiAction) -> &ViewState {
        let commands = self.controller.handle(action);
        self.drain(commands).await;
        self.controller.state()
    }

    async fn drain(&mut self, commands: Vec<BackendCommand>) {
        let mut queue = VecDeque::from(commands);
        while let Some(command) = queue.pop_front() {
            if let Some(event) = perform(&self.gateway, command).await {
                queue.extend(self.controller.apply(event));
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
