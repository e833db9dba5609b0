#![forbid(unsafe_code)]

//! Real-time driver: delayed commands block the calling thread.

use std::thread;

use crate::store::{Cmd, Model};

/// Drives a [`Model`] on the calling thread, sleeping through every
/// `Cmd::Delay` before dispatching its action.
///
/// Delays are served one at a time in the order they are produced, so two
/// in-flight sign-ins complete back to back rather than overlapping.
pub struct BlockingRunner<M: Model> {
    model: M,
}

impl<M: Model> BlockingRunner<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Run `Model::init` and its commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Apply `action` and run its commands to completion.
    pub fn dispatch(&mut self, action: M::Action) {
        let cmd = self.model.update(action);
        self.execute_cmd(cmd);
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Action>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(action) => self.dispatch(action),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_cmd(cmd);
                }
            }
            Cmd::Delay(after, action) => {
                let delay_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX);
                tracing::trace!(delay_ms, "sleeping");
                thread::sleep(after);
                self.dispatch(action);
            }
            Cmd::Log(line) => tracing::info!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{Action, AppStore, StoreConfig};

    #[test]
    fn login_completes_before_dispatch_returns() {
        let config = StoreConfig::default()
            .instant()
            .with_login_delay(Duration::from_millis(5));
        let mut runner = BlockingRunner::new(AppStore::new(config));
        runner.init();
        let start = Instant::now();
        runner.dispatch(Action::login("admin@booksmart.com", "password"));
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(runner.model().state().session.authenticated);
        assert!(!runner.model().state().session.auth_loading);
    }

    #[test]
    fn confirmation_opens_notification() {
        let mut runner = BlockingRunner::new(AppStore::new(StoreConfig::default().instant()));
        runner.dispatch(Action::confirm_email("ana@example.com", "123456"));
        let store = runner.into_model();
        let notification = store.state().notification.as_ref().unwrap();
        assert_eq!(notification.title, "Correo verificado");
    }
}
