#![forbid(unsafe_code)]

//! Deterministic store simulator for testing.
//!
//! `StoreSimulator` runs a [`Model`] on a virtual clock. Delayed commands
//! are queued with their due time and only fire when the test advances the
//! clock, so simulated latency costs nothing and ordering is reproducible.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use booksmart_store::{Action, AppStore, StoreSimulator};
//!
//! let mut sim = StoreSimulator::new(AppStore::default());
//! sim.init();
//! sim.send(Action::login("admin@booksmart.com", "password"));
//! sim.advance(Duration::from_millis(999));
//! assert!(!sim.model().state().session.authenticated);
//! sim.advance(Duration::from_millis(1));
//! assert!(sim.model().state().session.authenticated);
//! ```

use std::time::Duration;

use crate::store::{Cmd, Model};

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Action dispatched immediately.
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Action scheduled after a delay.
    Delay(Duration),
    /// Log line emitted.
    Log(String),
}

struct Pending<A> {
    due: Duration,
    seq: u64,
    action: A,
}

/// Deterministic driver for a [`Model`].
pub struct StoreSimulator<M: Model> {
    model: M,
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending<M::Action>>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
}

impl<M: Model> StoreSimulator<M> {
    /// Wrap `model`. Call [`init`](Self::init) before sending actions.
    pub fn new(model: M) -> Self {
        Self {
            model,
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Run `Model::init` and its commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Dispatch `action` at the current virtual time.
    pub fn send(&mut self, action: M::Action) {
        let cmd = self.model.update(action);
        self.execute_cmd(cmd);
    }

    /// Move the clock forward by `by`, firing every delayed action that falls
    /// due, earliest first. Actions due at the same instant fire in the order
    /// they were scheduled.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some(index) = self.next_due(Some(target)) {
            self.fire(index);
        }
        self.now = target;
    }

    /// Fire delayed actions until none remain, advancing the clock to each.
    pub fn settle(&mut self) {
        while let Some(index) = self.next_due(None) {
            self.fire(index);
        }
    }

    fn next_due(&self, limit: Option<Duration>) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| limit.is_none_or(|limit| p.due <= limit))
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)
    }

    fn fire(&mut self, index: usize) {
        let pending = self.pending.remove(index);
        self.now = pending.due;
        let now_ms = u64::try_from(self.now.as_millis()).unwrap_or(u64::MAX);
        tracing::trace!(now_ms, "delayed action due");
        self.send(pending.action);
    }

    /// Current virtual time since construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Delayed actions not yet fired.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Lines emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Every command executed so far.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Action>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Msg(action) => {
                self.command_log.push(CmdRecord::Msg);
                self.send(action);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for cmd in cmds {
                    self.execute_cmd(cmd);
                }
            }
            Cmd::Delay(after, action) => {
                self.command_log.push(CmdRecord::Delay(after));
                let seq = self.next_seq;
                self.next_seq += 1;
                self.pending.push(Pending {
                    due: self.now + after,
                    seq,
                    action,
                });
            }
            Cmd::Log(line) => {
                self.command_log.push(CmdRecord::Log(line.clone()));
                self.logs.push(line);
            }
        }
    }
}
