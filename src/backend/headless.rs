//! Headless backend.
//!
//! Backs virtual outputs and tests: every connector is synthetic, all trials
//! and commits succeed, frames only happen when scheduled.

use std::collections::{HashMap, VecDeque};

use anyhow::{bail, ensure, Result};
use umbra_ipc::Mode;

use super::{Backend, BackendEvent, ConnectorInfo, OutputId, ProposedState};

const DEFAULT_REFRESH: u32 = 60_000;

#[derive(Debug)]
struct HeadlessOutput {
    connector: ConnectorInfo,
    current: ProposedState,
}

/// Backend without any hardware behind it.
#[derive(Debug, Default)]
pub struct Headless {
    next_id: u64,
    outputs: HashMap<OutputId, HeadlessOutput>,
    events: VecDeque<BackendEvent>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current committed state of an output, if it exists.
    pub fn current_state(&self, output: OutputId) -> Option<&ProposedState> {
        self.outputs.get(&output).map(|o| &o.current)
    }
}

impl Backend for Headless {
    fn test(&mut self, output: OutputId, _state: &ProposedState) -> bool {
        self.outputs.contains_key(&output)
    }

    fn commit(&mut self, output: OutputId, state: &ProposedState) -> Result<()> {
        let Some(out) = self.outputs.get_mut(&output) else {
            bail!("unknown output {}", output.get());
        };
        out.current = *state;
        Ok(())
    }

    fn commit_gamma(&mut self, output: OutputId) -> Result<()> {
        ensure!(
            self.outputs.contains_key(&output),
            "unknown output {}",
            output.get()
        );
        Ok(())
    }

    fn create_virtual_output(&mut self, width: u16, height: u16) {
        self.next_id += 1;
        let id = OutputId::new(self.next_id);

        let connector = ConnectorInfo {
            name: format!("HEADLESS-{}", self.next_id),
            make: String::from("umbra"),
            model: String::from("headless"),
            modes: vec![Mode {
                width,
                height,
                refresh_rate: DEFAULT_REFRESH,
                is_preferred: true,
            }],
            current_mode: None,
            vrr_supported: false,
            is_virtual: true,
            non_desktop: false,
        };

        self.outputs.insert(
            id,
            HeadlessOutput {
                connector: connector.clone(),
                current: ProposedState::default(),
            },
        );
        self.events.push_back(BackendEvent::Added {
            output: id,
            connector,
        });
    }

    fn destroy_output(&mut self, output: OutputId) {
        if self.outputs.remove(&output).is_some() {
            self.events.push_back(BackendEvent::Removed { output });
        }
    }

    fn schedule_frame(&mut self, output: OutputId) {
        if self.outputs.contains_key(&output) {
            self.events.push_back(BackendEvent::Frame { output });
        }
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        self.events.drain(..).collect()
    }
}
