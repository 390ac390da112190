//! Scripted backend for tests.

use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::{bail, Result};
use umbra_ipc::Mode;

use super::{Backend, BackendEvent, ConnectorInfo, OutputId, ProposedState};

/// Backend whose trial and commit behavior is scripted by the test.
#[derive(Debug, Default)]
pub struct FakeBackend {
    next_id: u64,
    connectors: HashMap<OutputId, ConnectorInfo>,
    events: VecDeque<BackendEvent>,
    /// Modes that fail their trial commit.
    rejected_modes: HashSet<(OutputId, Mode)>,
    /// Outputs whose adaptive-sync trial fails.
    rejected_adaptive_sync: HashSet<OutputId>,
    /// Outputs whose real commits fail.
    failing_commits: HashSet<OutputId>,
    /// Log of real commits, in order.
    commits: Vec<(OutputId, ProposedState)>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_connector(&mut self, name: &str, modes: Vec<Mode>) -> OutputId {
        self.add_connector_full(name, modes, false, false)
    }

    pub fn add_connector_full(
        &mut self,
        name: &str,
        modes: Vec<Mode>,
        is_virtual: bool,
        non_desktop: bool,
    ) -> OutputId {
        self.next_id += 1;
        let id = OutputId::new(self.next_id);
        let connector = ConnectorInfo {
            name: name.to_owned(),
            make: String::from("Fake"),
            model: String::from("Fake-1"),
            modes,
            current_mode: None,
            vrr_supported: true,
            is_virtual,
            non_desktop,
        };
        self.connectors.insert(id, connector.clone());
        self.events
            .push_back(BackendEvent::Added { output: id, connector });
        id
    }

    pub fn connector(&self, output: OutputId) -> &ConnectorInfo {
        &self.connectors[&output]
    }

    pub fn set_current_mode(&mut self, output: OutputId, mode: Mode) {
        if let Some(connector) = self.connectors.get_mut(&output) {
            connector.current_mode = Some(mode);
        }
    }

    pub fn reject_mode(&mut self, output: OutputId, mode: Mode) {
        self.rejected_modes.insert((output, mode));
    }

    pub fn reject_adaptive_sync(&mut self, output: OutputId) {
        self.rejected_adaptive_sync.insert(output);
    }

    pub fn fail_commits(&mut self, output: OutputId) {
        self.failing_commits.insert(output);
    }

    pub fn commits(&self, output: OutputId) -> Vec<ProposedState> {
        self.commits
            .iter()
            .filter(|(id, _)| *id == output)
            .map(|(_, state)| *state)
            .collect()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    pub fn push_event(&mut self, event: BackendEvent) {
        self.events.push_back(event);
    }
}

impl Backend for FakeBackend {
    fn test(&mut self, output: OutputId, state: &ProposedState) -> bool {
        if !self.connectors.contains_key(&output) {
            return false;
        }
        if let Some(mode) = state.mode {
            if self.rejected_modes.contains(&(output, mode)) {
                return false;
            }
        }
        if state.adaptive_sync && self.rejected_adaptive_sync.contains(&output) {
            return false;
        }
        true
    }

    fn commit(&mut self, output: OutputId, state: &ProposedState) -> Result<()> {
        if !self.connectors.contains_key(&output) {
            bail!("unknown output {}", output.get());
        }
        if self.failing_commits.contains(&output) {
            bail!("scripted commit failure for {}", output.get());
        }
        if let Some(mode) = state.mode {
            if self.rejected_modes.contains(&(output, mode)) {
                bail!("scripted mode rejection for {}", output.get());
            }
        }
        self.commits.push((output, *state));
        Ok(())
    }

    fn commit_gamma(&mut self, output: OutputId) -> Result<()> {
        if self.failing_commits.contains(&output) {
            bail!("scripted gamma failure for {}", output.get());
        }
        Ok(())
    }

    fn create_virtual_output(&mut self, width: u16, height: u16) {
        let name = format!("HEADLESS-{}", self.next_id + 1);
        let mode = Mode {
            width,
            height,
            refresh_rate: 60_000,
            is_preferred: true,
        };
        self.add_connector_full(&name, vec![mode], true, false);
    }

    fn destroy_output(&mut self, output: OutputId) {
        if self.connectors.remove(&output).is_some() {
            self.events.push_back(BackendEvent::Removed { output });
        }
    }

    fn schedule_frame(&mut self, output: OutputId) {
        if self.connectors.contains_key(&output) {
            self.events.push_back(BackendEvent::Frame { output });
        }
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        self.events.drain(..).collect()
    }
}
