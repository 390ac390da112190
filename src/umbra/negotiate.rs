//! Initial mode negotiation for a newly discovered output.

use tracing::{debug, info, warn};
use umbra_ipc::Mode;

use crate::backend::{Backend, ConnectorInfo, OutputId, ProposedState};

/// Outcome of a successful negotiation.
#[derive(Debug, Clone, Copy)]
pub struct Negotiated {
    pub mode: Mode,
    pub adaptive_sync: bool,
}

/// Picks a working mode for a new output and issues exactly one real commit.
///
/// Tries, in order: the mode the connector is already driving (when
/// `reuse_mode` is set), the preferred mode, then every remaining mode in
/// backend-reported order. Sometimes the preferred mode is not available due
/// to hardware constraints (e.g. GPU or cable bandwidth limitations); in
/// those cases falling back to lower modes beats a black screen.
///
/// Returns `None` and commits nothing when no mode passes its trial; the
/// output is then left unconfigured. Other outputs are unaffected.
pub fn negotiate_mode(
    backend: &mut dyn Backend,
    output: OutputId,
    connector: &ConnectorInfo,
    reuse_mode: bool,
    adaptive_sync: bool,
) -> Option<Negotiated> {
    let mut state = ProposedState {
        enabled: true,
        ..ProposedState::default()
    };

    let mut chosen = None;
    if reuse_mode {
        if let Some(current) = connector.current_mode {
            state.mode = Some(current);
            if backend.test(output, &state) {
                debug!("reusing current mode {current} for {}", connector.name);
                chosen = Some(current);
            }
        }
    }

    if chosen.is_none() {
        let preferred = connector.preferred_mode();
        state.mode = preferred;
        if preferred.is_some() && backend.test(output, &state) {
            chosen = preferred;
        } else if let Some(preferred) = preferred {
            debug!(
                "preferred mode rejected for {}, falling back to another mode",
                connector.name
            );
            for mode in &connector.modes {
                if *mode == preferred {
                    continue;
                }
                state.mode = Some(*mode);
                if backend.test(output, &state) {
                    chosen = Some(*mode);
                    break;
                }
            }
        }
    }

    let mode = match chosen {
        Some(mode) => mode,
        None => {
            warn!("no mode accepted for output {}", connector.name);
            return None;
        }
    };
    state.mode = Some(mode);

    // Adaptive sync is best-effort and must never block mode selection.
    if adaptive_sync {
        state.adaptive_sync = true;
        if backend.test(output, &state) {
            info!("adaptive sync enabled for output {}", connector.name);
        } else {
            state.adaptive_sync = false;
            debug!("failed to enable adaptive sync for output {}", connector.name);
        }
    }

    if let Err(err) = backend.commit(output, &state) {
        warn!("initial commit failed for output {}: {err:?}", connector.name);
        return None;
    }

    Some(Negotiated {
        mode,
        adaptive_sync: state.adaptive_sync,
    })
}
