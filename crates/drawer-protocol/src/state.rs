/// # Connection State Machine
///
/// Tracks one open → write → close sequence against a single device handle.
///
/// ```text
///            connect()             open ok
///   ┌──────┐ ─────────► ┌─────────┐ ───────► ┌──────┐ ◄──────────┐
///   │ Idle │            │ Opening │          │ Open │            │ write done
///   └──────┘ ◄───────── └─────────┘          └──┬───┘ ──────► ┌──┴──────┐
///      ▲      no device /                       │     write() │ Writing │
///      │      open failed                       │             └────┬────┘
///      │                                        │ disconnect()       │ disconnect()
///      │           close ok / close failed  ┌───▼─────┐            │
///      └────────────────────────────────────┤ Closing │ ◄──────────┘
///                                           └─────────┘
/// ```
///
/// ## State Invariants
///
/// - **Idle**: no handle held
/// - **Opening**: a handle is being resolved or opened, not yet held
/// - **Open**: exactly one open handle held, no writer locked
/// - **Writing**: the held handle's writer is locked for one write
/// - **Closing**: the handle has been taken out of the controller and is closing
///
/// Closing always ends in Idle, whatever the transport reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ConnectionState {
    #[default]
    Idle,
    Opening,
    Open,
    Writing,
    Closing,
}

impl ConnectionState {
    /// Validate if transition to new_state is allowed from current state
    pub fn can_transition_to(&self, new_state: ConnectionState) -> bool {
        use ConnectionState::*;

        match (self, new_state) {
            (Idle, Opening) => true, // connect()

            (Opening, Open) => true, // open succeeded
            (Opening, Idle) => true, // no device, or open failed

            (Open, Writing) => true, // write()
            (Open, Closing) => true, // disconnect()

            (Writing, Open) => true,    // write finished, lock released
            (Writing, Closing) => true, // disconnect() while a write is pending

            (Closing, Idle) => true, // close finished or failed

            _ => false,
        }
    }
}

/// Process-wide busy indicator owned by the activation gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActivationState {
    #[default]
    Idle,
    Busy,
}

impl ActivationState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Label for the trigger control
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Idle => "Open Cash Drawer",
            Self::Busy => "Opening...",
        }
    }

    pub fn can_transition_to(&self, new_state: ActivationState) -> bool {
        matches!(
            (self, new_state),
            (Self::Idle, Self::Busy) | (Self::Busy, Self::Idle)
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_is_valid() {
        use ConnectionState::*;
        let path = [Idle, Opening, Open, Writing, Open, Closing, Idle];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{:?} → {:?} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_failure_paths_return_to_idle() {
        assert!(ConnectionState::Opening.can_transition_to(ConnectionState::Idle));
        assert!(ConnectionState::Closing.can_transition_to(ConnectionState::Idle));
        assert!(ConnectionState::Writing.can_transition_to(ConnectionState::Closing));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot write or close without opening
        assert!(!ConnectionState::Idle.can_transition_to(ConnectionState::Writing));
        assert!(!ConnectionState::Idle.can_transition_to(ConnectionState::Closing));
        // Cannot skip open
        assert!(!ConnectionState::Idle.can_transition_to(ConnectionState::Open));
        // Closing never reopens
        assert!(!ConnectionState::Closing.can_transition_to(ConnectionState::Open));
        // Cannot connect twice
        assert!(!ConnectionState::Open.can_transition_to(ConnectionState::Opening));
    }

    #[test]
    fn test_activation_transitions() {
        assert!(ActivationState::Idle.can_transition_to(ActivationState::Busy));
        assert!(ActivationState::Busy.can_transition_to(ActivationState::Idle));
        assert!(!ActivationState::Busy.can_transition_to(ActivationState::Busy));
        assert!(!ActivationState::Idle.can_transition_to(ActivationState::Idle));
        assert_ne!(
            ActivationState::Idle.button_label(),
            ActivationState::Busy.button_label()
        );
    }

    #[test]
    fn test_serialization() {
        let state = ConnectionState::Writing;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: ConnectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
