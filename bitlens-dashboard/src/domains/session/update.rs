use super::messages::Message;
use super::state::{LoadState, SessionState};

/// Apply one transition to the session.
///
/// Total over every state: no transition has a precondition, and fields a
/// transition does not name are left untouched.
pub fn update_session(state: &mut SessionState, message: Message) {
    match message {
        Message::SetCredential(credential) => {
            state.credential = credential;
            clear_outcome(state);
        }
        Message::SetView(view) => {
            state.view = view;
            clear_outcome(state);
        }
        Message::BeginLoad => {
            state.load = LoadState::Loading;
        }
        Message::Succeed { payload, at } => {
            state.load = LoadState::Loaded { payload };
            state.last_updated = Some(at);
        }
        Message::Fail(message) => {
            state.load = LoadState::Errored { message };
        }
        Message::Reset => clear_outcome(state),
    }
}

fn clear_outcome(state: &mut SessionState) {
    state.load = LoadState::Idle;
    state.last_updated = None;
}
