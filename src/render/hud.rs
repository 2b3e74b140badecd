use crate::game::{GameState, Phase};

/// What the controls and text displays around the board show for a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// The start control works before the first game and after a game over
    pub start_enabled: bool,
    /// The restart control only appears once a game has ended
    pub restart_visible: bool,
    pub score_text: String,
    pub message_text: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            start_enabled: state.phase != Phase::Running,
            restart_visible: state.phase == Phase::GameOver,
            score_text: state.score.to_string(),
            message_text: state.message().unwrap_or_default().to_string(),
        }
    }
}
