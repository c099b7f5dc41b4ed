//! Schedule selection dialogue state for handling conversation state with users.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Represents the conversation state for schedule selection
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleDialogueState {
    #[default]
    Idle,
    ChoosingCategory,
    ChoosingGroup {
        category: String,
    },
}

impl ScheduleDialogueState {
    /// Category picked in the previous step, if any
    pub fn selected_category(&self) -> Option<&str> {
        match self {
            ScheduleDialogueState::ChoosingGroup { category } => Some(category),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ScheduleDialogueState::Idle)
    }
}

/// Type alias for our schedule dialogue
pub type ScheduleDialogue = Dialogue<ScheduleDialogueState, InMemStorage<ScheduleDialogueState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_category() {
        assert_eq!(ScheduleDialogueState::Idle.selected_category(), None);
        assert_eq!(ScheduleDialogueState::ChoosingCategory.selected_category(), None);

        let state = ScheduleDialogueState::ChoosingGroup {
            category: "I курс".to_string(),
        };
        assert_eq!(state.selected_category(), Some("I курс"));
    }

    #[test]
    fn test_default_is_idle() {
        assert!(ScheduleDialogueState::default().is_idle());
    }
}
