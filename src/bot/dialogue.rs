use serde::{Deserialize, Serialize};

/// A situation being assembled across the multi-step flow. Lives inside the
/// dialogue state until the user confirms or cancels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SituationDraft {
    pub topic: String,
    pub description: String,
    pub desired_outcome: String,
    pub emotions: Vec<String>,
    pub mood_rating: Option<i64>,
}

/// Where the user currently is in a multi-step conversation.
///
/// Free-text steps are handled by the message handler, button steps by the
/// callback handler. Drafts ride along in the state variants so a `/cancel`
/// drops everything at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ConversationState {
    /// Main menu; waiting for a menu selection.
    #[default]
    SelectingAction,

    // Situation flow
    ReceivingTopic,
    ReceivingDescription {
        topic: String,
    },
    ReceivingOutcome {
        topic: String,
        description: String,
    },
    SelectingEmotions {
        draft: SituationDraft,
    },
    RatingSituationMood {
        draft: SituationDraft,
    },
    ConfirmingSituation {
        draft: SituationDraft,
    },
    RatingAdvice {
        advice_id: String,
    },

    // Journal flow
    WritingJournal,
    RatingJournalMood {
        content: String,
    },
    TaggingEntry {
        content: String,
        mood_rating: i64,
        tags: Vec<String>,
    },

    // Resolution flow
    ReceivingResolution {
        situation_id: String,
    },
}
