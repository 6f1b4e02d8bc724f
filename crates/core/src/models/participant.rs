//! Participant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Card, User};

/// A user's presence in a room, with their vote for the current round.
///
/// Whether a participant has voted is derived from `vote` rather than
/// tracked as a separate flag, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: Uuid,
    pub name: String,
    pub avatar_color: Option<String>,
    pub vote: Option<Card>,
    pub is_active: bool,
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            avatar_color: user.avatar_color.clone(),
            vote: None,
            is_active: true,
            last_seen: Utc::now(),
        }
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    /// Clear the vote for a new round
    pub fn clear_vote(&mut self) {
        self.vote = None;
    }
}
