//! Room model - the shared session unit

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

use super::{Card, Participant, TriangleState, User};

/// A 6-character uppercase alphanumeric room code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    pub const LEN: usize = 6;
    const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Generate a fresh code, drawn uniformly from the 36-symbol alphabet.
    /// Collisions are not checked; only one room is ever live at a time.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..Self::LEN)
            .map(|_| Self::ALPHABET[rng.gen_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse user input into a code, normalizing case
    pub fn parse(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        let well_formed = code.len() == Self::LEN
            && code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

        if well_formed {
            Ok(Self(code))
        } else {
            Err(Error::InvalidRoomCode(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The in-progress estimation round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentStory {
    pub label: String,
    pub votes_revealed: bool,
    pub consensus_vote: Option<Card>,
}

/// One participant's vote as captured in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryVote {
    pub user_id: Uuid,
    pub user_name: String,
    pub vote: Card,
}

/// Immutable snapshot of a closed round; appended once, never edited.
///
/// A round revealed with no votes archives `consensus_vote: None`, which
/// stays distinct from a genuine consensus of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryHistory {
    pub story_label: String,
    pub consensus_vote: Option<Card>,
    pub votes: Vec<StoryVote>,
    pub timestamp: DateTime<Utc>,
}

/// Poker state for a room: the current round plus closed rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokerState {
    pub current_story: CurrentStory,
    pub history: Vec<StoryHistory>,
}

/// A live session room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub code: RoomCode,
    /// Fixed at creation to the creating user; never transferred
    pub admin_user_id: Uuid,
    pub participants: Vec<Participant>,
    pub poker: PokerState,
    pub triangle: TriangleState,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room with its admin as the sole participant
    pub fn new(code: RoomCode, admin: &User) -> Self {
        Self {
            code,
            admin_user_id: admin.user_id,
            participants: vec![Participant::new(admin)],
            poker: PokerState::default(),
            triangle: TriangleState::default(),
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.admin_user_id == user_id
    }

    /// First participant entry for a user, if present
    pub fn participant(&self, user_id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn voted_count(&self) -> usize {
        self.participants.iter().filter(|p| p.has_voted()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_format() {
        for _ in 0..32 {
            let code = RoomCode::generate();
            assert_eq!(code.as_str().len(), RoomCode::LEN);
            assert!(code
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_parse_normalizes_case() {
        let code = RoomCode::parse("abc123").unwrap();
        assert_eq!(code.as_str(), "ABC123");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        assert!(RoomCode::parse("ABC12").is_err());
        assert!(RoomCode::parse("ABC1234").is_err());
        assert!(RoomCode::parse("ABC-12").is_err());
        assert!(RoomCode::parse("").is_err());
    }

    #[test]
    fn test_new_room_has_admin_as_sole_participant() {
        let admin = User::new("Alice");
        let room = Room::new(RoomCode::generate(), &admin);

        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].user_id, admin.user_id);
        assert!(room.is_admin(admin.user_id));
        assert_eq!(room.poker.current_story, CurrentStory::default());
        assert!(room.poker.history.is_empty());
    }
}
