//! Session store - the room/participant state machine
//!
//! All live state sits in one store owned by the application root and
//! mutated only through its operations. There is no remote authority:
//! "joining" a room that is not already live fabricates a fresh local room
//! under the requested code.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::invariants::assert_room_invariants;
use crate::models::{
    Card, CurrentStory, Participant, Room, RoomCode, StoryHistory, StoryVote, User,
};

/// Which mini-application is in front
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Poker,
    Triangle,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Poker => write!(f, "poker"),
            Page::Triangle => write!(f, "triangle"),
        }
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poker" => Ok(Page::Poker),
            "triangle" => Ok(Page::Triangle),
            other => Err(Error::UnknownPage(other.to_string())),
        }
    }
}

/// Result of a poker mutation. `Skipped` means preconditions were missing
/// (no room, or no current user with a participant entry) and the store is
/// unchanged; callers can tell the difference without any of these paths
/// ever erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Applied,
    Skipped,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Holds the current user, the single live room, and navigation state
#[derive(Debug)]
pub struct SessionStore {
    current_user: Option<User>,
    room: Option<Room>,
    current_page: Page,
    sidebar_open: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current_user: None,
            room: None,
            current_page: Page::Poker,
            sidebar_open: true,
        }
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self {
            current_user: None,
            room: None,
            current_page: config.ui.default_page,
            sidebar_open: config.ui.sidebar_open,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Replace the current user unconditionally
    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    /// Create a room with the current user as admin and sole participant.
    /// The room code is returned for sharing.
    pub fn create_room(&mut self) -> Result<RoomCode> {
        let user = self.current_user.as_ref().ok_or_else(|| {
            Error::Precondition("User must be set before creating a room".to_string())
        })?;

        let code = RoomCode::generate();
        let room = Room::new(code.clone(), user);
        assert_room_invariants(&room);

        info!(room = %code, admin = %user.name, "room created");
        self.room = Some(room);
        Ok(code)
    }

    /// Join a room. With no live room this fabricates a fresh one under
    /// `code` with `user` as admin; no remote authority is consulted. With
    /// a live room it appends a participant entry - there is no
    /// duplicate-user check, so joining twice with one user id yields two
    /// entries.
    pub fn join_room(&mut self, code: RoomCode, user: User) {
        match self.room.as_mut() {
            None => {
                info!(room = %code, user = %user.name, "joining with no live room; fabricating");
                self.room = Some(Room::new(code, &user));
            }
            Some(room) => {
                info!(room = %room.code, user = %user.name, "participant joined");
                room.participants.push(Participant::new(&user));
            }
        }

        if let Some(room) = &self.room {
            assert_room_invariants(room);
        }
    }

    /// Clear the room unconditionally
    pub fn leave_room(&mut self) {
        if let Some(room) = &self.room {
            info!(room = %room.code, "room left");
        }
        self.room = None;
    }

    /// Overwrite the current story label verbatim. Admin gating is a
    /// presentation concern; the store accepts the write from anyone.
    pub fn update_story_label(&mut self, label: &str) -> Outcome {
        let Some(room) = self.room.as_mut() else {
            return Outcome::Skipped;
        };

        room.poker.current_story.label = label.to_string();
        Outcome::Applied
    }

    /// Record the current user's vote. Re-votable: a later call overwrites
    /// the earlier one, including after a reveal (the presentation layer
    /// disables late votes; the store does not).
    pub fn submit_vote(&mut self, card: Card) -> Outcome {
        let Some(user) = self.current_user.as_ref() else {
            return Outcome::Skipped;
        };
        let Some(room) = self.room.as_mut() else {
            return Outcome::Skipped;
        };

        let Some(participant) = room
            .participants
            .iter_mut()
            .find(|p| p.user_id == user.user_id)
        else {
            return Outcome::Skipped;
        };

        debug!(user = %participant.name, card = %card, "vote submitted");
        participant.vote = Some(card);
        Outcome::Applied
    }

    /// Reveal the round: compute plurality consensus over the votes cast
    /// and mark the story revealed. Zero votes is not an error; consensus
    /// is simply absent.
    pub fn reveal_votes(&mut self) -> Outcome {
        let Some(room) = self.room.as_mut() else {
            return Outcome::Skipped;
        };

        let consensus = plurality(&room.participants);
        room.poker.current_story.votes_revealed = true;
        room.poker.current_story.consensus_vote = consensus;
        assert_room_invariants(room);

        info!(room = %room.code, consensus = ?consensus, "votes revealed");
        Outcome::Applied
    }

    /// Archive the current round to history, then reset the story and
    /// clear every participant's vote. The participant list and room
    /// identity are untouched. A round without consensus archives `None`.
    pub fn next_story(&mut self) -> Outcome {
        let Some(room) = self.room.as_mut() else {
            return Outcome::Skipped;
        };

        let story = &room.poker.current_story;
        let entry = StoryHistory {
            story_label: story.label.clone(),
            consensus_vote: story.consensus_vote,
            votes: room
                .participants
                .iter()
                .filter_map(|p| {
                    p.vote.map(|vote| StoryVote {
                        user_id: p.user_id,
                        user_name: p.name.clone(),
                        vote,
                    })
                })
                .collect(),
            timestamp: Utc::now(),
        };

        info!(room = %room.code, story = %entry.story_label, "round archived");
        room.poker.history.push(entry);
        room.poker.current_story = CurrentStory::default();
        for participant in &mut room.participants {
            participant.clear_vote();
        }

        assert_room_invariants(room);
        Outcome::Applied
    }

    /// Discard the round: clear votes, the revealed flag, and consensus
    /// without writing history and without touching the story label.
    pub fn reset_votes(&mut self) -> Outcome {
        let Some(room) = self.room.as_mut() else {
            return Outcome::Skipped;
        };

        room.poker.current_story.votes_revealed = false;
        room.poker.current_story.consensus_vote = None;
        for participant in &mut room.participants {
            participant.clear_vote();
        }

        assert_room_invariants(room);
        Outcome::Applied
    }

    pub fn set_current_page(&mut self, page: Page) {
        self.current_page = page;
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }
}

/// Plurality consensus: the vote value with the strictly highest count.
///
/// Votes are tallied in participant-list order into a first-seen-ordered
/// tally, and only a strictly higher count displaces the leader - so ties
/// go to the value that reached the maximum first. Returns `None` when no
/// votes were cast.
fn plurality(participants: &[Participant]) -> Option<Card> {
    let mut tally: Vec<(Card, usize)> = Vec::new();
    for participant in participants {
        if let Some(card) = participant.vote {
            match tally.iter_mut().find(|(c, _)| *c == card) {
                Some((_, count)) => *count += 1,
                None => tally.push((card, 1)),
            }
        }
    }

    let mut consensus = None;
    let mut max_count = 0;
    for (card, count) in tally {
        if count > max_count {
            max_count = count;
            consensus = Some(card);
        }
    }

    consensus
}
