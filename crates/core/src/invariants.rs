//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{CurrentStory, Room, RoomCode, TriangleCorners};

/// Validate that a room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    debug_assert!(
        RoomCode::parse(room.code.as_str()).is_ok(),
        "Room code {:?} is malformed",
        room.code
    );

    debug_assert!(
        !room.participants.is_empty(),
        "Room {} has no participants",
        room.code
    );

    debug_assert!(
        room.participants
            .iter()
            .any(|p| p.user_id == room.admin_user_id),
        "Room {} admin {} is not a participant",
        room.code,
        room.admin_user_id
    );

    assert_story_invariants(&room.poker.current_story);
    assert_corner_invariants(&room.triangle.corners);
}

/// A consensus can only exist on a revealed story
pub fn assert_story_invariants(story: &CurrentStory) {
    debug_assert!(
        story.consensus_vote.is_none() || story.votes_revealed,
        "Story {:?} has a consensus but is not revealed",
        story.label
    );
}

/// At most two corners may be selected at once
pub fn assert_corner_invariants(corners: &TriangleCorners) {
    let selected = corners.selected_count();
    debug_assert!(
        selected <= 2,
        "{} corners selected, expected at most 2",
        selected
    );
}
