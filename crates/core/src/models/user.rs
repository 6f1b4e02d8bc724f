//! User model

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Avatar colors assigned round-robin-by-chance at first launch
pub const AVATAR_COLORS: [&str; 8] = [
    "#EF4444", "#F59E0B", "#10B981", "#3B82F6", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// The local user identity, created once per machine and cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub avatar_color: Option<String>,
}

impl User {
    /// Create a new user with a fresh id and a random avatar color
    pub fn new(name: impl Into<String>) -> Self {
        let color = AVATAR_COLORS
            .choose(&mut rand::thread_rng())
            .map(|c| (*c).to_string());

        Self {
            user_id: Uuid::new_v4(),
            name: name.into(),
            avatar_color: color,
        }
    }
}
