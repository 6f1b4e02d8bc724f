//! Plain-text rendering of session snapshots

use colored::Colorize;

use quorum_core::{Card, CornerId, Room, TriangleCorners, User};

/// Render the poker page: story, participation, and results when revealed
pub fn render_poker(room: &Room, me: &User) {
    let story = &room.poker.current_story;
    let label = if story.label.is_empty() {
        "(unnamed story)".dimmed().to_string()
    } else {
        story.label.bold().to_string()
    };
    println!("\nRoom {}  |  {label}", room.code.to_string().bold());

    println!("{}/{} voted", room.voted_count(), room.participants.len());
    for participant in &room.participants {
        let marker = if participant.has_voted() {
            "*".green()
        } else {
            "o".dimmed()
        };
        let mut tags = Vec::new();
        if room.is_admin(participant.user_id) {
            tags.push("admin");
        }
        if participant.user_id == me.user_id {
            tags.push("you");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", tags.join(", "))
        };
        println!("  {marker} {}{tags}", participant.name);
    }

    if story.votes_revealed {
        println!("\n{}", "Results".bold());
        match story.consensus_vote {
            Some(card) => println!("  Most common vote: {}", card.to_string().bold().green()),
            None => println!("  No votes were cast."),
        }

        for (card, count) in vote_distribution(room) {
            let bar = "#".repeat(count);
            println!("  {:>3}  {bar} {count}", card.face());
        }

        for participant in &room.participants {
            if let Some(vote) = participant.vote {
                println!(
                    "  [{}] {}: {vote}",
                    initials(&participant.name),
                    participant.name
                );
            }
        }
    }
}

/// Render closed rounds, newest last
pub fn render_history(room: &Room) {
    if room.poker.history.is_empty() {
        println!("No closed rounds yet.");
        return;
    }

    println!("\n{}", "Story history".bold());
    for item in &room.poker.history {
        let label = if item.story_label.is_empty() {
            "Unnamed story".to_string()
        } else {
            item.story_label.clone()
        };
        let consensus = item
            .consensus_vote
            .map(|c| format!("{c} points"))
            .unwrap_or_else(|| "no consensus".to_string());
        let time = item.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S");
        println!("  {} - {consensus} ({time})", label.bold());
        for vote in &item.votes {
            println!("      {}: {}", vote.user_name, vote.vote);
        }
    }
}

/// Render the triangle board with selection guidance
pub fn render_triangle(board: &TriangleCorners) {
    println!("\n{}", "Project triangle".bold());
    for id in CornerId::ALL {
        let corner = board.corner(id);
        let marker = if corner.selected {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        println!("  {marker} {:<13} {}", id.to_string(), corner.label);
    }

    match board.selected_count() {
        0 => println!("  Pick two corners to set your priorities - you can't have all three."),
        1 => println!("  Select one more corner."),
        _ => {
            if let Some(summary) = board.selection_summary() {
                println!("  Selected: {}", summary.bold().green());
            }
        }
    }
}

/// Vote counts sorted most-common-first, as shown after a reveal
fn vote_distribution(room: &Room) -> Vec<(Card, usize)> {
    let mut distribution: Vec<(Card, usize)> = Vec::new();
    for participant in &room.participants {
        if let Some(card) = participant.vote {
            match distribution.iter_mut().find(|(c, _)| *c == card) {
                Some((_, count)) => *count += 1,
                None => distribution.push((card, 1)),
            }
        }
    }
    distribution.sort_by(|a, b| b.1.cmp(&a.1));
    distribution
}

fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_core::{Participant, RoomCode};

    #[test]
    fn test_vote_distribution_sorted_by_count() {
        let alice = User::new("Alice");
        let mut room = Room::new(RoomCode::parse("ABC123").unwrap(), &alice);
        for (name, card) in [("Bob", Card::Five), ("Carol", Card::Five), ("Dave", Card::Three)] {
            let mut participant = Participant::new(&User::new(name));
            participant.vote = Some(card);
            room.participants.push(participant);
        }

        let distribution = vote_distribution(&room);
        assert_eq!(distribution, vec![(Card::Five, 2), (Card::Three, 1)]);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("alice"), "AL");
        assert_eq!(initials("B"), "B");
    }
}
