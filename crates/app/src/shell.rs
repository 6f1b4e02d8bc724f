//! Interactive shell
//!
//! A readline loop mapping commands onto session store operations. The
//! triangle board is per-view state owned by the loop; board edits are not
//! mirrored into the room.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use quorum_core::{Card, CornerId, Outcome, Page, RoomCode, TriangleCorners};

use crate::identity;
use crate::state::AppState;
use crate::view;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Whoami,
    Create,
    Join(RoomCode),
    Leave,
    Story(String),
    Vote(Card),
    Reveal,
    Next,
    Reset,
    Page(Page),
    Sidebar(bool),
    Corner(CornerId),
    Label(CornerId, String),
    TriangleReset,
    Show,
    History,
    Deck,
    Quit,
}

impl Command {
    /// Parse a non-empty command line. Errors are user-facing messages.
    pub fn parse(line: &str) -> Result<Command, String> {
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "whoami" => Ok(Command::Whoami),
            "create" => Ok(Command::Create),
            "join" => {
                if rest.is_empty() {
                    return Err("usage: join <CODE>".to_string());
                }
                RoomCode::parse(rest)
                    .map(Command::Join)
                    .map_err(|e| e.to_string())
            }
            "leave" => Ok(Command::Leave),
            "story" => Ok(Command::Story(rest.to_string())),
            "vote" => {
                if rest.is_empty() {
                    return Err("usage: vote <CARD> (see `deck`)".to_string());
                }
                rest.parse::<Card>()
                    .map(Command::Vote)
                    .map_err(|e| e.to_string())
            }
            "reveal" => Ok(Command::Reveal),
            "next" => Ok(Command::Next),
            "reset" => Ok(Command::Reset),
            "page" => rest
                .parse::<Page>()
                .map(Command::Page)
                .map_err(|e| e.to_string()),
            "sidebar" => match rest {
                "on" => Ok(Command::Sidebar(true)),
                "off" => Ok(Command::Sidebar(false)),
                _ => Err("usage: sidebar on|off".to_string()),
            },
            "corner" => rest
                .parse::<CornerId>()
                .map(Command::Corner)
                .map_err(|e| e.to_string()),
            "label" => {
                let (corner, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: label <CORNER> <TEXT>".to_string())?;
                let corner = corner.parse::<CornerId>().map_err(|e| e.to_string())?;
                let text = text.trim();
                if text.is_empty() {
                    return Err("usage: label <CORNER> <TEXT>".to_string());
                }
                Ok(Command::Label(corner, text.to_string()))
            }
            "triangle" => match rest {
                "reset" => Ok(Command::TriangleReset),
                _ => Err("usage: triangle reset".to_string()),
            },
            "show" => Ok(Command::Show),
            "history" => Ok(Command::History),
            "deck" => Ok(Command::Deck),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {other} (try `help`)")),
        }
    }
}

/// Run the interactive shell until quit or end-of-input
pub fn run(app: &AppState, room_hint: Option<RoomCode>) -> quorum_core::Result<()> {
    let mut rl = DefaultEditor::new().map_err(identity::readline_err)?;

    let user = {
        let db = app.db.lock().unwrap();
        identity::get_or_create_user(&db, &mut rl)?
    };
    app.session.lock().unwrap().set_current_user(user.clone());

    println!("{}", "quorum".bold().green());
    println!(
        "Hi {}! Type {} for commands.",
        user.name.bold(),
        "help".yellow()
    );
    if let Some(code) = &room_hint {
        println!(
            "Room code {} supplied; type {} to enter.",
            code.to_string().bold(),
            format!("join {code}").yellow()
        );
    }

    // Per-view triangle board, seeded from the configured labels
    let mut board = app.config.triangle.corners();

    let prompt = format!("{}> ", "quorum".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match Command::parse(trimmed) {
                    Ok(Command::Quit) => break,
                    Ok(command) => dispatch(app, &mut board, command),
                    Err(message) => println!("{}", message.red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(identity::readline_err(e)),
        }
    }

    Ok(())
}

fn dispatch(app: &AppState, board: &mut TriangleCorners, command: Command) {
    let mut session = app.session.lock().unwrap();

    match command {
        Command::Help => print_help(),
        Command::Whoami => match session.current_user() {
            Some(user) => println!("{} ({})", user.name.bold(), user.user_id),
            None => println!("No user set."),
        },
        Command::Create => match session.create_room() {
            Ok(code) => println!(
                "Room {} created. Share the code to invite others.",
                code.to_string().bold().green()
            ),
            Err(e) => println!("{}", e.to_string().red()),
        },
        Command::Join(code) => match session.current_user().cloned() {
            Some(user) => {
                session.join_room(code, user);
                if let Some(room) = session.room() {
                    println!("Joined room {}.", room.code.to_string().bold());
                }
            }
            None => println!("No user set."),
        },
        Command::Leave => {
            session.leave_room();
            println!("Left the room.");
        }
        Command::Story(label) => report(session.update_story_label(&label), "Story updated."),
        Command::Vote(card) => {
            let message = format!("Voted {card}.");
            report(session.submit_vote(card), &message);
        }
        Command::Reveal => {
            if session.reveal_votes().is_applied() {
                if let (Some(room), Some(user)) = (session.room(), session.current_user()) {
                    view::render_poker(room, user);
                }
            } else {
                no_room();
            }
        }
        Command::Next => report(session.next_story(), "Round archived; on to the next story."),
        Command::Reset => report(session.reset_votes(), "Votes discarded."),
        Command::Page(page) => {
            session.set_current_page(page);
            println!("Now on the {page} page.");
        }
        Command::Sidebar(open) => {
            session.set_sidebar_open(open);
            println!("Sidebar {}.", if open { "open" } else { "closed" });
        }
        Command::Corner(id) => {
            board.toggle(id);
            view::render_triangle(board);
        }
        Command::Label(id, text) => {
            board.set_label(id, text);
            view::render_triangle(board);
        }
        Command::TriangleReset => {
            *board = app.config.triangle.corners();
            view::render_triangle(board);
        }
        Command::Show => match session.current_page() {
            Page::Poker => match (session.room(), session.current_user()) {
                (Some(room), Some(user)) => view::render_poker(room, user),
                _ => no_room(),
            },
            Page::Triangle => view::render_triangle(board),
        },
        Command::History => match session.room() {
            Some(room) => view::render_history(room),
            None => no_room(),
        },
        Command::Deck => println!(
            "{}",
            Card::DECK
                .iter()
                .map(|c| c.face())
                .collect::<Vec<_>>()
                .join("  ")
        ),
        Command::Quit => {}
    }
}

fn report(outcome: Outcome, applied: &str) {
    match outcome {
        Outcome::Applied => println!("{applied}"),
        Outcome::Skipped => no_room(),
    }
}

fn no_room() {
    println!(
        "{}",
        "No active room - create or join one first.".yellow()
    );
}

fn print_help() {
    println!("Session:");
    println!("  create                 create a room (you become admin)");
    println!("  join <CODE>            join a room by its 6-character code");
    println!("  leave                  leave the current room");
    println!("  whoami                 show your cached identity");
    println!("Poker:");
    println!("  story <TEXT>           set the current story label");
    println!("  vote <CARD>            vote (see `deck` for the card faces)");
    println!("  reveal                 reveal votes and show the consensus");
    println!("  next                   archive the round and start the next");
    println!("  reset                  discard the round without archiving");
    println!("  history                list closed rounds");
    println!("  deck                   list the card deck");
    println!("Triangle:");
    println!("  corner top|left|right  toggle a corner (at most two)");
    println!("  label <CORNER> <TEXT>  relabel a corner");
    println!("  triangle reset         reset the board");
    println!("Navigation:");
    println!("  page poker|triangle    switch pages");
    println!("  sidebar on|off         toggle the sidebar");
    println!("  show                   render the current page");
    println!("  quit                   exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(Command::parse("create").unwrap(), Command::Create);
        assert_eq!(Command::parse("leave").unwrap(), Command::Leave);
        assert_eq!(
            Command::parse("join abc123").unwrap(),
            Command::Join(RoomCode::parse("ABC123").unwrap())
        );
        assert!(Command::parse("join").is_err());
        assert!(Command::parse("join nope").is_err());
    }

    #[test]
    fn test_parse_story_keeps_spaces() {
        assert_eq!(
            Command::parse("story Implement user auth").unwrap(),
            Command::Story("Implement user auth".to_string())
        );
        // An empty label is a valid overwrite
        assert_eq!(Command::parse("story").unwrap(), Command::Story(String::new()));
    }

    #[test]
    fn test_parse_votes() {
        assert_eq!(Command::parse("vote 5").unwrap(), Command::Vote(Card::Five));
        assert_eq!(
            Command::parse("vote 0.5").unwrap(),
            Command::Vote(Card::Half)
        );
        assert_eq!(
            Command::parse("vote ?").unwrap(),
            Command::Vote(Card::Unsure)
        );
        assert!(Command::parse("vote 4").is_err());
        assert!(Command::parse("vote").is_err());
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(
            Command::parse("page triangle").unwrap(),
            Command::Page(Page::Triangle)
        );
        assert_eq!(
            Command::parse("sidebar off").unwrap(),
            Command::Sidebar(false)
        );
        assert!(Command::parse("sidebar sideways").is_err());
    }

    #[test]
    fn test_parse_triangle_commands() {
        assert_eq!(
            Command::parse("corner left").unwrap(),
            Command::Corner(CornerId::BottomLeft)
        );
        assert_eq!(
            Command::parse("label top Speed to market").unwrap(),
            Command::Label(CornerId::Top, "Speed to market".to_string())
        );
        assert_eq!(
            Command::parse("triangle reset").unwrap(),
            Command::TriangleReset
        );
        assert!(Command::parse("label top").is_err());
        assert!(Command::parse("triangle spin").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("launch").unwrap_err();
        assert!(err.contains("Unknown command"));
    }
}
