//! Local identity bootstrap
//!
//! Loads the cached user or prompts for a name, retrying until a
//! non-empty name is supplied, then caches the new identity.

use colored::Colorize;
use rustyline::DefaultEditor;
use tracing::info;

use quorum_core::{Database, Result, User};

pub fn get_or_create_user(db: &Database, rl: &mut DefaultEditor) -> Result<User> {
    if let Some(user) = db.identity().load()? {
        info!(name = %user.name, "using cached identity");
        return Ok(user);
    }

    loop {
        let line = rl
            .readline(&format!("{} ", "Enter your name:".bold()))
            .map_err(readline_err)?;
        let name = line.trim();
        if name.is_empty() {
            println!("A name is required.");
            continue;
        }

        let user = User::new(name);
        db.identity().save(&user)?;
        info!(name = %user.name, "identity created");
        return Ok(user);
    }
}

pub(crate) fn readline_err(e: rustyline::error::ReadlineError) -> quorum_core::Error {
    quorum_core::Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}
