//! # CLI Module
//!
//! Command handlers for trackmerge. Each handler talks to the user through
//! the `info!`/`success!`/`warning!`/`error!` macros and exits the process on
//! fatal errors.
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE authorization, caches the token
//! - [`import_file`] - adds the tracks linked in a text file to a playlist
//! - [`import_messages`] - adds the tracks linked in a chat history to a playlist
//! - [`contributions`] - ranks chat members by the links they shared
//!
//! ## Usage Patterns
//!
//! ```bash
//! trackmerge auth
//! trackmerge import file links.txt --playlist 37i9dQZF1DXcBWIGoYBM5M
//! trackmerge import messages chat.txt --search spotify --dry-run
//! trackmerge contributions chat.txt --output-dir reports
//! ```

mod auth;
mod contributions;
mod import;

pub use auth::auth;
pub use contributions::contributions;
pub use import::import_file;
pub use import::import_messages;
