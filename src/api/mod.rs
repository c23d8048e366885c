//! HTTP endpoints of the local server started during `trackmerge auth`.
//!
//! - [`callback`] - OAuth redirect target, finishes the PKCE code exchange.

mod callback;

pub use callback::callback;
