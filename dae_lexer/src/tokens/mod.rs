//! Token model for Daedalus scripts
//!
//! A [`Token`] is a category plus the exact slice of input it covers.
//! Tokens borrow the scanned text, so a token stream is cheap to produce
//! and concatenating every lexeme in order reproduces the source.
//! [`OwnedToken`] detaches a token for JSON output and test fixtures.

pub mod category;
pub mod token;

pub use category::{TokenCategory, UnknownCategory};
pub use token::{quote_lexeme, OwnedToken, Token};
