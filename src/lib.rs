//! Nowplaying - serve the track a Last.fm user is currently playing
//!
//! This library reads a user's recent scrobbles from Last.fm, picks the track
//! that is playing right now (or the most recent one) and exposes it as a
//! small JSON record over HTTP.

/// Client modules for interacting with the Last.fm API
pub mod clients;
/// Current-track selection and formatting
pub mod now_playing;
/// HTTP router and listener
pub mod server;
/// Text truncation and transliteration
pub mod text;
