//! AskMyNotes - Study Assistant Backend
//!
//! A note-grounded study assistant: subjects group uploaded note text, and
//! the server answers questions and generates study dashboards strictly
//! from that text via an external LLM provider.

pub mod server;
