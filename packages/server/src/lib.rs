//! Single-room relay server for Murmur.
//!
//! Every chat message a member sends is broadcast to every connected member,
//! the sender included. Members joining and leaving are announced the same way.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
