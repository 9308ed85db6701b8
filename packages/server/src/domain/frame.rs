//! Frames broadcast to the room.
//!
//! Join and leave notices travel as regular chat messages under the member's
//! own name, so a client renders "Alice: has entered the chat room" without special casing.

use murmur_shared::wire::{Envelope, IncomingMessage};

use super::Member;

pub const ENTERED_TEXT: &str = " has entered the chat room";
pub const LEFT_TEXT: &str = " has left the chat room";

pub fn entered(member: &Member) -> Envelope<IncomingMessage> {
    Envelope::message(IncomingMessage::new(member.name.as_str(), ENTERED_TEXT))
}

pub fn left(member: &Member) -> Envelope<IncomingMessage> {
    Envelope::message(IncomingMessage::new(member.name.as_str(), LEFT_TEXT))
}

/// Frame relaying a member's message to the room
pub fn chat(member: &Member, message: impl Into<String>) -> Envelope<IncomingMessage> {
    Envelope::message(IncomingMessage::new(member.name.as_str(), message))
}
