//! UI seams of the chat client: the text field messages are typed into and
//! the list received messages are appended to.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{render::MessageEntry, ui::redisplay_prompt};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-line text input
pub trait InputField: Send + Sync {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// Container that received messages are appended to
pub trait MessageList: Send + Sync {
    fn append(&self, entry: MessageEntry);
}

/// In-memory text field
#[derive(Debug, Default)]
pub struct TextField {
    value: Mutex<String>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputField for TextField {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn set_value(&self, value: &str) {
        *lock(&self.value) = value.to_string();
    }
}

/// Keeps every appended entry
#[derive(Debug, Default)]
pub struct MemoryMessageList {
    entries: Mutex<Vec<MessageEntry>>,
}

impl MemoryMessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<MessageEntry> {
        lock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl MessageList for MemoryMessageList {
    fn append(&self, entry: MessageEntry) {
        lock(&self.entries).push(entry);
    }
}

/// Accumulates the markup of every appended entry, like a page element
/// whose serialized content grows with each message.
#[derive(Debug, Default)]
pub struct HtmlMessageList {
    markup: Mutex<String>,
}

impl HtmlMessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> String {
        lock(&self.markup).clone()
    }
}

impl MessageList for HtmlMessageList {
    fn append(&self, entry: MessageEntry) {
        lock(&self.markup).push_str(&entry.to_html());
    }
}

/// Prints each entry to stdout and redraws the input prompt below it
#[derive(Debug)]
pub struct TerminalMessageList {
    prompt: String,
}

impl TerminalMessageList {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl MessageList for TerminalMessageList {
    fn append(&self, entry: MessageEntry) {
        print!("{}", entry.to_terminal());
        redisplay_prompt(&self.prompt);
    }
}
