//! Navigation State
//!
//! Injectable stand-in for the browser address bar and history stack. The
//! parameter store reads the current location, pushes new entries, and
//! re-decodes after back/forward. Listeners observe every location change.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub type SubscriptionId = u64;

/// Location change delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A new entry was pushed by an update
    Pushed(String),
    /// Back/forward moved to an existing entry
    Popped(String),
}

impl NavigationEvent {
    pub fn query(&self) -> &str {
        match self {
            NavigationEvent::Pushed(query) | NavigationEvent::Popped(query) => query,
        }
    }
}

pub type Listener = Box<dyn FnMut(&NavigationEvent) + Send>;

/// Address-bar abstraction: get, set (push), subscribe.
pub trait Navigation {
    /// Current query string, without the leading `?`
    fn location(&self) -> String;

    /// Push a new history entry; entries ahead of the cursor are discarded.
    fn push(&mut self, query: String) -> Result<(), ApiError>;

    /// Move one entry back. Returns false at the start of history.
    fn back(&mut self) -> Result<bool, ApiError>;

    /// Move one entry forward. Returns false at the end of history.
    fn forward(&mut self) -> Result<bool, ApiError>;

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// History stack with a cursor at the current entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, query: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.cursor >= self.entries.len() {
            return Err(ApiError::Navigation(format!(
                "History cursor {} out of range for {} entries",
                self.cursor,
                self.entries.len()
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Listeners {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&mut self, event: &NavigationEvent) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }
}

/// In-memory history, used by tests and the interactive shell
pub struct MemoryNavigation {
    history: History,
    listeners: Listeners,
}

impl MemoryNavigation {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: History::new(normalize_query(&initial.into())),
            listeners: Listeners::default(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl Default for MemoryNavigation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Navigation for MemoryNavigation {
    fn location(&self) -> String {
        self.history.current().to_string()
    }

    fn push(&mut self, query: String) -> Result<(), ApiError> {
        let query = normalize_query(&query);
        self.history.push(query.clone());
        self.listeners.notify(&NavigationEvent::Pushed(query));
        Ok(())
    }

    fn back(&mut self) -> Result<bool, ApiError> {
        let moved = self.history.back();
        if moved {
            let location = self.location();
            self.listeners.notify(&NavigationEvent::Popped(location));
        }
        Ok(moved)
    }

    fn forward(&mut self) -> Result<bool, ApiError> {
        let moved = self.history.forward();
        if moved {
            let location = self.location();
            self.listeners.notify(&NavigationEvent::Popped(location));
        }
        Ok(moved)
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

/// History persisted as JSON so separate processes share one session
pub struct FileNavigation {
    path: PathBuf,
    history: History,
    listeners: Listeners,
}

impl FileNavigation {
    /// Open the history at `path`, starting a new one at `initial` if the file is absent.
    pub fn open(path: impl Into<PathBuf>, initial: &str) -> Result<Self, ApiError> {
        let path = path.into();
        let history = if path.exists() {
            read_history(&path)?
        } else {
            let history = History::new(normalize_query(initial));
            write_history(&path, &history)?;
            history
        };
        debug!(path = %path.display(), entries = history.len(), "Opened navigation state");
        Ok(Self {
            path,
            history,
            listeners: Listeners::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Re-read the file, picking up changes made by another process.
    /// Returns true if the current location changed.
    pub fn reload(&mut self) -> Result<bool, ApiError> {
        let before = self.location();
        self.history = read_history(&self.path)?;
        let changed = before != self.location();
        if changed {
            let location = self.location();
            self.listeners.notify(&NavigationEvent::Popped(location));
        }
        Ok(changed)
    }
}

impl Navigation for FileNavigation {
    fn location(&self) -> String {
        self.history.current().to_string()
    }

    fn push(&mut self, query: String) -> Result<(), ApiError> {
        let query = normalize_query(&query);
        let mut next = self.history.clone();
        next.push(query.clone());
        write_history(&self.path, &next)?;
        self.history = next;
        self.listeners.notify(&NavigationEvent::Pushed(query));
        Ok(())
    }

    fn back(&mut self) -> Result<bool, ApiError> {
        let mut next = self.history.clone();
        if !next.back() {
            return Ok(false);
        }
        write_history(&self.path, &next)?;
        self.history = next;
        let location = self.location();
        self.listeners.notify(&NavigationEvent::Popped(location));
        Ok(true)
    }

    fn forward(&mut self) -> Result<bool, ApiError> {
        let mut next = self.history.clone();
        if !next.forward() {
            return Ok(false);
        }
        write_history(&self.path, &next)?;
        self.history = next;
        let location = self.location();
        self.listeners.notify(&NavigationEvent::Popped(location));
        Ok(true)
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

fn normalize_query(query: &str) -> String {
    query.strip_prefix('?').unwrap_or(query).to_string()
}

fn read_history(path: &Path) -> Result<History, ApiError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ApiError::Navigation(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let history: History = serde_json::from_str(&contents).map_err(|e| {
        ApiError::Navigation(format!("Invalid navigation state {}: {}", path.display(), e))
    })?;
    history.validate()?;
    Ok(history)
}

fn write_history(path: &Path, history: &History) -> Result<(), ApiError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::Navigation(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let json = serde_json::to_string_pretty(history).map_err(|e| {
        ApiError::Navigation(format!("Failed to serialize navigation state: {}", e))
    })?;
    std::fs::write(path, json).map_err(|e| {
        ApiError::Navigation(format!("Failed to write {}: {}", path.display(), e))
    })
}
