//! Histories of operations performed on a shared object.
use std::collections::HashMap;
use std::ops::Index;

/// An identifier for a process (or thread).
pub type ProcessId = usize;

/// An identifier for an entry in a history.
pub type EntryId = usize;

/// Something a process did to a shared object: either start an operation or
/// finish one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<T> {
    Call(T),
    Response(T),
}

/// The start of an operation, linked to the entry at which it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEntry<T> {
    pub id: EntryId,
    pub operation: T,
    pub response: EntryId,
}

/// The end of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry<T> {
    pub id: EntryId,
    pub operation: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    Call(CallEntry<T>),
    Response(ResponseEntry<T>),
}

impl<T> Entry<T> {
    pub fn id(&self) -> EntryId {
        match self {
            Entry::Call(call) => call.id,
            Entry::Response(response) => response.id,
        }
    }
}

/// A complete history of operations, in the order in which they were
/// called and responded to.
///
/// Pairs of call and response entries can be temporarily removed from the
/// history with [`lift`](History::lift), and put back in their original
/// positions with [`unlift`](History::unlift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: Vec<Entry<T>>,
    // When an entry is removed from this history, its index is recorded here.
    removed_from: Vec<Option<usize>>,
}

impl<T> History<T> {
    /// Creates a history from a sequence of actions, each performed by some
    /// process. The `n`th response of a process completes its `n`th call.
    ///
    /// # Panics
    ///
    /// Panics if a process calls an operation while another of its operations
    /// is pending, responds without having called an operation, or never
    /// responds to a call.
    pub fn from_actions(actions: Vec<(ProcessId, Action<T>)>) -> Self {
        let mut pending: HashMap<ProcessId, EntryId> = HashMap::new();
        let mut responses: Vec<Option<EntryId>> = vec![None; actions.len()];
        for (id, (process, action)) in actions.iter().enumerate() {
            match action {
                Action::Call(_) => {
                    if pending.insert(*process, id).is_some() {
                        panic!("Process {process} called an operation while another was pending");
                    }
                }
                Action::Response(_) => match pending.remove(process) {
                    Some(call) => responses[call] = Some(id),
                    None => panic!("Process {process} responded without a pending call"),
                },
            }
        }
        if let Some(process) = pending.keys().next() {
            panic!("Process {process} never responded to its last call");
        }

        let len = actions.len();
        let entries = actions
            .into_iter()
            .enumerate()
            .map(|(id, (_, action))| match action {
                Action::Call(operation) => Entry::Call(CallEntry {
                    id,
                    operation,
                    response: responses[id].expect("every call has a response"),
                }),
                Action::Response(operation) => Entry::Response(ResponseEntry { id, operation }),
            })
            .collect();
        Self {
            entries,
            removed_from: vec![None; len],
        }
    }

    /// Returns the current index of the entry with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no entry with that id is currently in the history.
    pub fn index_of_id(&self, id: EntryId) -> usize {
        self.entries
            .iter()
            .position(|e| e.id() == id)
            .unwrap_or_else(|| panic!("Entry {id} is not in the history"))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes the call entry at index `i` and its response from the history.
    ///
    /// # Panics
    ///
    /// Panics if the entry at index `i` is not a call.
    pub fn lift(&mut self, i: usize) -> (Entry<T>, Entry<T>) {
        let call = self.remove(i);
        let response_id = match &call {
            Entry::Call(call) => call.response,
            Entry::Response(response) => panic!("Cannot lift response entry {}", response.id),
        };
        let response = self.remove(self.index_of_id(response_id));
        (call, response)
    }

    /// Puts a pair of entries previously removed by [`lift`](History::lift)
    /// back where they came from, returning their new indices.
    pub fn unlift(&mut self, call: Entry<T>, response: Entry<T>) -> (usize, usize) {
        let response_index = self.insert(response);
        let call_index = self.insert(call);
        (call_index, response_index)
    }

    /// # Panics
    ///
    /// Panics if the entry was not previously removed from the history.
    fn insert(&mut self, entry: Entry<T>) -> usize {
        match self.removed_from[entry.id()].take() {
            Some(index) => {
                self.entries.insert(index, entry);
                index
            }
            None => panic!("Index that entry {} was removed from is unknown", entry.id()),
        }
    }

    fn remove(&mut self, i: usize) -> Entry<T> {
        let entry = self.entries.remove(i);
        self.removed_from[entry.id()] = Some(i);
        entry
    }
}

impl<T> Index<usize> for History<T> {
    type Output = Entry<T>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.entries[i]
    }
}
