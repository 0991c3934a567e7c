// src/calc/history.rs
//
// Historique borné : plus récent d’abord, éviction du plus ancien.
// Durée de vie = session (rien n’est écrit sur disque).

use std::collections::VecDeque;

/// Capacité par défaut.
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub expression: String,
    pub result: String,
}

#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
        }
    }

    /// Ajoute une entrée (id monotone) et renvoie une référence dessus.
    pub fn push(&mut self, expression: impl Into<String>, result: impl Into<String>) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: self.next_id,
            expression: expression.into(),
            result: result.into(),
        };
        self.next_id += 1;

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Plus récent d’abord.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Vide l’historique. Les ids restent monotones.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
