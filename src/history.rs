//! Session history of committed calculations.

use std::fmt;

use serde::Serialize;

/// One committed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The canonical expression as it stood before "=" was pressed.
    equation: String,
    /// The formatted result.
    answer: String,
}

impl HistoryEntry {
    pub fn new(equation: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            answer: answer.into(),
        }
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.equation, self.answer)
    }
}

/// Append-only log of calculations, oldest first.
///
/// Entries are never edited or removed one by one; the log is only cleared
/// as a whole.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over the entries in insertion order.
    ///
    /// The iterator borrows the log, so it can be recreated at any time to
    /// walk the entries again.
    pub fn list(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = HistoryLog::new();
        log.append(HistoryEntry::new("1+1", "2"));
        log.append(HistoryEntry::new("2*3", "6"));

        let equations: Vec<&str> = log.list().map(HistoryEntry::equation).collect();
        assert_eq!(equations, vec!["1+1", "2*3"]);
        assert_eq!(log.last().map(HistoryEntry::answer), Some("6"));
    }

    #[test]
    fn test_list_is_restartable() {
        let mut log = HistoryLog::new();
        log.append(HistoryEntry::new("1+1", "2"));

        assert_eq!(log.list().count(), 1);
        assert_eq!(log.list().count(), 1);
        assert_eq!((&log).into_iter().count(), 1);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = HistoryLog::new();
        log.append(HistoryEntry::new("1+1", "2"));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
    }

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::new("12+5", "17");
        assert_eq!(entry.to_string(), "12+5 = 17");
    }

    #[test]
    fn test_serializes_as_list() {
        let mut log = HistoryLog::new();
        log.append(HistoryEntry::new("1+1", "2"));
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"[{"equation":"1+1","answer":"2"}]"#);
    }
}
