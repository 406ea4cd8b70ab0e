use std::collections::VecDeque;

/// An append-only log of per-iteration records.
///
/// Solvers only write to the history; it never feeds back into the iteration.
/// By default every record is kept. With a limit, the history behaves as a
/// ring buffer that keeps the most recent records and counts how many older
/// ones were dropped.
#[derive(Debug, Clone)]
pub struct History<T> {
    records: VecDeque<T>,
    limit: Option<usize>,
    dropped: usize,
}

impl<T> History<T> {
    /// Creates a history, bounded to `limit` records if given.
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    /// Appends a record, evicting the oldest one if the limit is reached.
    pub fn push(&mut self, record: T) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                self.dropped += 1;
                return;
            }
            if self.records.len() == limit {
                self.records.pop_front();
                self.dropped += 1;
            }
        }
        self.records.push_back(record);
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.records.back()
    }

    /// Returns the number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns how many records were evicted by the limit.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Consumes the history, returning retained records oldest first.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.records.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_keeps_everything() {
        let mut history = History::new(None);
        for i in 0..5 {
            history.push(i);
        }

        assert_eq!(history.dropped(), 0);
        assert_eq!(history.into_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn bounded_keeps_most_recent() {
        let mut history = History::new(Some(3));
        for i in 0..5 {
            history.push(i);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.dropped(), 2);
        assert_eq!(history.last(), Some(&4));
        assert_eq!(history.into_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = History::new(Some(0));
        history.push(1);

        assert!(history.is_empty());
        assert_eq!(history.dropped(), 1);
    }
}
