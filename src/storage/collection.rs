use crate::search::types::{Predicate, SearchFilter, Searchable};

/// An ordered candidate set of documents being progressively filtered.
///
/// Both operations preserve the relative order of surviving elements, so an
/// empty filter list returns the input unchanged. Because each step is a set
/// intersection or subtraction over pure per-document predicates, the final
/// set is independent of filter order.
pub struct Candidates<T>(Vec<T>);

impl<T: Searchable> Candidates<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    /// Retains only elements satisfying the predicate.
    pub fn narrow(mut self, predicate: &Predicate) -> Self {
        self.0.retain(|item| predicate.matches(item));
        self
    }

    /// Removes all elements satisfying the predicate.
    pub fn remove_matching(mut self, predicate: &Predicate) -> Self {
        self.0.retain(|item| !predicate.matches(item));
        self
    }

    /// Folds the compiled filter list over the candidate set, left to right.
    pub fn apply(self, filters: &[SearchFilter]) -> Self {
        filters.iter().fold(self, |candidates, filter| {
            if filter.exclude {
                candidates.remove_matching(&filter.predicate)
            } else {
                candidates.narrow(&filter.predicate)
            }
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}
