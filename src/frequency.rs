use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};


/// Occurrence count of every distinct symbol of a sequence.
///
/// Entries are kept in ascending symbol order, so two tables with the same
/// contents always produce the same tree no matter how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound(
    serialize = "T: Serialize",
    deserialize = "T: Ord + Deserialize<'de>"
))]
pub struct FrequencyTable<T> {

    counts: BTreeMap<T, usize>

}

impl<T> FrequencyTable<T>
where
    T: Ord
{

    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new()
        }
    }


    /// Counts every symbol of `data` in a single pass.
    pub fn from_symbols(data: impl IntoIterator<Item = T>) -> Self {

        let mut table = Self::new();

        for symbol in data {
            table.record(symbol);
        }

        table
    }


    pub fn record(&mut self, symbol: T) {
        self.counts.entry(symbol)
            .and_modify(|counter| *counter += 1)
            .or_insert(1);
    }


    /// Sets the count of `symbol`. A zero count removes the entry.
    pub fn insert(&mut self, symbol: T, count: usize) {
        if count == 0 {
            self.counts.remove(&symbol);
        } else {
            self.counts.insert(symbol, count);
        }
    }


    pub fn get(&self, symbol: &T) -> Option<usize> {
        self.counts.get(symbol).copied()
    }


    pub fn contains(&self, symbol: &T) -> bool {
        self.counts.contains_key(symbol)
    }


    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }


    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }


    /// Sum of all counts, i.e. the length of the counted sequence.
    pub fn total(&self) -> usize {
        self.counts.values()
            .fold(0, |acc, &count| acc.saturating_add(count))
    }


    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter()
            .map(|(symbol, &count)| (symbol, count))
    }

}

impl<T> Default for FrequencyTable<T>
where
    T: Ord
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, usize)> for FrequencyTable<T>
where
    T: Ord
{
    fn from_iter<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {

        let mut table = Self::new();

        for (symbol, count) in iter {
            table.insert(symbol, count);
        }

        table
    }
}

impl<'a, T> IntoIterator for &'a FrequencyTable<T> {
    type Item = (&'a T, &'a usize);
    type IntoIter = btree_map::Iter<'a, T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}


/// Builds the frequency table of a symbol sequence.
pub fn statistics<T>(data: impl IntoIterator<Item = T>) -> FrequencyTable<T>
where
    T: Ord
{
    FrequencyTable::from_symbols(data)
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn counts_every_symbol() {

        let table = statistics("abracadabra".chars());

        assert_eq!(table.len(), 5);
        assert_eq!(table.get(&'a'), Some(5));
        assert_eq!(table.get(&'b'), Some(2));
        assert_eq!(table.get(&'r'), Some(2));
        assert_eq!(table.get(&'c'), Some(1));
        assert_eq!(table.get(&'d'), Some(1));
        assert_eq!(table.get(&'z'), None);
        assert_eq!(table.total(), 11);
    }


    #[test]
    fn empty_input() {

        let table = statistics("".chars());

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table, FrequencyTable::default());
    }


    #[test]
    fn zero_counts_are_not_entries() {

        let mut table: FrequencyTable<char> = [('x', 3), ('y', 0)].into_iter().collect();

        assert!(table.contains(&'x'));
        assert!(!table.contains(&'y'));

        table.insert('x', 0);
        assert!(table.is_empty());
    }


    #[test]
    fn iteration_order_is_independent_of_insertion() {

        let forward: FrequencyTable<u8> = [(1, 4), (2, 4), (3, 1)].into_iter().collect();
        let backward: FrequencyTable<u8> = [(3, 1), (2, 4), (1, 4)].into_iter().collect();

        assert_eq!(forward, backward);
        assert!(forward.iter().eq(backward.iter()));
        assert_eq!(forward.iter().map(|(s, _)| *s).collect::<Vec<_>>(), [1, 2, 3]);
    }


    #[test]
    fn check_serde() {

        let table = statistics("hello world".chars());

        let json = serde_json::to_string(&table).unwrap();
        let des: FrequencyTable<char> = serde_json::from_str(&json).unwrap();

        assert_eq!(table, des);
    }

}
