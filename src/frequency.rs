// Frequency tables for classified tokens and their ranked, serializable form

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occurrence count per normalized key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: &str, n: u64) {
        if n == 0 {
            return;
        }
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    /// Counter addition; order of merges does not change the result
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (key, &count) in &other.counts {
            self.add_n(key, count);
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries by descending count, ties by ascending key
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(key, &count)| (key.clone(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl<K: AsRef<str>> FromIterator<(K, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (key, count) in iter {
            table.add_n(key.as_ref(), count);
        }
        table
    }
}

/// The three buckets a token can land in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    /// Unknown non-verb words, lowercased
    pub words: FrequencyTable,
    /// Verb lemmas that resolved to an infinitive, reflexive or gerund form
    pub verbs: FrequencyTable,
    /// Verb lemmas that matched no ending and no mapping
    pub errors: FrequencyTable,
}

impl ClassificationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &ClassificationCounts) {
        self.words.merge(&other.words);
        self.verbs.merge(&other.verbs);
        self.errors.merge(&other.errors);
    }

    /// Fold a sequence of partial counts into one
    pub fn merged<'a, I: IntoIterator<Item = &'a ClassificationCounts>>(parts: I) -> Self {
        let mut total = Self::new();
        for part in parts {
            total.merge(part);
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.verbs.is_empty() && self.errors.is_empty()
    }

    pub fn report(&self) -> VocabularyReport {
        VocabularyReport {
            words: RankedTable::from(&self.words),
            verbs: RankedTable::from(&self.verbs),
            errors: RankedTable::from(&self.errors),
        }
    }
}

/// Ranked entries of one table plus its distinct-key count
///
/// Serializes as `{ items: { key: count, ... }, count: N }` with items in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTable {
    #[serde(serialize_with = "serialize_ordered_items", deserialize_with = "deserialize_ordered_items")]
    pub items: Vec<(String, u64)>,
    pub count: usize,
}

impl From<&FrequencyTable> for RankedTable {
    fn from(table: &FrequencyTable) -> Self {
        Self {
            items: table.ranked(),
            count: table.distinct(),
        }
    }
}

fn serialize_ordered_items<S: Serializer>(items: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for (key, count) in items {
        map.serialize_entry(key, count)?;
    }
    map.end()
}

fn deserialize_ordered_items<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, u64)>, D::Error> {
    struct OrderedItems;

    impl<'de> serde::de::Visitor<'de> for OrderedItems {
        type Value = Vec<(String, u64)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a mapping of key to count")
        }

        fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut items = Vec::new();
            while let Some((key, count)) = access.next_entry::<String, u64>()? {
                items.push((key, count));
            }
            Ok(items)
        }
    }

    deserializer.deserialize_map(OrderedItems)
}

/// Final per-document (or per-run) output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyReport {
    pub words: RankedTable,
    pub verbs: RankedTable,
    pub errors: RankedTable,
}

impl VocabularyReport {
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
