use std::collections::BTreeMap;

/// Hand-maintained labels for project names the matcher cannot classify.
///
/// Lookup is by exact raw name: no trimming, no case folding.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    labels: BTreeMap<String, Vec<String>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw_name: impl Into<String>, labels: Vec<String>) {
        self.labels.insert(raw_name.into(), labels);
    }

    pub fn get(&self, raw_name: &str) -> Option<&[String]> {
        self.labels
            .get(raw_name)
            .map(Vec::as_slice)
            .filter(|labels| !labels.is_empty())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for OverrideTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}
