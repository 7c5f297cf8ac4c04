//! Parameter maps attached to states and transitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter values keyed by parameter name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateParams {
    values: IndexMap<String, Value>,
}

impl StateParams {
    /// An empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Look up a parameter value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether a parameter of this name is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`, overwriting values for existing keys.
    pub fn merge(&mut self, other: &StateParams) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Build a fresh container holding a detached copy of these parameters.
    ///
    /// Event payloads carry normalized copies, so listeners never observe
    /// the live parameter map of an in-flight transition.
    pub fn normalized(&self) -> StateParams {
        let mut fresh = StateParams::new();
        fresh.merge(self);
        fresh
    }
}

impl FromIterator<(String, Value)> for StateParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut base = StateParams::new();
        base.insert("id", json!(1));
        base.insert("tab", json!("info"));

        let mut incoming = StateParams::new();
        incoming.insert("id", json!(2));

        base.merge(&incoming);
        assert_eq!(base.get("id"), Some(&json!(2)));
        assert_eq!(base.get("tab"), Some(&json!("info")));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn normalized_is_equal_but_detached() {
        let mut live = StateParams::new();
        live.insert("id", json!(42));

        let snapshot = live.normalized();
        assert_eq!(snapshot, live);

        live.insert("id", json!(43));
        assert_eq!(snapshot.get("id"), Some(&json!(42)));
    }

    #[test]
    fn serializes_as_a_plain_map() {
        let mut params = StateParams::new();
        params.insert("id", json!(7));
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({ "id": 7 }));
    }

    proptest! {
        #[test]
        fn normalization_preserves_every_entry(
            entries in proptest::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..8)
        ) {
            let params: StateParams = entries
                .iter()
                .map(|(k, v)| (k.clone(), json!(*v)))
                .collect();
            let normalized = params.normalized();
            prop_assert_eq!(&params, &normalized);
        }
    }
}
