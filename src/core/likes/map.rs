use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse mapping of entity id -> liked for the current user.
///
/// A missing id means not liked, so unliking removes the entry rather
/// than storing `false`. Serialized as a plain JSON object of
/// `{"<entity_id>": true}` pairs. Deserializing drops any `false`
/// entries so older cache payloads still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, bool>")]
pub struct LikeMap(HashMap<String, bool>);

impl LikeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an authoritative map where every given id is liked
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| (id.into(), true)).collect())
    }

    pub fn is_liked(&self, entity_id: &str) -> bool {
        self.0.get(entity_id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, entity_id: &str, liked: bool) {
        if liked {
            self.0.insert(entity_id.to_string(), true);
        } else {
            self.0.remove(entity_id);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Liked ids in ascending order
    pub fn liked_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.0.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

impl From<HashMap<String, bool>> for LikeMap {
    fn from(raw: HashMap<String, bool>) -> Self {
        Self(raw.into_iter().filter(|(_, liked)| *liked).collect())
    }
}

impl FromIterator<String> for LikeMap {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_ids(iter)
    }
}
