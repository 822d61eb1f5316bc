//! Insertion-ordered mapping from article title to its series.
//!
//! Serialized as a plain JSON object. Key order is kept on both write and
//! read, so the order articles were fetched in is the order later stages see
//! them in. Selections that break ties by "first encountered" depend on this.

use crate::types::{ArticleSeries, PageviewRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result mapping built by a fetch batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageviewMap(IndexMap<String, ArticleSeries>);

impl PageviewMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `series` under `article`.
    ///
    /// An existing entry keeps its position and has its series replaced;
    /// the previous series is returned.
    pub fn insert(
        &mut self,
        article: impl Into<String>,
        series: ArticleSeries,
    ) -> Option<ArticleSeries> {
        self.0.insert(article.into(), series)
    }

    /// Series stored under `article`.
    pub fn get(&self, article: &str) -> Option<&[PageviewRecord]> {
        self.0.get(article).map(Vec::as_slice)
    }

    /// Whether `article` has an entry.
    pub fn contains(&self, article: &str) -> bool {
        self.0.contains_key(article)
    }

    /// Number of articles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no article has been stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Article titles in insertion order.
    pub fn articles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PageviewRecord])> {
        self.0
            .iter()
            .map(|(article, series)| (article.as_str(), series.as_slice()))
    }

    /// Total number of records across all articles.
    pub fn record_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl IntoIterator for PageviewMap {
    type Item = (String, ArticleSeries);
    type IntoIter = indexmap::map::IntoIter<String, ArticleSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, ArticleSeries)> for PageviewMap {
    fn from_iter<I: IntoIterator<Item = (String, ArticleSeries)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Access, Agent, Granularity};

    fn record(article: &str, timestamp: &str, views: u64) -> PageviewRecord {
        PageviewRecord {
            project: "en.wikipedia".to_string(),
            article: article.to_string(),
            granularity: Granularity::Monthly,
            timestamp: timestamp.to_string(),
            access: Access::Desktop,
            agent: Agent::User,
            views,
        }
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = PageviewMap::new();
        assert!(map.insert("Zuul", vec![record("Zuul", "2015070100", 1)]).is_none());
        assert!(map.insert("Abelisaurus", vec![]).is_none());

        let previous = map.insert("Zuul", vec![record("Zuul", "2015080100", 9)]);
        assert_eq!(previous.map(|s| s.len()), Some(1));

        assert_eq!(map.articles().collect::<Vec<_>>(), vec!["Zuul", "Abelisaurus"]);
        assert_eq!(map.get("Zuul").unwrap()[0].views, 9);
        assert_eq!(map.len(), 2);
        assert_eq!(map.record_count(), 1);
    }

    #[test]
    fn test_json_keeps_key_order() {
        let map: PageviewMap = vec![
            ("Velociraptor".to_string(), vec![record("Velociraptor", "2015070100", 5)]),
            ("Allosaurus".to_string(), vec![]),
            ("Microraptor".to_string(), vec![record("Microraptor", "2015070100", 2)]),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.starts_with(r#"{"Velociraptor":[{"project":"en.wikipedia""#));

        let reloaded: PageviewMap = serde_json::from_str(&json).unwrap();
        assert_eq!(
            reloaded.articles().collect::<Vec<_>>(),
            vec!["Velociraptor", "Allosaurus", "Microraptor"]
        );
        assert_eq!(reloaded, map);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<PageviewMap>("[]").is_err());
    }
}
