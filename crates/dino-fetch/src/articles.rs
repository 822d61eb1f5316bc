//! Article list loading.

use dino_common::{PageviewsError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One article to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Title as listed, trimmed.
    pub name: String,
    /// Article URL, when the list has one.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleRow {
    name: String,
    #[serde(default)]
    url: Option<String>,
}

/// Load the article list from a CSV file with a `name` column and an optional `url` column.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let file = std::fs::File::open(path).map_err(|e| PageviewsError::ArticleList {
        message: format!("Cannot open article list {}", path.display()),
        source: Some(Box::new(e)),
    })?;
    let articles = read_articles(file)?;
    debug!(path = %path.display(), count = articles.len(), "Loaded article list");
    Ok(articles)
}

/// Read an article list from any CSV source.
///
/// Blank names are skipped, repeated names are skipped with a warning and
/// the original order is kept.
pub fn read_articles<R: Read>(reader: R) -> Result<Vec<Article>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for row in csv_reader.deserialize::<ArticleRow>() {
        let row = row?;
        if row.name.is_empty() {
            continue;
        }
        if !seen.insert(row.name.clone()) {
            warn!(article = %row.name, "Duplicate article in list, skipping");
            continue;
        }
        articles.push(Article {
            name: row.name,
            url: row.url.filter(|u| !u.is_empty()),
        });
    }

    Ok(articles)
}
