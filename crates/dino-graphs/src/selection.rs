//! Per-article statistics and the article subsets each chart shows.

use crate::dataset::ArticleViews;

/// Articles with the highest and lowest mean count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageExtremes<'a> {
    /// Highest mean.
    pub max: &'a ArticleViews,
    /// Lowest mean.
    pub min: &'a ArticleViews,
}

/// Highest and lowest mean, compared strictly so the first article in file
/// order wins ties. Articles without buckets are ignored; `None` when no
/// article has any.
pub fn max_min_average(articles: &[ArticleViews]) -> Option<AverageExtremes<'_>> {
    let mut max: Option<(&ArticleViews, f64)> = None;
    let mut min: Option<(&ArticleViews, f64)> = None;

    for article in articles {
        let Some(avg) = article.mean() else { continue };
        if max.map_or(true, |(_, best)| avg > best) {
            max = Some((article, avg));
        }
        if min.map_or(true, |(_, best)| avg < best) {
            min = Some((article, avg));
        }
    }

    Some(AverageExtremes {
        max: max?.0,
        min: min?.0,
    })
}

/// The `k` articles with the largest single-bucket count, largest first.
///
/// The sort is stable, so equal peaks keep file order. Articles without
/// buckets have no peak and are left out.
pub fn top_k_by_peak(articles: &[ArticleViews], k: usize) -> Vec<&ArticleViews> {
    let mut ranked: Vec<(&ArticleViews, u64)> = articles
        .iter()
        .filter_map(|a| a.peak().map(|(views, _)| (a, views)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(k).map(|(a, _)| a).collect()
}

/// The `k` articles with the fewest buckets, fewest first, file order on ties.
pub fn fewest_buckets(articles: &[ArticleViews], k: usize) -> Vec<&ArticleViews> {
    let mut ranked: Vec<&ArticleViews> = articles.iter().collect();
    ranked.sort_by_key(|a| a.len());
    ranked.truncate(k);
    ranked
}
