//! Combining per-access-type series into one series per article.

use dino_common::{Access, Agent, ArticleSeries, PageviewRecord, PageviewsError, Result};
use std::collections::{BTreeMap, HashSet};

/// Sum several series of the same article month by month.
///
/// Buckets are matched on `timestamp`, not position. A bucket missing from
/// one source contributes zero views. Metadata of each output record comes
/// from the first source that has that bucket, so put the series whose
/// metadata should win first. The output carries `access` and the `user`
/// agent whatever agent the sources were requested with.
///
/// Fails with [`PageviewsError::Misaligned`] when a source repeats a
/// timestamp or the sources disagree on granularity.
pub fn combine_by_timestamp(sources: &[&[PageviewRecord]], access: Access) -> Result<ArticleSeries> {
    let granularity = sources
        .iter()
        .find_map(|source| source.first())
        .map(|record| record.granularity);

    let mut buckets: BTreeMap<&str, PageviewRecord> = BTreeMap::new();

    for (index, source) in sources.iter().enumerate() {
        let mut seen = HashSet::with_capacity(source.len());

        for record in source.iter() {
            if Some(record.granularity) != granularity {
                return Err(PageviewsError::misaligned(format!(
                    "source {index} mixes granularities at {} ({})",
                    record.timestamp, record.granularity
                )));
            }
            if !seen.insert(record.timestamp.as_str()) {
                return Err(PageviewsError::misaligned(format!(
                    "source {index} repeats timestamp {}",
                    record.timestamp
                )));
            }

            buckets
                .entry(record.timestamp.as_str())
                .and_modify(|combined| combined.views = combined.views.saturating_add(record.views))
                .or_insert_with(|| PageviewRecord {
                    access,
                    agent: Agent::User,
                    ..record.clone()
                });
        }
    }

    Ok(buckets.into_values().collect())
}

/// Replace every count with the running total up to and including it.
pub fn accumulate_views(series: &mut [PageviewRecord]) {
    let mut total: u64 = 0;
    for record in series {
        total = total.saturating_add(record.views);
        record.views = total;
    }
}
