use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::error::{DomainError, Result};
use crate::models::{Contributor, ContributorTotal};

/// Merge per-repository contributor lists into one ranking.
///
/// The first failure in `per_repository` order is returned as-is and nothing
/// is merged. Otherwise contributions are summed per login and the result is
/// sorted by descending total, with equal totals ordered by ascending login.
/// A per-login total that does not fit in a `u64` is an `ApiCallError`.
pub fn merge<I>(per_repository: I) -> Result<Vec<ContributorTotal>>
where
    I: IntoIterator<Item = Result<Vec<Contributor>>>,
{
    let lists = per_repository.into_iter().collect::<Result<Vec<_>>>()?;

    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for contributor in lists.into_iter().flatten() {
        let total = totals.entry(contributor.login).or_insert(0);
        *total = total.checked_add(contributor.contributions).ok_or_else(|| {
            DomainError::ApiCallError("Contribution total exceeds the supported range".to_string())
        })?;
    }

    let mut ranked: Vec<ContributorTotal> = totals
        .into_iter()
        .map(|(login, contributions)| ContributorTotal { login, contributions })
        .collect();

    // Stable: ties keep the map's ascending login order.
    ranked.sort_by_key(|total| Reverse(total.contributions));

    Ok(ranked)
}
