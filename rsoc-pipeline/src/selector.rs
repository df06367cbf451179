use std::cmp::Ordering;

use crate::util;

/// Ranks candidates by a numeric score and keeps the leading ones.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Rank, then cut to `size(query)` when one is given.
    fn select(&self, query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut ranked = self.sort(candidates);
        if let Some(limit) = self.size(query) {
            ranked.truncate(limit);
        }
        ranked
    }

    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Ranking key, highest first (e.g. a post's total ROI).
    fn score(&self, candidate: &C) -> f64;

    /// Highest score first. Equal scores keep input order; NaN ranks last.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut ranked = candidates;
        ranked.sort_by(|a, b| descending_nan_last(self.score(a), self.score(b)));
        ranked
    }

    /// How many candidates survive ranking; `None` keeps all.
    fn size(&self, _query: &Q) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_roi_ranks_first() {
        assert_eq!(descending_nan_last(50.0, 30.0), Ordering::Less);
        assert_eq!(descending_nan_last(30.0, 50.0), Ordering::Greater);
        assert_eq!(descending_nan_last(30.0, 30.0), Ordering::Equal);
    }

    #[test]
    fn nan_sorts_behind_any_number() {
        assert_eq!(descending_nan_last(f64::NAN, -1e9), Ordering::Greater);
        assert_eq!(descending_nan_last(-1e9, f64::NAN), Ordering::Less);
        assert_eq!(descending_nan_last(f64::NAN, f64::NAN), Ordering::Equal);
    }
}
