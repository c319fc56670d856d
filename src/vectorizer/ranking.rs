use std::hash::Hash;

use ahash::RandomState;
use indexmap::IndexMap;

use crate::vectorizer::TermCandidate;

/// Per-key maximum over a stream of per-document scores
///
/// A term keeps the strongest score any single document gave it; scores are
/// never summed or averaged. Keys stay in first-offered order.
#[derive(Debug, Clone)]
pub struct MaxPool<K>
where
    K: Eq + Hash,
{
    scores: IndexMap<K, f64, RandomState>,
}

impl<K> Default for MaxPool<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> MaxPool<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            scores: IndexMap::with_hasher(RandomState::new()),
        }
    }

    /// Keep `score` if `key` is new or `score` beats the stored one
    #[inline]
    pub fn offer(&mut self, key: K, score: f64) {
        match self.scores.get_mut(&key) {
            Some(best) => {
                if score > *best {
                    *best = score;
                }
            }
            None => {
                self.scores.insert(key, score);
            }
        }
    }

    /// Fold another pool in; keys new to `self` are appended in `other`'s order
    pub fn merge(&mut self, other: MaxPool<K>) {
        for (key, score) in other.scores {
            self.offer(key, score);
        }
    }

    pub fn into_vec(self) -> Vec<(K, f64)> {
        self.scores.into_iter().collect()
    }
}

/// Ranked term list
#[derive(Debug)]
pub struct RankedTerms {
    pub list: Vec<TermCandidate>,
}

impl RankedTerms {
    pub fn new(list: Vec<TermCandidate>) -> Self {
        RankedTerms { list }
    }

    /// Sort by descending score
    /// Stable: equal scores keep their incoming order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|c| !c.tfidf_score.is_nan());
        self.list.sort_by(|a, b| b.tfidf_score.total_cmp(&a.tfidf_score));
        self
    }

    /// Drop candidates whose score is not strictly positive
    pub fn retain_positive(&mut self) -> &mut Self {
        self.list.retain(|c| c.tfidf_score > 0.0);
        self
    }

    pub fn into_vec(self) -> Vec<TermCandidate> {
        self.list
    }
}

/// Two-bucket merge of candidates
///
/// Domain candidates and the rest are sorted *independently* by descending
/// score, then the domain bucket is placed in front of the other bucket and
/// the result is cut at `limit`. A domain term therefore outranks every
/// non-domain term whatever the scores.
pub fn diversify<I>(candidates: I, limit: usize) -> Vec<TermCandidate>
where
    I: IntoIterator<Item = TermCandidate>,
{
    let (domain, other): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|c| c.in_domain);

    let mut domain = RankedTerms::new(domain);
    domain.sort_by_score();
    let mut other = RankedTerms::new(other);
    other.sort_by_score();

    let mut merged = domain.into_vec();
    merged.extend(other.into_vec());
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(term: &str, score: f64, in_domain: bool) -> TermCandidate {
        TermCandidate {
            term: term.to_string(),
            n: term.split(' ').count(),
            tfidf_score: score,
            in_domain,
        }
    }

    #[test]
    fn max_pool_keeps_the_strongest_document() {
        let mut pool = MaxPool::new();
        pool.offer("graph", 0.10);
        pool.offer("tree", 0.30);
        pool.offer("graph", 0.25);
        pool.offer("graph", 0.05);
        // a sum would have been 0.40
        assert_eq!(pool.into_vec(), vec![("graph", 0.25), ("tree", 0.30)]);
    }

    #[test]
    fn max_pool_merge_is_order_preserving() {
        let mut left = MaxPool::new();
        left.offer("a", 1.0);
        let mut right = MaxPool::new();
        right.offer("b", 2.0);
        right.offer("a", 3.0);
        left.merge(right);
        assert_eq!(left.into_vec(), vec![("a", 3.0), ("b", 2.0)]);
    }

    #[test]
    fn domain_bucket_precedes_higher_scores() {
        let ranked = diversify(
            vec![
                candidate("loud", 0.5, false),
                candidate("quiet", 0.01, true),
                candidate("louder", 0.9, false),
            ],
            10,
        );
        let order: Vec<&str> = ranked.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(order, vec!["quiet", "louder", "loud"]);
    }

    #[test]
    fn buckets_are_stable_and_truncated() {
        let ranked = diversify(
            vec![
                candidate("first", 0.2, false),
                candidate("second", 0.2, false),
                candidate("third", 0.1, false),
            ],
            2,
        );
        let order: Vec<&str> = ranked.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn sort_drops_nan_and_filters_non_positive() {
        let mut ranked = RankedTerms::new(vec![
            candidate("zero", 0.0, false),
            candidate("nan", f64::NAN, false),
            candidate("one", 1.0, false),
        ]);
        ranked.sort_by_score().retain_positive();
        let order: Vec<&str> = ranked.list.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(order, vec!["one"]);
    }
}
