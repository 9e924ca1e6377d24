use rand::seq::index;
use rand::Rng;

use crate::model::{Question, QuestionSet};

/// Draw up to `count` distinct questions uniformly at random without
/// replacement. The result is in random order; the set is left untouched.
pub fn sample<R: Rng + ?Sized>(set: &QuestionSet, count: usize, rng: &mut R) -> Vec<Question> {
    let amount = count.min(set.questions.len());
    if amount == 0 {
        return Vec::new();
    }

    index::sample(rng, set.questions.len(), amount)
        .into_iter()
        .map(|i| set.questions[i].clone())
        .collect()
}

pub fn sample_with_thread_rng(set: &QuestionSet, count: usize) -> Vec<Question> {
    sample(set, count, &mut rand::thread_rng())
}

/// Clamp a user-entered question count into `1..=available`. An empty set
/// always yields zero.
pub fn clamp_count(requested: i64, available: usize) -> usize {
    if available == 0 {
        return 0;
    }
    let requested = usize::try_from(requested.max(1)).unwrap_or(usize::MAX);
    requested.min(available)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::AnswerOption;

    fn set_of(n: usize) -> QuestionSet {
        QuestionSet {
            name: "s".to_string(),
            title: "S".to_string(),
            questions: (1..=n)
                .map(|i| Question {
                    id: i.to_string(),
                    text: format!("Q{}", i),
                    options: vec![AnswerOption {
                        id: "A".to_string(),
                        text: "x".to_string(),
                        is_correct: true,
                    }],
                    basis: None,
                })
                .collect(),
            digest: None,
        }
    }

    #[test]
    fn test_sample_size_is_min_of_count_and_available() {
        let set = set_of(7);
        let mut rng = StdRng::seed_from_u64(7);
        for k in 0..12 {
            let picked = sample(&set, k, &mut rng);
            assert_eq!(picked.len(), k.min(7));

            let ids: HashSet<&str> = picked.iter().map(|q| q.id.as_str()).collect();
            assert_eq!(ids.len(), picked.len(), "duplicates in sample of {}", k);
            assert!(picked.iter().all(|q| set.question(&q.id) == Some(q)));
        }
    }

    #[test]
    fn test_oversized_request_returns_whole_set() {
        let set = set_of(2);
        let picked = sample_with_thread_rng(&set, 5);
        assert_eq!(picked.len(), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_sample_is_not_always_in_source_order() {
        let set = set_of(10);
        let mut rng = StdRng::seed_from_u64(42);
        let reordered = (0..20).any(|_| {
            let picked = sample(&set, 10, &mut rng);
            picked.iter().map(|q| q.id.clone()).collect::<Vec<_>>()
                != set.questions.iter().map(|q| q.id.clone()).collect::<Vec<_>>()
        });
        assert!(reordered);
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(-3, 10), 1);
        assert_eq!(clamp_count(0, 10), 1);
        assert_eq!(clamp_count(4, 10), 4);
        assert_eq!(clamp_count(40, 10), 10);
        assert_eq!(clamp_count(5, 0), 0);
    }
}
