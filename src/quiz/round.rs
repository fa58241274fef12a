use super::mistakes::{MistakeStats, word_key};
use super::sampler::{SampleError, pick_unique_indices, weighted_pick_unique_indices};
use super::words::WordEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

pub const ROUND_SIZE: usize = 5;
pub const OPTION_COUNT: usize = 4;

/// Each extra recorded miss makes a word this much likelier to come up again.
const MISS_WEIGHT: f64 = 4.0;

/// One multiple-choice question: the word being asked plus four shuffled
/// options, exactly one of which is the word itself.
#[derive(Debug, Clone)]
pub struct Question {
    pub word: WordEntry,
    pub options: Vec<WordEntry>,
}

impl Question {
    pub fn is_correct(&self, option_index: usize) -> bool {
        self.options
            .get(option_index)
            .is_some_and(|opt| opt.hanzi == self.word.hanzi)
    }
}

/// A fixed-size batch of questions drawn for one round of play.
#[derive(Debug, Clone)]
pub struct Round {
    pub items: Vec<Question>,
}

/// Draw a round from the bank. Question words are picked by roulette wheel
/// with weight `1 + 4 × missCount`, distractors uniformly from the rest.
pub fn build_round<R: Rng + ?Sized>(
    bank: &[WordEntry],
    stats: &MistakeStats,
    rng: &mut R,
) -> Result<Round, SampleError> {
    let weights: Vec<f64> = bank
        .iter()
        .map(|w| 1.0 + f64::from(stats.get(word_key(&w.hanzi)).copied().unwrap_or(0)) * MISS_WEIGHT)
        .collect();

    let question_indices = weighted_pick_unique_indices(&weights, ROUND_SIZE, rng)?;

    let mut items = Vec::with_capacity(ROUND_SIZE);
    for word_index in question_indices {
        let correct = bank[word_index].clone();
        let exclude = HashSet::from([word_index]);
        let distractor_indices = pick_unique_indices(bank.len(), OPTION_COUNT - 1, &exclude, rng)?;

        let mut options: Vec<WordEntry> = std::iter::once(correct.clone())
            .chain(distractor_indices.into_iter().map(|i| bank[i].clone()))
            .collect();
        options.shuffle(rng);

        items.push(Question {
            word: correct,
            options,
        });
    }

    Ok(Round { items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank(size: usize) -> Vec<WordEntry> {
        (0..size)
            .map(|i| WordEntry {
                hanzi: format!("字{i}"),
                pinyin: format!("zi{i}"),
            })
            .collect()
    }

    #[test]
    fn round_has_five_questions_with_four_distinct_options() {
        let bank = bank(30);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let round = build_round(&bank, &MistakeStats::new(), &mut rng).unwrap();
            assert_eq!(round.items.len(), ROUND_SIZE);
            for question in &round.items {
                assert_eq!(question.options.len(), OPTION_COUNT);
                let distinct: HashSet<_> =
                    question.options.iter().map(|o| o.hanzi.as_str()).collect();
                assert_eq!(distinct.len(), OPTION_COUNT, "options repeat");
                assert!(
                    question
                        .options
                        .iter()
                        .any(|o| o.hanzi == question.word.hanzi),
                    "correct answer missing from options"
                );
            }
        }
    }

    #[test]
    fn question_words_are_distinct_within_a_round() {
        let bank = bank(30);
        let mut rng = StdRng::seed_from_u64(12);
        let round = build_round(&bank, &MistakeStats::new(), &mut rng).unwrap();
        let distinct: HashSet<_> = round.items.iter().map(|q| q.word.hanzi.as_str()).collect();
        assert_eq!(distinct.len(), ROUND_SIZE);
    }

    #[test]
    fn missed_words_come_up_more_often() {
        let bank = bank(30);
        let mut stats = MistakeStats::new();
        stats.insert("字3".to_string(), 20); // weight 81 vs 1 for the rest

        let mut rng = StdRng::seed_from_u64(13);
        let mut appearances = 0;
        for _ in 0..100 {
            let round = build_round(&bank, &stats, &mut rng).unwrap();
            if round.items.iter().any(|q| q.word.hanzi == "字3") {
                appearances += 1;
            }
        }
        // With ~74% of the wheel on one word its round-level appearance rate
        // should be far above the unweighted ~17%.
        assert!(appearances > 80, "missed word appeared {appearances}/100");
    }

    #[test]
    fn bank_smaller_than_round_fails() {
        let bank = bank(3);
        let mut rng = StdRng::seed_from_u64(14);
        assert!(build_round(&bank, &MistakeStats::new(), &mut rng).is_err());
    }

    #[test]
    fn is_correct_matches_by_hanzi() {
        let bank = bank(10);
        let mut rng = StdRng::seed_from_u64(15);
        let round = build_round(&bank, &MistakeStats::new(), &mut rng).unwrap();
        let question = &round.items[0];
        let correct_at = question
            .options
            .iter()
            .position(|o| o.hanzi == question.word.hanzi)
            .unwrap();
        assert!(question.is_correct(correct_at));
        for i in (0..OPTION_COUNT).filter(|&i| i != correct_at) {
            assert!(!question.is_correct(i));
        }
        assert!(!question.is_correct(OPTION_COUNT));
    }
}
