use super::mistakes::{MistakeStats, MistakeStore, dec_mistake, inc_mistake, word_key};
use super::round::build_round;
use super::sampler::SampleError;
use super::session::{Answer, QuizSession, Status};
use super::words::WordEntry;
use rand::Rng;
use tracing::{debug, info};

/// Ties the word bank, the mistake document, and the session state machine
/// together: every wrong pick records a miss, every correct pick forgives
/// one, and fresh rounds are drawn with the updated weights.
pub struct Practice {
    bank: Vec<WordEntry>,
    store: MistakeStore,
    stats: MistakeStats,
    session: QuizSession,
}

impl Practice {
    pub fn begin<R: Rng + ?Sized>(
        bank: Vec<WordEntry>,
        store: MistakeStore,
        rng: &mut R,
    ) -> Result<Self, SampleError> {
        let stats = store.load();
        let round = build_round(&bank, &stats, rng)?;
        info!(
            bank_size = bank.len(),
            tracked_words = stats.len(),
            "Practice started"
        );
        Ok(Self {
            bank,
            store,
            stats,
            session: QuizSession::new(round),
        })
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn stats(&self) -> &MistakeStats {
        &self.stats
    }

    /// Submit a pick for the current question and update the mistake
    /// document accordingly.
    pub fn pick(&mut self, option_index: usize) -> Option<Answer> {
        let word = self.session.current()?.word.hanzi.clone();
        let answer = self.session.pick(option_index)?;

        match answer {
            Answer::Wrong => {
                debug!(word, "Miss recorded");
                self.stats = inc_mistake(&self.store, &self.stats, word_key(&word));
            }
            Answer::Correct => {
                self.stats = dec_mistake(&self.store, &self.stats, word_key(&word));
            }
        }
        Some(answer)
    }

    /// Advance the cursor. Returns true when this finished the round, which
    /// is the caller's cue to celebrate.
    pub fn advance(&mut self) -> bool {
        let was_done = self.session.status() == Status::Done;
        let done = self.session.advance() == Status::Done;
        if done && !was_done {
            info!(
                score = self.session.correct_count(),
                out_of = self.session.len(),
                "Round complete"
            );
        }
        done && !was_done
    }

    /// Discard the current session and draw a new round with the weights the
    /// mistake document holds now.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SampleError> {
        let round = build_round(&self.bank, &self.stats, rng)?;
        self.session = QuizSession::new(round);
        Ok(())
    }
}
