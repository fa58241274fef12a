use super::round::{Question, Round};

/// Where the learner is within the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for a pick.
    Idle,
    /// Picked the right option; the question is settled.
    Correct,
    /// Picked a wrong option; retrying is allowed.
    Wrong,
    /// All questions answered.
    Done,
}

/// What a pick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Correct,
    Wrong,
}

/// A round in progress: cursor over the questions, running score, and the
/// per-question status machine (pure logic, no I/O).
#[derive(Debug)]
pub struct QuizSession {
    round: Round,
    current_index: usize,
    correct_count: u32,
    status: Status,
}

impl QuizSession {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            current_index: 0,
            correct_count: 0,
            status: Status::Idle,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn len(&self) -> usize {
        self.round.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.round.items.is_empty()
    }

    /// The question under the cursor, or None once the session is done.
    pub fn current(&self) -> Option<&Question> {
        if self.status == Status::Done {
            return None;
        }
        self.round.items.get(self.current_index)
    }

    /// Submit a pick for the current question. Returns None when the pick is
    /// ignored: session done, question already settled, or index out of range.
    pub fn pick(&mut self, option_index: usize) -> Option<Answer> {
        if matches!(self.status, Status::Done | Status::Correct) {
            return None;
        }
        let question = self.round.items.get(self.current_index)?;
        if option_index >= question.options.len() {
            return None;
        }

        if question.is_correct(option_index) {
            self.status = Status::Correct;
            self.correct_count += 1;
            Some(Answer::Correct)
        } else {
            self.status = Status::Wrong;
            Some(Answer::Wrong)
        }
    }

    /// Move to the next question, or finish the session after the last one.
    /// Returns the new status.
    pub fn advance(&mut self) -> Status {
        if self.status == Status::Done {
            return Status::Done;
        }
        let next = self.current_index + 1;
        if next >= self.round.items.len() {
            self.status = Status::Done;
        } else {
            self.current_index = next;
            self.status = Status::Idle;
        }
        self.status
    }
}
