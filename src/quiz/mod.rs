pub mod mistakes;
pub mod practice;
pub mod round;
pub mod sampler;
pub mod session;
pub mod words;

pub use mistakes::{MistakeStats, MistakeStore};
pub use practice::Practice;
pub use round::{OPTION_COUNT, ROUND_SIZE, Question, Round, build_round};
pub use sampler::SampleError;
pub use session::{Answer, QuizSession, Status};
pub use words::{WordBank, WordEntry};
