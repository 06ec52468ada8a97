//! Literal question answering over a transcript.
//!
//! This is a lookup, not semantic search: it finds the first sentence that
//! contains the question text verbatim (ignoring case).

/// Reply used when the transcript does not contain the question text.
pub const NO_ANSWER: &str = "Sorry, I could not find an answer in the transcript.";

/// A strategy for pulling an answer out of transcript text.
pub trait AnswerStrategy: Send + Sync {
    fn find_answer(&self, transcript: &str, question: &str) -> String;
}

/// Returns the first `". "`-delimited sentence containing the question.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSearch;

impl AnswerStrategy for SentenceSearch {
    fn find_answer(&self, transcript: &str, question: &str) -> String {
        let needle = question.to_lowercase();

        if !transcript.to_lowercase().contains(&needle) {
            return NO_ANSWER.to_string();
        }

        // A match straddling a sentence break falls through to the same reply
        // as no match at all.
        transcript
            .split(". ")
            .find(|sentence| sentence.to_lowercase().contains(&needle))
            .map(str::to_string)
            .unwrap_or_else(|| NO_ANSWER.to_string())
    }
}
