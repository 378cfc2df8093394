//! Question bank loaded once at startup.
//!
//! The bank is a JSON array of questions, each with a stable id, a category,
//! the question text and exactly four answer options. Any malformed entry is
//! fatal at load time; submissions are validated against the loaded bank.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Number of answer options per question; responses are ordinals 1..=4.
pub const OPTION_COUNT: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub text: String,
    pub options: [String; 4],
}

/// Immutable, validated question set.
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionBank {
    /// Load and validate the bank from a JSON file. Missing file, malformed
    /// JSON, duplicate ids, or blank fields abort with an error — the server
    /// refuses to start without a usable bank.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CoreError::QuestionBank(format!(
                "cannot read question bank {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        Self::from_questions(questions)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(CoreError::QuestionBank("question bank is empty".into()));
        }

        let mut by_id = HashMap::with_capacity(questions.len());
        for (idx, q) in questions.iter().enumerate() {
            if q.id.trim().is_empty() || q.text.trim().is_empty() {
                return Err(CoreError::QuestionBank(format!(
                    "question at index {idx} has a blank id or text"
                )));
            }
            if q.options.iter().any(|o| o.trim().is_empty()) {
                return Err(CoreError::QuestionBank(format!(
                    "question '{}' has a blank option",
                    q.id
                )));
            }
            if by_id.insert(q.id.clone(), idx).is_some() {
                return Err(CoreError::QuestionBank(format!(
                    "duplicate question id '{}'",
                    q.id
                )));
            }
        }

        Ok(Self { questions, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&idx| &self.questions[idx])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Check a response map against the bank: every answered question must
    /// exist and every ordinal must be in 1..=4.
    pub fn validate_responses(&self, responses: &BTreeMap<String, u8>) -> Result<()> {
        if responses.is_empty() {
            return Err(CoreError::InvalidResponse("no answers given".into()));
        }
        for (question_id, ordinal) in responses {
            if !self.by_id.contains_key(question_id) {
                return Err(CoreError::InvalidResponse(format!(
                    "unknown question id '{question_id}'"
                )));
            }
            if !(1..=OPTION_COUNT).contains(ordinal) {
                return Err(CoreError::InvalidResponse(format!(
                    "answer {ordinal} for '{question_id}' is outside 1..={OPTION_COUNT}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            category: "Leadership".to_string(),
            text: format!("Question {id}?"),
            options: [
                "Strongly disagree".into(),
                "Disagree".into(),
                "Agree".into(),
                "Strongly agree".into(),
            ],
        }
    }

    #[test]
    fn valid_bank_loads() {
        let bank = QuestionBank::from_questions(vec![question("q1"), question("q2")]).unwrap();
        assert_eq!(bank.len(), 2);
        assert!(bank.get("q1").is_some());
        assert!(bank.get("zz").is_none());
    }

    #[test]
    fn duplicate_id_is_fatal() {
        let result = QuestionBank::from_questions(vec![question("q1"), question("q1")]);
        assert!(matches!(result, Err(CoreError::QuestionBank(_))));
    }

    #[test]
    fn blank_option_is_fatal() {
        let mut q = question("q1");
        q.options[2] = " ".into();
        assert!(QuestionBank::from_questions(vec![q]).is_err());
    }

    #[test]
    fn empty_bank_is_fatal() {
        assert!(QuestionBank::from_questions(vec![]).is_err());
    }

    #[test]
    fn response_validation() {
        let bank = QuestionBank::from_questions(vec![question("q1")]).unwrap();

        let ok = BTreeMap::from([("q1".to_string(), 3u8)]);
        assert!(bank.validate_responses(&ok).is_ok());

        let unknown = BTreeMap::from([("q9".to_string(), 3u8)]);
        assert!(matches!(
            bank.validate_responses(&unknown),
            Err(CoreError::InvalidResponse(_))
        ));

        let out_of_range = BTreeMap::from([("q1".to_string(), 5u8)]);
        assert!(bank.validate_responses(&out_of_range).is_err());

        assert!(bank.validate_responses(&BTreeMap::new()).is_err());
    }
}
