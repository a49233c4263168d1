use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answers keyed by the question they respond to, as returned by `POST /gen-answer`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GeneratedAnswers(BTreeMap<String, String>);

impl GeneratedAnswers {
    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Pairs in the order the questions were asked. Answers to questions the
    /// backend added on its own follow, sorted by question.
    pub fn ordered<'a>(&'a self, questions: &'a [String]) -> Vec<(&'a str, &'a str)> {
        let mut pairs: Vec<(&str, &str)> = questions
            .iter()
            .filter_map(|q| self.0.get_key_value(q.as_str()))
            .map(|(q, a)| (q.as_str(), a.as_str()))
            .collect();

        for (q, a) in &self.0 {
            if !questions.iter().any(|asked| asked == q) {
                pairs.push((q.as_str(), a.as_str()));
            }
        }
        pairs
    }
}

impl From<BTreeMap<String, String>> for GeneratedAnswers {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for GeneratedAnswers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Plain-text export of a generation result.
pub fn answers_to_text(
    role: &str,
    company: &str,
    questions: &[String],
    answers: &GeneratedAnswers,
) -> String {
    let mut content = format!("Interview Answers for {role} at {company}\n\n");
    for (question, answer) in answers.ordered(questions) {
        content.push_str(&format!("Q: {question}\n\nA: {answer}\n\n---\n\n"));
    }
    content
}
