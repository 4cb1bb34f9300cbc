use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Validation failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub identification_number: String,
    pub issue_date: NaiveDate,
}

impl RegistrationInput {
    pub fn issue_date_display(&self) -> String {
        self.issue_date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Body of `POST <registration>/fecha`. The date travels as `yyyy-MM-dd`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IssueDateRequest {
    #[serde(rename = "fecha")]
    pub issue_date: NaiveDate,
}

impl From<&RegistrationInput> for IssueDateRequest {
    fn from(input: &RegistrationInput) -> Self {
        Self { issue_date: input.issue_date }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueDateResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(rename = "preguntas")]
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub message: String,
    pub security_questions: Vec<String>,
}

impl RegistrationOutcome {
    pub fn has_questions(&self) -> bool {
        !self.security_questions.is_empty()
    }
}

/// Picking one security question from a validated registration before moving on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSelection {
    questions: Vec<String>,
    selected: Option<usize>,
}

impl QuestionSelection {
    pub fn new(outcome: &RegistrationOutcome) -> Self {
        Self {
            questions: outcome.security_questions.clone(),
            selected: None,
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Selects `question` if it is one of the offered questions.
    pub fn select(&mut self, question: &str) -> bool {
        match self.questions.iter().position(|q| q == question) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|index| self.questions[index].as_str())
    }

    pub fn can_continue(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(questions: &[&str]) -> RegistrationOutcome {
        RegistrationOutcome {
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            security_questions: questions.iter().map(|q| q.to_string()).collect(),
        }
    }

    #[test]
    fn issue_date_request_serializes_iso_date() {
        let request = IssueDateRequest {
            issue_date: NaiveDate::from_ymd_opt(2015, 3, 9).unwrap(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"fecha": "2015-03-09"}));

        let decoded: IssueDateRequest = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn issue_date_display_uses_day_first() {
        let input = RegistrationInput {
            identification_number: "1".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2015, 3, 9).unwrap(),
        };
        assert_eq!(input.issue_date_display(), "09/03/2015");
    }

    #[test]
    fn response_without_questions_decodes() {
        let response: IssueDateResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(response.success);
        assert_eq!(response.questions, None);
    }

    #[test]
    fn selection_requires_offered_question() {
        let mut selection = QuestionSelection::new(&outcome(&["Color favorito", "Ciudad natal"]));
        assert!(!selection.can_continue());

        assert!(!selection.select("Nombre de mascota"));
        assert!(!selection.can_continue());

        assert!(selection.select("Ciudad natal"));
        assert_eq!(selection.selected(), Some("Ciudad natal"));
        assert!(selection.can_continue());
    }

    #[test]
    fn empty_outcome_never_continues() {
        let empty = outcome(&[]);
        assert!(!empty.has_questions());

        let mut selection = QuestionSelection::new(&empty);
        assert!(!selection.select(""));
        assert!(!selection.can_continue());
    }
}
