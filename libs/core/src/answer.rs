//! Answers produced by the bot answer service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DigestError, DigestResult};

/// Flag marking a multiple-choice question whose buttons take their text from an attribute.
pub const MULTIPLE_OPTIONS_FLAG: &str = "multiple-options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    Answer,
    PolarQuestion,
    MultipleChoiceQuestion,
    ExtendedContentsAnswer,
}

impl AnswerKind {
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "answer" => Some(AnswerKind::Answer),
            "polarQuestion" => Some(AnswerKind::PolarQuestion),
            "multipleChoiceQuestion" => Some(AnswerKind::MultipleChoiceQuestion),
            "extendedContentsAnswer" => Some(AnswerKind::ExtendedContentsAnswer),
            _ => None,
        }
    }

    pub fn of(raw: &Value) -> Option<Self> {
        raw.get("type")
            .and_then(Value::as_str)
            .and_then(Self::from_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Answer => "answer",
            AnswerKind::PolarQuestion => "polarQuestion",
            AnswerKind::MultipleChoiceQuestion => "multipleChoiceQuestion",
            AnswerKind::ExtendedContentsAnswer => "extendedContentsAnswer",
        }
    }
}

/// Looks up `name` in an optional attribute object. Non-object attributes have no entries.
fn lookup<'a>(attributes: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    attributes
        .and_then(|attrs| attrs.get(name))
        .filter(|value| !value.is_null())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextAnswer {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl TextAnswer {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        lookup(self.attributes.as_ref(), name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl AnswerOption {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        lookup(self.attributes.as_ref(), name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl QuestionAnswer {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Answer that bundles several sub-answers, each offered as a button.
///
/// Sub-answers are kept as raw objects because the whole object is echoed back to the bot
/// when the user picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAnswer {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "subAnswers", default)]
    pub sub_answers: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BotAnswer {
    Answer(TextAnswer),
    PolarQuestion(QuestionAnswer),
    MultipleChoiceQuestion(QuestionAnswer),
    ExtendedContentsAnswer(ExtendedAnswer),
}

impl BotAnswer {
    /// Parses a single answer object, dispatching on its `type`.
    ///
    /// ```
    /// use smooch_core::{AnswerKind, BotAnswer};
    /// use serde_json::json;
    ///
    /// let answer = BotAnswer::from_value(&json!({"type": "answer", "message": "Hi"})).unwrap();
    /// assert_eq!(answer.kind(), AnswerKind::Answer);
    /// assert!(BotAnswer::from_value(&json!({"type": "carousel"})).is_err());
    /// ```
    pub fn from_value(raw: &Value) -> DigestResult<Self> {
        let kind = AnswerKind::of(raw).ok_or_else(|| DigestError::UnknownAnswerType {
            payload: raw.clone(),
        })?;
        let invalid = |source| DigestError::InvalidAnswer {
            kind: kind.as_str(),
            source,
        };
        let answer = match kind {
            AnswerKind::Answer => BotAnswer::Answer(TextAnswer::deserialize(raw).map_err(invalid)?),
            AnswerKind::PolarQuestion => {
                BotAnswer::PolarQuestion(QuestionAnswer::deserialize(raw).map_err(invalid)?)
            }
            AnswerKind::MultipleChoiceQuestion => {
                BotAnswer::MultipleChoiceQuestion(QuestionAnswer::deserialize(raw).map_err(invalid)?)
            }
            AnswerKind::ExtendedContentsAnswer => {
                BotAnswer::ExtendedContentsAnswer(ExtendedAnswer::deserialize(raw).map_err(invalid)?)
            }
        };
        Ok(answer)
    }

    pub fn kind(&self) -> AnswerKind {
        match self {
            BotAnswer::Answer(_) => AnswerKind::Answer,
            BotAnswer::PolarQuestion(_) => AnswerKind::PolarQuestion,
            BotAnswer::MultipleChoiceQuestion(_) => AnswerKind::MultipleChoiceQuestion,
            BotAnswer::ExtendedContentsAnswer(_) => AnswerKind::ExtendedContentsAnswer,
        }
    }
}

/// Splits a bot-answer container into its answer objects.
///
/// `{"answers": [...]}` yields each entry; a bare object with a known `type` yields itself.
/// Anything else is an unknown response.
pub fn answer_entries(body: &Value) -> DigestResult<Vec<&Value>> {
    if let Some(answers) = body.get("answers").and_then(Value::as_array) {
        return Ok(answers.iter().collect());
    }
    if AnswerKind::of(body).is_some() {
        return Ok(vec![body]);
    }
    Err(DigestError::UnknownApiResponse {
        payload: body.clone(),
    })
}
