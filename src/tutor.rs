//! Stress-adaptive tutoring: input validation and instruction selection.
//!
//! A request carries the student's question and a self-reported stress level
//! between 1 and 10. Levels above [`HIGH_STRESS_THRESHOLD`] get a brief,
//! scannable answer; everything else gets a structured explanation.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::provider::{ProviderError, TextGenerator};

pub const MIN_STRESS_LEVEL: i64 = 1;
pub const MAX_STRESS_LEVEL: i64 = 10;

/// Levels strictly above this value select [`Instruction::Brief`].
pub const HIGH_STRESS_THRESHOLD: u8 = 7;

const BRIEF_INSTRUCTION: &str = "You are Aura, a calm AI tutor helping a neurodiverse student \
who is under high stress right now.

GUIDELINES:
- Answer in 2-3 short bullet points, nothing more
- Put key terms and concepts in **bold**
- Add a light visual marker such as an emoji to each point
- Keep sentences short and direct
- Leave out anything that is not essential

Help the student understand the idea without adding to their load.";

const STANDARD_INSTRUCTION: &str = "You are Aura, a calm AI tutor helping a neurodiverse student.

GUIDELINES:
- Give a structured, detailed explanation
- Break the topic into clear, logical steps
- Illustrate each key point with an example
- Organize the answer with headings or numbered lists
- Offer more than one way to picture the concept when it helps

Help the student fully understand the topic.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'message' field is required and must be a non-empty string")]
    Message,
    #[error("'stress_level' must be an integer between 1 and 10")]
    StressLevel,
}

/// A stress level known to lie in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StressLevel(u8);

impl StressLevel {
    pub fn new(level: i64) -> Result<Self, ValidationError> {
        if (MIN_STRESS_LEVEL..=MAX_STRESS_LEVEL).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ValidationError::StressLevel)
        }
    }

    /// Accepts JSON integers, floats without a fractional part, and strings
    /// holding an integer. Anything else is rejected.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let level = match value {
            Value::Number(number) => match number.as_i64() {
                Some(level) => level,
                None => number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
                    .ok_or(ValidationError::StressLevel)?,
            },
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::StressLevel)?,
            _ => return Err(ValidationError::StressLevel),
        };

        Self::new(level)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 > HIGH_STRESS_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Standard,
    Brief,
}

impl Instruction {
    pub fn for_stress_level(level: StressLevel) -> Self {
        if level.is_high() {
            Self::Brief
        } else {
            Self::Standard
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Standard => STANDARD_INSTRUCTION,
            Self::Brief => BRIEF_INSTRUCTION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Brief => "brief",
        }
    }
}

/// A request that passed validation and may be sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorQuery {
    pub message: String,
    pub stress_level: StressLevel,
}

impl TutorQuery {
    /// Validates raw request fields. The message is checked before the
    /// stress level. Whitespace only matters for the emptiness check; the
    /// message is kept as sent.
    pub fn validate(
        message: Option<&Value>,
        stress_level: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        let message = match message {
            Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
            _ => return Err(ValidationError::Message),
        };

        let stress_level = stress_level
            .ok_or(ValidationError::StressLevel)
            .and_then(StressLevel::from_json)?;

        Ok(Self {
            message,
            stress_level,
        })
    }

    pub fn instruction(&self) -> Instruction {
        Instruction::for_stress_level(self.stress_level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorAnswer {
    pub response: String,
    pub stress_level: StressLevel,
}

/// Issues exactly one generation call for an already validated query.
pub async fn ask_tutor(
    generator: &dyn TextGenerator,
    query: TutorQuery,
) -> Result<TutorAnswer, ProviderError> {
    let instruction = query.instruction();
    info!(
        stress_level = query.stress_level.get(),
        instruction = instruction.name(),
        message_len = query.message.len(),
        "Forwarding tutor question"
    );

    let response = generator.generate(instruction.text(), &query.message).await?;

    Ok(TutorAnswer {
        response,
        stress_level: query.stress_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level(value: i64) -> StressLevel {
        StressLevel::new(value).unwrap()
    }

    #[test]
    fn levels_up_to_seven_use_standard_instruction() {
        for value in 1..=7 {
            assert_eq!(
                Instruction::for_stress_level(level(value)),
                Instruction::Standard,
                "level {value}"
            );
        }
    }

    #[test]
    fn levels_above_seven_use_brief_instruction() {
        for value in 8..=10 {
            assert_eq!(
                Instruction::for_stress_level(level(value)),
                Instruction::Brief,
                "level {value}"
            );
        }
    }

    #[test]
    fn stress_level_rejects_out_of_range() {
        for value in [-3, 0, 11, 15, i64::MAX] {
            assert_eq!(StressLevel::new(value), Err(ValidationError::StressLevel));
        }
    }

    #[test]
    fn stress_level_accepts_integer_like_json() {
        assert_eq!(StressLevel::from_json(&json!(4)), Ok(level(4)));
        assert_eq!(StressLevel::from_json(&json!(9.0)), Ok(level(9)));
        assert_eq!(StressLevel::from_json(&json!(" 6 ")), Ok(level(6)));
    }

    #[test]
    fn stress_level_rejects_non_integers() {
        for value in [
            json!(7.5),
            json!(true),
            json!(null),
            json!("seven"),
            json!("3.2"),
            json!([5]),
            json!({"level": 5}),
            json!(1e300),
        ] {
            assert_eq!(
                StressLevel::from_json(&value),
                Err(ValidationError::StressLevel),
                "{value}"
            );
        }
    }

    #[test]
    fn validate_rejects_blank_or_missing_message() {
        let stress = json!(5);
        for message in [None, Some(json!("")), Some(json!("   \n\t")), Some(json!(42))] {
            assert_eq!(
                TutorQuery::validate(message.as_ref(), Some(&stress)),
                Err(ValidationError::Message)
            );
        }
    }

    #[test]
    fn validate_requires_stress_level() {
        let message = json!("What is photosynthesis?");
        assert_eq!(
            TutorQuery::validate(Some(&message), None),
            Err(ValidationError::StressLevel)
        );
    }

    #[test]
    fn validate_checks_message_before_stress_level() {
        let stress = json!(99);
        assert_eq!(
            TutorQuery::validate(None, Some(&stress)),
            Err(ValidationError::Message)
        );
    }

    #[test]
    fn validate_keeps_message_as_sent() {
        let message = json!("  explain fractions \n");
        let stress = json!(9);
        let query = TutorQuery::validate(Some(&message), Some(&stress)).unwrap();
        assert_eq!(query.message, "  explain fractions \n");
        assert_eq!(query.instruction(), Instruction::Brief);
    }

    #[test]
    fn validation_errors_name_the_field() {
        assert!(ValidationError::Message.to_string().contains("'message'"));
        assert!(ValidationError::StressLevel.to_string().contains("between 1 and 10"));
    }

    #[test]
    fn brief_instruction_asks_for_bullets_and_bold() {
        let text = Instruction::Brief.text();
        assert!(text.contains("2-3 short bullet points"));
        assert!(text.contains("**bold**"));
        assert!(Instruction::Standard.text().contains("example"));
    }
}
