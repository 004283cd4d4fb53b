//! Purpose: Map a parsed JSON value tree into validated quiz domain objects.
//! Exports: `map_quiz`.
//! Role: The only constructor path for `QuizData`; all-or-nothing validation.
//! Invariants: Any failure aborts the whole mapping; no partial quiz escapes.
//! Invariants: Optional root fields default instead of failing.

use crate::api::quiz::{QuizData, QuizQuestion};
use crate::core::error::{Error, ErrorKind};
use crate::json::value::Value;

/// Walk a parsed root value into a `QuizData`, enforcing field presence,
/// types, and referential bounds.
pub fn map_quiz(root: &Value) -> Result<QuizData, Error> {
    let Value::Object(_) = root else {
        return Err(schema_error("Quiz payload root must be a JSON object"));
    };

    let questions_value = root
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error("Quiz payload missing \"questions\" array"))?;

    let mut questions = Vec::with_capacity(questions_value.len());
    for entry in questions_value {
        if entry.as_object().is_none() {
            return Err(schema_error("Question entry should be an object"));
        }
        let question = map_question(entry).map_err(|err| {
            let detail = err.message().unwrap_or("invalid question").to_string();
            schema_error(format!("Invalid question structure: {detail}")).with_source(err)
        })?;
        questions.push(question);
    }

    if questions.is_empty() {
        return Err(schema_error("Quiz payload returned zero questions"));
    }

    let quiz_id = optional_string(root.get("quizId"));
    let topic = optional_string(root.get("topic"));
    let difficulty = optional_string(root.get("difficulty"));
    let question_count = optional_count(root.get("questionCount"), questions.len() as i64);

    Ok(QuizData::new(
        quiz_id,
        topic,
        difficulty,
        question_count,
        questions,
    ))
}

/// `question` falls back to `prompt`, and `answerIndex` to `correctIndex`,
/// only when the primary key is absent.
fn map_question(entry: &Value) -> Result<QuizQuestion, Error> {
    let prompt = entry
        .get("question")
        .or_else(|| entry.get("prompt"))
        .and_then(Value::as_str)
        .ok_or_else(|| schema_error("Question prompt missing or not a string"))?;

    let raw_options = entry
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error("Options missing or not an array"))?;
    let mut options = Vec::with_capacity(raw_options.len());
    for option in raw_options {
        let option = option
            .as_str()
            .ok_or_else(|| schema_error("Option must be a string"))?;
        options.push(option.to_string());
    }

    let answer = entry
        .get("answerIndex")
        .or_else(|| entry.get("correctIndex"))
        .and_then(Value::as_number)
        .ok_or_else(|| schema_error("answerIndex missing or not a number"))?;
    let correct_index = answer.as_i64();
    if correct_index < 0 || correct_index as usize >= options.len() {
        return Err(schema_error("answerIndex out of bounds for options"));
    }

    Ok(QuizQuestion::new(
        prompt.to_string(),
        options,
        correct_index as usize,
    ))
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn optional_count(value: Option<&Value>, fallback: i64) -> i64 {
    value
        .and_then(Value::as_number)
        .map(|number| number.as_i64())
        .unwrap_or(fallback)
}

fn schema_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Schema).with_message(message)
}

#[cfg(test)]
mod tests {
    use super::map_quiz;
    use crate::core::error::ErrorKind;
    use crate::json::parse::parse;

    fn map(input: &str) -> Result<crate::api::quiz::QuizData, crate::core::error::Error> {
        let root = parse(input).expect("valid json");
        map_quiz(&root)
    }

    #[test]
    fn minimal_payload_maps_with_defaults() {
        let quiz =
            map(r#"{"questions":[{"question":"2+2?","options":["3","4"],"answerIndex":1}]}"#)
                .expect("quiz");
        assert_eq!(quiz.questions().len(), 1);
        let question = &quiz.questions()[0];
        assert_eq!(question.prompt(), "2+2?");
        assert_eq!(question.options(), ["3", "4"]);
        assert_eq!(question.correct_index(), 1);
        assert_eq!(quiz.question_count(), 1);
        assert_eq!(quiz.topic(), "");
        assert_eq!(quiz.difficulty(), "medium");
        assert_eq!(quiz.quiz_id(), None);
    }

    #[test]
    fn root_fields_carry_through_when_present() {
        let quiz = map(
            r#"{"quizId":"q-1","topic":"math","difficulty":"hard","questionCount":3,
                "questions":[{"question":"2+2?","options":["3","4"],"answerIndex":1}]}"#,
        )
        .expect("quiz");
        assert_eq!(quiz.quiz_id(), Some("q-1"));
        assert_eq!(quiz.topic(), "math");
        assert_eq!(quiz.difficulty(), "hard");
        assert_eq!(quiz.question_count(), 3);
    }

    #[test]
    fn mistyped_optional_fields_default_instead_of_failing() {
        let quiz = map(
            r#"{"quizId":7,"topic":null,"difficulty":["x"],"questionCount":"two",
                "questions":[{"question":"2+2?","options":["3","4"],"answerIndex":1}]}"#,
        )
        .expect("quiz");
        assert_eq!(quiz.quiz_id(), None);
        assert_eq!(quiz.topic(), "");
        assert_eq!(quiz.difficulty(), "medium");
        assert_eq!(quiz.question_count(), 1);
    }

    #[test]
    fn alias_fields_map_identically() {
        let primary =
            map(r#"{"questions":[{"question":"2+2?","options":["3","4"],"answerIndex":1}]}"#)
                .expect("primary");
        let alias =
            map(r#"{"questions":[{"prompt":"2+2?","options":["3","4"],"correctIndex":1}]}"#)
                .expect("alias");
        assert_eq!(primary, alias);
    }

    #[test]
    fn root_must_be_an_object() {
        let err = map(r#"[1,2,3]"#).expect_err("array root");
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.message(), Some("Quiz payload root must be a JSON object"));
    }

    #[test]
    fn questions_array_is_required() {
        let err = map(r#"{"topic":"math"}"#).expect_err("missing questions");
        assert_eq!(
            err.message(),
            Some("Quiz payload missing \"questions\" array")
        );

        let err = map(r#"{"questions":"nope"}"#).expect_err("mistyped questions");
        assert_eq!(
            err.message(),
            Some("Quiz payload missing \"questions\" array")
        );
    }

    #[test]
    fn empty_questions_array_fails() {
        let err = map(r#"{"questions":[]}"#).expect_err("zero questions");
        assert_eq!(err.message(), Some("Quiz payload returned zero questions"));
    }

    #[test]
    fn non_object_question_entry_fails() {
        let err = map(r#"{"questions":[42]}"#).expect_err("entry type");
        assert_eq!(err.message(), Some("Question entry should be an object"));
    }

    #[test]
    fn out_of_bounds_answer_index_aborts_the_mapping() {
        let err = map(r#"{"questions":[{"question":"q","options":["a","b"],"answerIndex":2}]}"#)
            .expect_err("index == len");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: answerIndex out of bounds for options")
        );

        let err = map(r#"{"questions":[{"question":"q","options":["a","b"],"answerIndex":-1}]}"#)
            .expect_err("negative index");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: answerIndex out of bounds for options")
        );
    }

    #[test]
    fn one_bad_question_fails_the_whole_quiz() {
        let err = map(
            r#"{"questions":[
                {"question":"ok","options":["a","b"],"answerIndex":0},
                {"question":"bad","options":["a"],"answerIndex":3}
            ]}"#,
        )
        .expect_err("second question invalid");
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(
            err.message(),
            Some("Invalid question structure: answerIndex out of bounds for options")
        );
    }

    #[test]
    fn question_field_errors_carry_their_detail() {
        let err = map(r#"{"questions":[{"options":["a"],"answerIndex":0}]}"#)
            .expect_err("missing prompt");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: Question prompt missing or not a string")
        );

        let err = map(r#"{"questions":[{"question":"q","answerIndex":0}]}"#)
            .expect_err("missing options");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: Options missing or not an array")
        );

        let err = map(r#"{"questions":[{"question":"q","options":["a",2],"answerIndex":0}]}"#)
            .expect_err("mistyped option");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: Option must be a string")
        );

        let err = map(r#"{"questions":[{"question":"q","options":["a"]}]}"#)
            .expect_err("missing answer");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: answerIndex missing or not a number")
        );
    }

    #[test]
    fn fractional_answer_index_truncates_like_a_count() {
        let quiz = map(r#"{"questions":[{"question":"q","options":["a","b"],"answerIndex":1.9}]}"#)
            .expect("truncated index");
        assert_eq!(quiz.questions()[0].correct_index(), 1);
    }

    #[test]
    fn alias_is_ignored_when_primary_key_is_present_but_mistyped() {
        let err = map(
            r#"{"questions":[{"question":7,"prompt":"fallback","options":["a"],"answerIndex":0}]}"#,
        )
        .expect_err("no fallback for mistyped primary");
        assert_eq!(
            err.message(),
            Some("Invalid question structure: Question prompt missing or not a string")
        );
    }
}
