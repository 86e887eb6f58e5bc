//! Move decisions and provider response validation.
//!
//! Provider output is untrusted, even when the provider was asked for
//! structured output. [`parse_decision`] is the only way to build a
//! [`MoveDecision`], so a decision's move is always a member of the legal-move
//! set it was checked against.

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::ArbitrationError;
use super::request::LegalMoves;

/// Field carrying the chosen board index.
pub const MOVE_FIELD: &str = "move";
/// Field carrying the short justification.
pub const RATIONALE_FIELD: &str = "rationale";
/// Accepted alias for [`RATIONALE_FIELD`].
const RATIONALE_ALIAS: &str = "reasoning";

/// A validated move choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDecision {
    chosen_move: usize,
    rationale: String,
}

impl MoveDecision {
    pub fn chosen_move(&self) -> usize {
        self.chosen_move
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }
}

/// Parses a raw provider payload and checks the move against `legal_moves`.
///
/// A payload wrapped in prose or a markdown fence is tolerated by extracting
/// the first top-level JSON object; the object must still carry an integer
/// `move` and a string `rationale` (or `reasoning`). Extra fields are ignored.
///
/// # Errors
///
/// - `MALFORMED_RESPONSE` if no JSON object can be parsed, a field is
///   missing, `move` is not an integer or the rationale is not a string.
/// - `ILLEGAL_MOVE` if the move is not in `legal_moves`. No substitute move
///   is ever chosen.
pub fn parse_decision(
    payload: &str,
    legal_moves: &LegalMoves,
) -> Result<MoveDecision, ArbitrationError> {
    let object = parse_object(payload)?;

    let raw_move = object.get(MOVE_FIELD).ok_or_else(|| {
        ArbitrationError::malformed_response(format!("missing field '{MOVE_FIELD}'"))
    })?;

    let chosen_move = match raw_move.as_i64() {
        Some(index) => index,
        // Integers beyond i64 can never be board indices.
        None if raw_move.is_u64() => {
            return Err(ArbitrationError::illegal_move(format!(
                "provider chose move {raw_move}, legal moves are {legal_moves}"
            )));
        }
        None => {
            return Err(ArbitrationError::malformed_response(format!(
                "field '{MOVE_FIELD}' must be an integer, got {raw_move}"
            )));
        }
    };

    let rationale = object
        .get(RATIONALE_FIELD)
        .or_else(|| object.get(RATIONALE_ALIAS))
        .ok_or_else(|| {
            ArbitrationError::malformed_response(format!("missing field '{RATIONALE_FIELD}'"))
        })?
        .as_str()
        .ok_or_else(|| {
            ArbitrationError::malformed_response(format!(
                "field '{RATIONALE_FIELD}' must be a string"
            ))
        })?;

    if !legal_moves.contains(chosen_move) {
        return Err(ArbitrationError::illegal_move(format!(
            "provider chose move {chosen_move}, legal moves are {legal_moves}"
        )));
    }

    Ok(MoveDecision {
        chosen_move: chosen_move as usize,
        rationale: rationale.trim().to_string(),
    })
}

fn parse_object(payload: &str) -> Result<Map<String, Value>, ArbitrationError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(ArbitrationError::malformed_response(
            "provider returned an empty payload",
        ));
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(direct) => {
            return extract_json_object(trimmed).ok_or_else(|| {
                ArbitrationError::malformed_response(format!(
                    "payload is not a JSON object: {direct}"
                ))
            });
        }
    };

    match value {
        Value::Object(object) => Ok(object),
        other => Err(ArbitrationError::malformed_response(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Returns the first balanced `{...}` span in `raw` that parses as a JSON
/// object.
///
/// Spans that are not JSON, such as `{center}` in prose, are skipped and the
/// scan resumes at the next opening brace.
fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let mut from = 0;
    while let Some(offset) = raw[from..].find('{') {
        let start = from + offset;
        if let Some(end) = balanced_end(raw, start) {
            if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&raw[start..=end]) {
                return Some(object);
            }
        }
        from = start + 1;
    }
    None
}

/// Byte index of the `}` closing the brace at `start`.
///
/// Braces inside JSON strings are skipped.
fn balanced_end(raw: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arbitration::ErrorKind;

    fn legal() -> LegalMoves {
        LegalMoves::new([2, 5, 6, 7, 8])
    }

    fn kind_of(payload: &str) -> ErrorKind {
        parse_decision(payload, &legal()).unwrap_err().kind()
    }

    #[test]
    fn accepts_legal_move() {
        let decision =
            parse_decision(r#"{"move": 2, "rationale": "Completing the top row."}"#, &legal())
                .unwrap();
        assert_eq!(decision.chosen_move(), 2);
        assert_eq!(decision.rationale(), "Completing the top row.");
    }

    #[test]
    fn accepts_legal_but_suboptimal_move() {
        let decision =
            parse_decision(r#"{"move": 5, "rationale": "Blocking."}"#, &legal()).unwrap();
        assert_eq!(decision.chosen_move(), 5);
    }

    #[test]
    fn accepts_reasoning_alias() {
        let decision =
            parse_decision(r#"{"reasoning": "Taking 6.", "move": 6}"#, &legal()).unwrap();
        assert_eq!(decision.rationale(), "Taking 6.");
    }

    #[test]
    fn tolerates_markdown_fence() {
        let payload = "```json\n{\"move\": 7, \"rationale\": \"Side {edge} cell.\"}\n```";
        let decision = parse_decision(payload, &legal()).unwrap();
        assert_eq!(decision.chosen_move(), 7);
        assert_eq!(decision.rationale(), "Side {edge} cell.");
    }

    #[test]
    fn rejects_out_of_range_move_as_illegal() {
        assert_eq!(kind_of(r#"{"move": 9, "rationale": "x"}"#), ErrorKind::IllegalMove);
        assert_eq!(kind_of(r#"{"move": -1, "rationale": "x"}"#), ErrorKind::IllegalMove);
        assert_eq!(
            kind_of(r#"{"move": 18446744073709551615, "rationale": "x"}"#),
            ErrorKind::IllegalMove
        );
    }

    #[test]
    fn rejects_occupied_cell_as_illegal() {
        assert_eq!(kind_of(r#"{"move": 0, "rationale": "x"}"#), ErrorKind::IllegalMove);
    }

    #[test]
    fn illegal_message_names_move_and_set() {
        let err = parse_decision(r#"{"move": 4, "rationale": "center"}"#, &legal()).unwrap_err();
        assert_eq!(
            err.message(),
            "provider chose move 4, legal moves are [2, 5, 6, 7, 8]"
        );
    }

    #[test]
    fn rejects_non_integer_move() {
        assert_eq!(
            kind_of(r#"{"move": "2", "rationale": "x"}"#),
            ErrorKind::MalformedResponse
        );
        assert_eq!(
            kind_of(r#"{"move": 2.5, "rationale": "x"}"#),
            ErrorKind::MalformedResponse
        );
        assert_eq!(
            kind_of(r#"{"move": null, "rationale": "x"}"#),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(kind_of(r#"{"rationale": "x"}"#), ErrorKind::MalformedResponse);
        assert_eq!(kind_of(r#"{"move": 2}"#), ErrorKind::MalformedResponse);
        assert_eq!(
            kind_of(r#"{"move": 2, "rationale": 7}"#),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn rejects_unparseable_payloads() {
        assert_eq!(kind_of(""), ErrorKind::MalformedResponse);
        assert_eq!(kind_of("I pick square two"), ErrorKind::MalformedResponse);
        assert_eq!(kind_of("[2]"), ErrorKind::MalformedResponse);
        assert_eq!(kind_of("{\"move\": 2,"), ErrorKind::MalformedResponse);
    }

    #[test]
    fn extract_skips_braces_in_strings() {
        let raw = r#"Answer: {"rationale": "a } brace", "move": 2} trailing"#;
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["rationale"], "a } brace");
        assert_eq!(object["move"], 2);
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("{unclosed").is_none());
    }

    #[test]
    fn skips_brace_spans_that_are_not_json() {
        let decision = parse_decision(
            r#"Considering {center} first. {"move": 2, "rationale": "win"}"#,
            &LegalMoves::new([2, 5]),
        )
        .unwrap();
        assert_eq!(decision.chosen_move(), 2);
        assert_eq!(decision.rationale(), "win");
    }

    #[test]
    fn finds_object_after_unclosed_brace() {
        let decision =
            parse_decision(r#"{ oops {"move": 5, "rationale": "block"}"#, &legal()).unwrap();
        assert_eq!(decision.chosen_move(), 5);
    }
}
