use serde::Deserialize;
use toolgen_core::SubmissionError;

/// Body of a successful `/generate_tool` reply. Other keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    pub code: String,
}

/// Pulls the generated code out of a 2xx body.
pub fn parse_generate_response(body: &str) -> Result<String, SubmissionError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|err| SubmissionError::MalformedResponse(format!("invalid json: {err}")))?;
    if !value.is_object() {
        return Err(SubmissionError::MalformedResponse(
            "response is not a json object".to_string(),
        ));
    }
    match value.get("code") {
        Some(serde_json::Value::String(_)) => {}
        Some(_) => {
            return Err(SubmissionError::MalformedResponse(
                "field `code` is not a string".to_string(),
            ))
        }
        None => {
            return Err(SubmissionError::MalformedResponse(
                "missing field `code`".to_string(),
            ))
        }
    }
    let response: GenerateResponse = serde_json::from_value(value)
        .map_err(|err| SubmissionError::MalformedResponse(err.to_string()))?;
    Ok(response.code)
}
