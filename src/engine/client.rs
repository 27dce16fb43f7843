//! HTTP client for the spreadsheet-evaluation service.
//!
//! The service owns the formula engine; we send it the template bytes plus
//! the named inputs and get back the named outputs plus the filled workbook.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{EngineInput, ResultBundle};
use crate::engine::SpreadsheetEngine;
use crate::error::AppError;

const ENGINE_URL_VAR: &str = "BEAM_ENGINE_URL";
const ENGINE_KEY_VAR: &str = "BEAM_ENGINE_KEY";

pub struct HttpEngine {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEngine {
    /// Build a client from the environment (`.env` supported).
    ///
    /// `BEAM_ENGINE_URL` is required; `BEAM_ENGINE_KEY` is sent as a bearer
    /// token when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let endpoint = std::env::var(ENGINE_URL_VAR)
            .map_err(|_| AppError::input(format!("Missing {ENGINE_URL_VAR} in environment (.env).")))?;
        let api_key = std::env::var(ENGINE_KEY_VAR).ok();
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
        })
    }
}

#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    /// Base64-encoded template workbook.
    template: String,
    inputs: &'a [EngineInput],
}

#[derive(Debug, Deserialize)]
struct EvaluateResponse {
    values: BTreeMap<String, f64>,
    /// Base64-encoded filled workbook.
    file_content: String,
}

impl SpreadsheetEngine for HttpEngine {
    fn evaluate(&self, template: &[u8], inputs: &[EngineInput]) -> Result<ResultBundle, AppError> {
        let body = EvaluateRequest {
            template: BASE64.encode(template),
            inputs,
        };

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::engine(format!("Evaluation request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::engine(format!(
                "Evaluation request failed with status {}.",
                resp.status()
            )));
        }

        let body: EvaluateResponse = resp
            .json()
            .map_err(|e| AppError::engine(format!("Failed to parse evaluation response: {e}")))?;

        for (name, value) in &body.values {
            if !value.is_finite() {
                return Err(AppError::engine(format!(
                    "Evaluation output '{name}' is not a finite number."
                )));
            }
        }

        let workbook = BASE64
            .decode(body.file_content.as_bytes())
            .map_err(|e| AppError::engine(format!("Invalid workbook payload in response: {e}")))?;

        Ok(ResultBundle {
            values: body.values,
            workbook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OUTPUT_MAX_BENDING_STRESS, OUTPUT_MAX_DEFLECTION};

    #[test]
    fn request_wire_format_matches_the_service_contract() {
        let inputs = vec![EngineInput::new("L", 100.0), EngineInput::new("wL", 5.0)];
        let body = EvaluateRequest {
            template: BASE64.encode(b"xlsx"),
            inputs: &inputs,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["template"], "eGxzeA==");
        assert_eq!(json["inputs"][0]["name"], "L");
        assert_eq!(json["inputs"][0]["value"], 100.0);
        assert_eq!(json["inputs"][1]["name"], "wL");
    }

    #[test]
    fn response_with_values_and_file_content_parses() {
        let raw = format!(
            r#"{{"values":{{"{OUTPUT_MAX_DEFLECTION}":12.5,"{OUTPUT_MAX_BENDING_STRESS}":30.1}},"file_content":"AAEC"}}"#
        );
        let resp: EvaluateResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(resp.values[OUTPUT_MAX_DEFLECTION], 12.5);
        assert_eq!(resp.values[OUTPUT_MAX_BENDING_STRESS], 30.1);
        assert_eq!(
            BASE64.decode(resp.file_content.as_bytes()).unwrap(),
            vec![0u8, 1, 2]
        );
    }
}
