use reqwest::StatusCode;
use serde::Deserialize;

const INVALID_KEY_MESSAGE: &str = "API key not valid";
const INVALID_KEY_REASON: &str = "API_KEY_INVALID";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ApiErrorDetail {
    pub(crate) message: String,
    pub(crate) status: Option<String>,
    pub(crate) reasons: Vec<String>,
}

pub(crate) fn extract_api_error(body: &str) -> ApiErrorDetail {
    #[derive(Debug, Deserialize)]
    struct GeminiErrorEnvelope {
        error: Option<GeminiError>,
    }
    #[derive(Debug, Deserialize)]
    struct GeminiError {
        message: Option<String>,
        status: Option<String>,
        #[serde(default)]
        details: Vec<GeminiErrorDetail>,
    }
    #[derive(Debug, Deserialize)]
    struct GeminiErrorDetail {
        reason: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<GeminiErrorEnvelope>(body)
        && let Some(err) = parsed.error
    {
        return ApiErrorDetail {
            message: err.message.unwrap_or_else(|| "unknown error".to_string()),
            status: err.status,
            reasons: err
                .details
                .into_iter()
                .filter_map(|detail| detail.reason)
                .collect(),
        };
    }
    ApiErrorDetail {
        message: body.trim().to_string(),
        ..ApiErrorDetail::default()
    }
}

pub(crate) fn is_credential_rejection(status: StatusCode, detail: &ApiErrorDetail) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || detail.message.contains(INVALID_KEY_MESSAGE)
        || detail.reasons.iter().any(|reason| reason == INVALID_KEY_REASON)
}
