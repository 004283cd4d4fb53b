//! Purpose: Blocking HTTP client for the quiz-generation backend.
//! Exports: `QuizClient`, `decode_quiz`, `DEFAULT_BASE_URL`.
//! Role: One request/response exchange per call; wraps every failure into `Error`.
//! Invariants: Local validation happens before any network activity.
//! Invariants: Only connection establishment is bounded (10s); no total timeout.
//! Invariants: No retries; an abandoned call is not actively aborted.
#![allow(clippy::result_large_err)]

use std::time::Duration;

use url::Url;

use crate::api::quiz::QuizData;
use crate::api::request::QuizRequest;
use crate::api::schema::map_quiz;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse::parse;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const GENERATE_SEGMENTS: [&str; 3] = ["api", "quiz", "generate"];
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct QuizClient {
    base_url: Url,
    agent: ureq::Agent,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url.into())?;
        let agent = ureq::builder().timeout_connect(CONNECT_TIMEOUT).build();
        Ok(Self { base_url, agent })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request one generated quiz. Blocking; safe to call from any thread.
    pub fn request_quiz(
        &self,
        topic: &str,
        question_count: i64,
        difficulty: &str,
    ) -> Result<QuizData, Error> {
        let request = QuizRequest::new(topic, question_count, difficulty)?;
        let url = build_url(&self.base_url, &GENERATE_SEGMENTS)?;
        tracing::debug!(url = %url, topic = request.topic(), "requesting quiz");

        let response = self
            .agent
            .request("POST", url.as_str())
            .set("Content-Type", "application/json")
            .send_string(&request.to_json());
        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::new(ErrorKind::Protocol)
                    .with_message(format!("Backend returned status {code}"))
                    .with_status(code));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(Error::new(ErrorKind::Transport)
                    .with_message("Network error while contacting quiz backend")
                    .with_source(err));
            }
        };

        // ureq only turns 4xx/5xx into errors; anything else outside 2xx
        // (e.g. an unfollowed redirect) is still a protocol failure here.
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(Error::new(ErrorKind::Protocol)
                .with_message(format!("Backend returned status {status}"))
                .with_status(status));
        }
        tracing::debug!(status, "quiz response received");

        let body = response.into_string().map_err(|err| {
            Error::new(ErrorKind::Transport)
                .with_message("Network error while contacting quiz backend")
                .with_source(err)
        })?;
        decode_quiz(&body)
    }
}

/// Parse and map a raw response body. Syntax failures are wrapped without
/// losing the inner message or character offset; schema failures pass
/// through unchanged.
pub fn decode_quiz(body: &str) -> Result<QuizData, Error> {
    let root = parse(body).map_err(|err| {
        let offset = err.offset();
        let wrapped = Error::new(ErrorKind::Syntax)
            .with_message("Failed to parse quiz JSON")
            .with_source(err);
        match offset {
            Some(offset) => wrapped.with_offset(offset),
            None => wrapped,
        }
    })?;
    map_quiz(&root)
}

fn normalize_base_url(raw: String) -> Result<Url, Error> {
    let mut url = Url::parse(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid quiz backend base url")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(
            Error::new(ErrorKind::Usage).with_message("base url must use http or https scheme")
        );
    }
    if url.path() != "/" && !url.path().is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("base url must not include a path"));
    }
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn build_url(base_url: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base_url.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::new(ErrorKind::Usage).with_message("base url cannot be a base"))?;
        path.clear();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}
