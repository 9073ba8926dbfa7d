//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Word pair moderation

use std::time::Duration;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::configtool::ModerationSettings;
use crate::error::PassError;

pub const ACCEPTABLE_TOKEN: &str = "ACCEPTABLE";
pub const UNACCEPTABLE_TOKEN: &str = "UNACCEPTABLE";

const SYSTEM_INSTRUCTION: &str = "You are a content moderator for a password generator. \
Reply with exactly one word: ACCEPTABLE or UNACCEPTABLE. Do not add punctuation or explanation.";

/// Outcome of an acceptability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Acceptable,
    Unacceptable,
    /// The service could not be asked or its answer could not be read.
    Unknown,
}

impl Verdict {
    pub fn is_acceptable(self) -> bool {
        self == Verdict::Acceptable
    }

    /// Maps a reply from the service. Only the exact acceptable token passes.
    pub fn from_reply(reply: &str) -> Self {
        if reply.trim() == ACCEPTABLE_TOKEN {
            Verdict::Acceptable
        } else {
            Verdict::Unacceptable
        }
    }
}

/// Decides whether two words may appear together in a password.
///
/// Implementations must not fail: every error path ends in [`Verdict::Unknown`].
pub trait AcceptabilityChecker {
    fn check(&self, first: &str, second: &str) -> Verdict;
}

/// Accepts every pair without asking anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCheck;

impl AcceptabilityChecker for NoCheck {
    fn check(&self, _first: &str, _second: &str) -> Verdict {
        Verdict::Acceptable
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatRequest {
    pub fn for_pair(model: &str, first: &str, second: &str) -> Self {
        let question = format!(
            "Do the words \"{}\" and \"{}\", individually or read together as a phrase, \
carry a negative, offensive or inappropriate connotation?",
            first, second
        );
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_INSTRUCTION.to_string() },
                ChatMessage { role: "user".to_string(), content: question },
            ],
        }
    }
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn reply(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

#[derive(Debug, Error)]
enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response contained no reply")]
    EmptyReply,
}

/// Asks a chat-completions service whether a word pair is acceptable.
#[derive(Clone)]
pub struct RemoteCheck {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl RemoteCheck {
    pub fn new(api_key: impl Into<String>, settings: &ModerationSettings) -> Result<Self, PassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| PassError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn ask(&self, first: &str, second: &str) -> Result<String, ServiceError> {
        let body = ChatRequest::for_pair(&self.model, first, second);
        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        response
            .reply()
            .map(str::to_string)
            .ok_or(ServiceError::EmptyReply)
    }
}

impl AcceptabilityChecker for RemoteCheck {
    fn check(&self, first: &str, second: &str) -> Verdict {
        match self.ask(first, second) {
            Ok(reply) => {
                let verdict = Verdict::from_reply(&reply);
                debug!(?verdict, "moderation reply received");
                verdict
            }
            Err(e) => {
                warn!("Moderation check failed, rejecting pair: {}", e);
                Verdict::Unknown
            }
        }
    }
}

/// Picks the checker once, at startup.
pub fn build_checker(
    check_acceptability: bool,
    settings: &ModerationSettings,
) -> Result<Box<dyn AcceptabilityChecker>, PassError> {
    if !check_acceptability {
        return Ok(Box::new(NoCheck));
    }
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            PassError::config(
                "Acceptability check requires an API key (set PAIRPASS_API_KEY or api_key in the config file)",
            )
        })?;
    info!(endpoint = %settings.endpoint, model = %settings.model, "acceptability check enabled");
    Ok(Box::new(RemoteCheck::new(api_key, settings)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc::{self, Receiver};
    use std::thread;

    // 读取完整请求（请求头 + Content-Length 指定的正文）
    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serves one canned HTTP response on loopback and hands back the request it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (ModerationSettings, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            let _ = tx.send(request);
        });
        let settings = ModerationSettings {
            api_key: Some("test-key".to_string()),
            endpoint: format!("http://{}/v1/chat/completions", addr),
            model: "test-model".to_string(),
            timeout_secs: 5,
        };
        (settings, rx)
    }

    fn check_against(status: &'static str, body: &'static str) -> (Verdict, String) {
        let (settings, rx) = serve_once(status, body);
        let checker = RemoteCheck::new("test-key", &settings).unwrap();
        let verdict = checker.check("happy", "dream");
        let request = rx.recv().unwrap_or_default();
        (verdict, request)
    }

    fn unreachable_settings() -> ModerationSettings {
        ModerationSettings {
            api_key: Some("test-key".to_string()),
            // discard port on loopback, nothing listens there
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "test-model".to_string(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_reply_mapping() {
        assert_eq!(Verdict::from_reply("ACCEPTABLE"), Verdict::Acceptable);
        assert_eq!(Verdict::from_reply(" ACCEPTABLE\n"), Verdict::Acceptable);
        assert_eq!(Verdict::from_reply("UNACCEPTABLE"), Verdict::Unacceptable);
        assert_eq!(Verdict::from_reply("acceptable"), Verdict::Unacceptable);
        assert_eq!(Verdict::from_reply("ACCEPTABLE."), Verdict::Unacceptable);
        assert_eq!(Verdict::from_reply(""), Verdict::Unacceptable);
    }

    #[test]
    fn test_no_check_accepts_everything() {
        assert_eq!(NoCheck.check("anything", "goes"), Verdict::Acceptable);
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest::for_pair("test-model", "happy", "dream");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        let question = json["messages"][1]["content"].as_str().unwrap();
        assert!(question.contains("\"happy\""));
        assert!(question.contains("\"dream\""));
        let instruction = json["messages"][0]["content"].as_str().unwrap();
        assert!(instruction.contains(ACCEPTABLE_TOKEN));
        assert!(instruction.contains(UNACCEPTABLE_TOKEN));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"ACCEPTABLE"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.reply(), Some("ACCEPTABLE"));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.reply(), None);

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap();
        assert_eq!(null_content.reply(), None);
    }

    #[test]
    fn test_transport_failure_is_unknown() {
        let checker = RemoteCheck::new("test-key", &unreachable_settings()).unwrap();
        assert_eq!(checker.check("happy", "dream"), Verdict::Unknown);
    }

    #[test]
    fn test_acceptable_reply_from_service() {
        let (verdict, request) = check_against(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"ACCEPTABLE"}}]}"#,
        );
        assert_eq!(verdict, Verdict::Acceptable);
        let request = request.to_ascii_lowercase();
        assert!(request.starts_with("post /v1/chat/completions"));
        assert!(request.contains("authorization: bearer test-key"));
        assert!(request.contains("\"model\":\"test-model\""));
    }

    #[test]
    fn test_unacceptable_reply_from_service() {
        let (verdict, _) = check_against(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"UNACCEPTABLE"}}]}"#,
        );
        assert_eq!(verdict, Verdict::Unacceptable);
    }

    #[test]
    fn test_server_error_is_unknown() {
        let (verdict, _) = check_against(
            "500 Internal Server Error",
            r#"{"error":{"message":"boom"}}"#,
        );
        assert_eq!(verdict, Verdict::Unknown);
    }

    #[test]
    fn test_empty_choices_is_unknown() {
        let (verdict, _) = check_against("200 OK", r#"{"choices":[]}"#);
        assert_eq!(verdict, Verdict::Unknown);
    }

    #[test]
    fn test_malformed_body_is_unknown() {
        let (verdict, _) = check_against("200 OK", "not json");
        assert_eq!(verdict, Verdict::Unknown);
    }

    #[test]
    fn test_build_checker_requires_key() {
        let mut settings = unreachable_settings();
        settings.api_key = None;
        let err = build_checker(true, &settings).err().unwrap();
        assert!(err.is_configuration());

        settings.api_key = Some("   ".to_string());
        assert!(build_checker(true, &settings).is_err());

        // key is irrelevant when checking is off
        assert!(build_checker(false, &settings).is_ok());
    }
}
