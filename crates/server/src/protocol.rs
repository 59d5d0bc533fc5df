//! JSON event framing for the socket gateway.
//!
//! Every frame is `{"event": <name>, "data": <payload>}`. Inbound names are
//! resolved through a fixed table in [`InboundEvent::decode`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::auth::domain::{AccountProfile, LoginInput, RegisterInput};
use service::auth::errors::ValidationError;
use thiserror::Error;

pub const EVENT_REGISTER: &str = "register";
pub const EVENT_LOGIN: &str = "login";

pub const MALFORMED_MSG: &str = "Malformed request";

/// Longest event name echoed back in an `Unknown event` reply, in chars.
pub const MAX_ECHOED_EVENT_NAME: usize = 32;

/// Undecoded frame
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(String),
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("binary frames are not supported")]
    BinaryFrame,
    #[error("invalid field: {0}")]
    InvalidField(#[from] ValidationError),
}

impl ProtocolError {
    pub fn client_message(&self) -> String {
        match self {
            ProtocolError::Malformed(_) | ProtocolError::BinaryFrame => MALFORMED_MSG.to_string(),
            ProtocolError::UnknownEvent(name) => {
                let shown: String = name.chars().take(MAX_ECHOED_EVENT_NAME).collect();
                if shown.len() < name.len() {
                    format!("Unknown event: {shown}...")
                } else {
                    format!("Unknown event: {shown}")
                }
            }
            ProtocolError::InvalidField(e) => e.to_string(),
        }
    }
}

/// Requests a client may send.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    Register(RegisterInput),
    Login(LoginInput),
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Register(_) => EVENT_REGISTER,
            InboundEvent::Login(_) => EVENT_LOGIN,
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        match envelope.event.as_str() {
            EVENT_REGISTER => Ok(InboundEvent::Register(decode_credentials(envelope.data)?)),
            EVENT_LOGIN => Ok(InboundEvent::Login(decode_credentials(envelope.data)?)),
            other => Err(ProtocolError::UnknownEvent(other.to_string())),
        }
    }
}

/// A `{username, password}` payload, shared by socket events and HTTP bodies.
pub trait Credentials {
    fn from_fields(username: String, password: String) -> Self;
}

impl Credentials for RegisterInput {
    fn from_fields(username: String, password: String) -> Self {
        RegisterInput { username, password }
    }
}

impl Credentials for LoginInput {
    fn from_fields(username: String, password: String) -> Self {
        LoginInput { username, password }
    }
}

/// Decode a credentials payload.
///
/// A null payload and missing or null fields become empty strings, which
/// validation then reports. A field holding anything but a string is rejected
/// with that field's "required and must be a string" text, username first.
/// Any payload other than an object or null is malformed.
pub fn decode_credentials<T: Credentials>(data: Value) -> Result<T, ProtocolError> {
    let fields = match data {
        Value::Null => return Ok(T::from_fields(String::new(), String::new())),
        Value::Object(fields) => fields,
        other => return Err(ProtocolError::Malformed(format!("expected an object payload, got {other}"))),
    };
    let username = string_field(fields.get("username"), ValidationError::MissingUsername)?;
    let password = string_field(fields.get("password"), ValidationError::MissingPassword)?;
    Ok(T::from_fields(username, password))
}

fn string_field(value: Option<&Value>, invalid: ValidationError) -> Result<String, ProtocolError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid.into()),
    }
}

/// The single terminal reply to one inbound event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ResponseEvent {
    RegistrationSuccess,
    LoginSuccess(AccountProfile),
    Error(String),
}

/// Sent verbatim if a reply cannot be serialized.
pub const FALLBACK_ERROR_FRAME: &str = r#"{"event":"error","data":"Internal server error"}"#;

impl ResponseEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ResponseEvent::RegistrationSuccess => "registrationSuccess",
            ResponseEvent::LoginSuccess(_) => "loginSuccess",
            ResponseEvent::Error(_) => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ResponseEvent::Error(_))
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
