//! The uniform `{type, message}` result returned by every handler.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MessageType {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not found")]
    NotFound,
    #[serde(rename = "Already present")]
    Conflict,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub message: String,
}

impl Message {
    pub fn new(kind: MessageType, message: impl Into<String>) -> Self {
        Message {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            MessageType::Ok => StatusCode::OK,
            MessageType::NotFound => StatusCode::NOT_FOUND,
            MessageType::Conflict => StatusCode::CONFLICT,
        }
    }
}

pub fn success(message: impl Into<String>) -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message::new(MessageType::Ok, message)))
}

pub fn created(message: impl Into<String>) -> (StatusCode, Json<Message>) {
    (StatusCode::CREATED, Json(Message::new(MessageType::Ok, message)))
}

pub fn not_found(message: impl Into<String>) -> Message {
    Message::new(MessageType::NotFound, message)
}

pub fn conflict(message: impl Into<String>) -> Message {
    Message::new(MessageType::Conflict, message)
}

pub fn json_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn json_created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}
