//! Wire types for the chatbot framework's custom-action webhook.
//!
//! The framework POSTs an [`ActionCall`] naming the action to run together
//! with the conversation tracker; the server answers with an
//! [`ActionResponse`] holding events to apply and messages to send.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub domain: Value,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// The slice of conversation state the actions read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

impl Tracker {
    /// Slot value, treating `null` as unset.
    pub fn get_slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).filter(|v| !v.is_null())
    }

    pub fn slot_str(&self, name: &str) -> Option<String> {
        self.get_slot(name).and_then(value_to_text)
    }

    /// Value of the first entity called `name` in the latest user message.
    pub fn latest_entity(&self, name: &str) -> Option<String> {
        self.latest_message
            .entities
            .iter()
            .find(|e| e.entity == name)
            .and_then(|e| value_to_text(&e.value))
    }

    /// Slot first, then the entity of the same name.
    pub fn slot_or_entity(&self, name: &str) -> Option<String> {
        self.slot_str(name).or_else(|| self.latest_entity(name))
    }

    pub fn latest_text(&self) -> &str {
        self.latest_message.text.as_deref().unwrap_or("")
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet { name: String, value: Value, timestamp: Option<f64> },
}

impl Event {
    pub fn slot_set(name: impl Into<String>, value: Value) -> Self {
        Event::SlotSet { name: name.into(), value, timestamp: None }
    }
}

/// One outgoing bot message: literal text or a domain response template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BotMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Collects the messages an action wants to send.
#[derive(Debug, Default)]
pub struct Dispatcher {
    messages: Vec<BotMessage>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.messages.push(BotMessage { text: Some(text.into()), ..Default::default() });
    }

    pub fn utter_response(&mut self, template: impl Into<String>) {
        self.messages.push(BotMessage { response: Some(template.into()), ..Default::default() });
    }

    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

/// Body returned when the requested action does not exist.
#[derive(Debug, Clone, Serialize)]
pub struct ActionErrorBody {
    pub error: String,
    pub action_name: String,
}
