//! Chatbot actions backed by the weather provider.
//!
//! Every action reports provider failures to the user and returns no events;
//! only an unknown action name is an error at this level.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    detail::WeatherField,
    model::{WeatherRequest, WeatherSnapshot},
    protocol::{ActionCall, ActionResponse, Dispatcher, Event, Tracker},
    provider::WeatherProvider,
};

pub mod provide_outfit;
pub mod weather_brief;
pub mod weather_detail;
pub mod weather_outfit;

pub use provide_outfit::ProvideOutfitAction;
pub use weather_brief::WeatherBriefAction;
pub use weather_detail::WeatherDetailAction;
pub use weather_outfit::WeatherOutfitAction;

pub const LOCATION_SLOT: &str = "location";
pub const DETAIL_SLOT: &str = "weather_detail";
pub const WEATHER_DATA_SLOT: &str = "weather_data";
pub const ASK_LOCATION_RESPONSE: &str = "utter_ask_location";

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event>;
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No registered action found for name '{0}'.")]
    NotFound(String),
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every weather action, sharing one provider.
    pub fn weather(provider: Arc<dyn WeatherProvider>) -> Self {
        let mut registry = Self::new();
        registry.register(WeatherOutfitAction::new(provider.clone()));
        registry.register(WeatherDetailAction::new(provider.clone()));
        registry.register(WeatherBriefAction::new(provider.clone()));
        registry.register(ProvideOutfitAction::new(provider));
        registry
    }

    pub fn register(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actions.iter().map(|a| a.name())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.iter().find(|a| a.name() == name).map(|a| a.as_ref())
    }

    pub async fn run(&self, call: &ActionCall) -> Result<ActionResponse, ActionError> {
        let action =
            self.get(&call.next_action).ok_or_else(|| ActionError::NotFound(call.next_action.clone()))?;

        info!(
            action = action.name(),
            sender = call.sender_id.as_deref().unwrap_or("-"),
            "running action"
        );

        let mut dispatcher = Dispatcher::new();
        let events = action.run(&mut dispatcher, &call.tracker).await;

        Ok(ActionResponse { events, responses: dispatcher.into_messages() })
    }
}

/// Location from slot or entity; asks the user for one when absent.
pub(crate) fn require_location(tracker: &Tracker, dispatcher: &mut Dispatcher) -> Option<String> {
    let location = tracker.slot_or_entity(LOCATION_SLOT);
    if location.is_none() {
        dispatcher.utter_response(ASK_LOCATION_RESPONSE);
    }
    location
}

/// Fetch current conditions, telling the user what went wrong on failure.
pub(crate) async fn fetch_or_report(
    provider: &dyn WeatherProvider,
    location: &str,
    dispatcher: &mut Dispatcher,
) -> Option<WeatherSnapshot> {
    match provider.current(&WeatherRequest::new(location)).await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(location, error = %err, "weather lookup failed");
            dispatcher.utter_text(err.user_message());
            None
        }
    }
}

pub(crate) fn weather_data_event(snapshot: &WeatherSnapshot) -> Event {
    let value = serde_json::to_value(snapshot).unwrap_or(Value::Null);
    Event::slot_set(WEATHER_DATA_SLOT, value)
}

/// Float reading as the provider sent it: `18.0`, `12.5`, or `n/a`.
pub(crate) fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:?}"))
}

/// Like [`format_value`], but integral fields print without a fraction.
pub(crate) fn format_field(field: WeatherField, value: f64) -> String {
    if field.is_integral() { value.to_string() } else { format_value(Some(value)) }
}

/// "{condition}, {temp}°C"
pub(crate) fn summary(snapshot: &WeatherSnapshot) -> String {
    format!("{}, {}°C", snapshot.condition(), format_value(snapshot.temperature_celsius))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}
