use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    detail::{self, SUPPORTED_DETAILS},
    protocol::{Dispatcher, Event, Tracker},
    provider::WeatherProvider,
};

use super::{
    Action, DETAIL_SLOT, fetch_or_report, format_field, require_location, title_case,
    weather_data_event,
};

/// Answers a single requested metric such as humidity or wind.
#[derive(Debug, Clone)]
pub struct WeatherDetailAction {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherDetailAction {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Action for WeatherDetailAction {
    fn name(&self) -> &'static str {
        "action_weather_detail"
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let Some(location) = require_location(tracker, dispatcher) else {
            return Vec::new();
        };
        let Some(requested) = tracker.slot_or_entity(DETAIL_SLOT) else {
            dispatcher.utter_text(
                "Which weather detail do you want? (e.g. humidity, wind, UV, pressure)",
            );
            return Vec::new();
        };
        let Some(snapshot) = fetch_or_report(self.provider.as_ref(), &location, dispatcher).await
        else {
            return Vec::new();
        };

        let Some(resolved) = detail::resolve(&requested) else {
            dispatcher.utter_text(format!(
                "Sorry, I can't provide '{requested}'. Try: {SUPPORTED_DETAILS}."
            ));
            return Vec::new();
        };

        let label = title_case(&requested);
        let Some(value) = snapshot.value(resolved.field) else {
            dispatcher.utter_text(format!("{label} data not available for {location}."));
            return Vec::new();
        };

        dispatcher.utter_text(format!(
            "{label} in {location}: {}{}",
            format_field(resolved.field, value),
            resolved.unit
        ));
        vec![weather_data_event(&snapshot)]
    }
}
