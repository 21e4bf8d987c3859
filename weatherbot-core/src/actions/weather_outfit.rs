use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    protocol::{Dispatcher, Event, Tracker},
    provider::WeatherProvider,
};

use super::{Action, fetch_or_report, require_location, summary, weather_data_event};

/// Single-step weather summary; stores the conditions for later outfit advice.
#[derive(Debug, Clone)]
pub struct WeatherOutfitAction {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherOutfitAction {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Action for WeatherOutfitAction {
    fn name(&self) -> &'static str {
        "action_weather_outfit"
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let Some(location) = require_location(tracker, dispatcher) else {
            return Vec::new();
        };
        let Some(snapshot) = fetch_or_report(self.provider.as_ref(), &location, dispatcher).await
        else {
            return Vec::new();
        };

        dispatcher.utter_text(format!("Current weather in {location}: {}", summary(&snapshot)));
        vec![weather_data_event(&snapshot)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{StubProvider, run, texts, tracker};
    use serde_json::json;

    #[tokio::test]
    async fn reports_summary_and_stores_weather_data() {
        let action = WeatherOutfitAction::new(Arc::new(StubProvider::returning(json!({
            "temp_c": 14.5, "condition": { "text": "Overcast" }, "humidity": 80
        }))));
        let t = tracker(json!({
            "latest_message": { "entities": [ { "entity": "location", "value": "Dublin" } ] }
        }));

        let (events, messages) = run(&action, &t).await;

        assert_eq!(texts(&messages), ["Current weather in Dublin: Overcast, 14.5°C"]);
        assert_eq!(
            events,
            [Event::slot_set(
                "weather_data",
                json!({ "temp_c": 14.5, "condition": { "text": "Overcast" }, "humidity": 80.0 })
            )]
        );
    }

    #[tokio::test]
    async fn asks_for_location_when_missing() {
        let provider = Arc::new(StubProvider::returning(json!({ "temp_c": 1.0 })));
        let action = WeatherOutfitAction::new(provider.clone());

        let (events, messages) = run(&action, &tracker(json!({}))).await;

        assert!(events.is_empty());
        assert_eq!(messages[0].response.as_deref(), Some("utter_ask_location"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_key_is_reported() {
        let action = WeatherOutfitAction::new(Arc::new(StubProvider::unconfigured()));
        let t = tracker(json!({ "slots": { "location": "Lima" } }));

        let (events, messages) = run(&action, &t).await;

        assert!(events.is_empty());
        assert_eq!(texts(&messages), ["WeatherAPI key not set."]);
    }
}
