use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    advice::OutfitAdvice,
    model::WeatherSnapshot,
    protocol::{Dispatcher, Event, Tracker},
    provider::WeatherProvider,
};

use super::{Action, LOCATION_SLOT, WEATHER_DATA_SLOT, fetch_or_report};

const NO_RECENT_WEATHER: &str =
    "I don't have recent weather to base an outfit on. Ask for the weather first.";

/// Outfit advice from the stored `weather_data` slot, fetching only when the
/// slot is empty.
#[derive(Debug, Clone)]
pub struct ProvideOutfitAction {
    provider: Arc<dyn WeatherProvider>,
}

impl ProvideOutfitAction {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

fn stored_snapshot(tracker: &Tracker) -> Option<WeatherSnapshot> {
    let value = tracker.get_slot(WEATHER_DATA_SLOT)?;
    serde_json::from_value::<WeatherSnapshot>(value.clone()).ok().filter(|s| !s.is_empty())
}

#[async_trait]
impl Action for ProvideOutfitAction {
    fn name(&self) -> &'static str {
        "action_provide_outfit"
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let snapshot = match stored_snapshot(tracker) {
            Some(snapshot) => snapshot,
            None => {
                let location =
                    tracker.slot_str(LOCATION_SLOT).filter(|_| self.provider.is_configured());
                let Some(location) = location else {
                    dispatcher.utter_text(NO_RECENT_WEATHER);
                    return Vec::new();
                };
                match fetch_or_report(self.provider.as_ref(), &location, dispatcher).await {
                    Some(snapshot) => snapshot,
                    None => return Vec::new(),
                }
            }
        };

        // Rain and snow advice needs no temperature.
        let advice = match snapshot.temperature_celsius {
            Some(temperature) => Some(OutfitAdvice::suggest(temperature, snapshot.condition())),
            None => OutfitAdvice::from_condition(snapshot.condition()),
        };
        let Some(advice) = advice else {
            dispatcher.utter_text(NO_RECENT_WEATHER);
            return Vec::new();
        };

        dispatcher.utter_text(format!("Outfit suggestion: {advice}"));

        // Advice does not change conversation state.
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{StubProvider, run, texts, tracker};
    use serde_json::json;

    #[tokio::test]
    async fn uses_stored_weather_without_fetching() {
        let provider = Arc::new(StubProvider::returning(json!({ "temp_c": 30.0 })));
        let action = ProvideOutfitAction::new(provider.clone());
        let t = tracker(json!({
            "slots": {
                "location": "Helsinki",
                "weather_data": { "temp_c": -8.0, "condition": { "text": "Overcast" } }
            }
        }));

        let (events, messages) = run(&action, &t).await;

        assert!(events.is_empty());
        assert_eq!(
            texts(&messages),
            ["Outfit suggestion: Freezing — wear a heavy winter coat, thermal layers and warm boots."]
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn fetches_when_slot_is_empty() {
        let provider = Arc::new(StubProvider::returning(json!({
            "temp_c": 22.0, "condition": { "text": "Patchy rain nearby" }
        })));
        let action = ProvideOutfitAction::new(provider.clone());
        let t = tracker(json!({ "slots": { "location": "Paris", "weather_data": {} } }));

        let (_, messages) = run(&action, &t).await;

        assert_eq!(
            texts(&messages),
            ["Outfit suggestion: It looks wet — bring an umbrella and wear a waterproof jacket."]
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn without_location_or_key_asks_for_weather_first() {
        let action = ProvideOutfitAction::new(Arc::new(StubProvider::returning(json!({
            "temp_c": 22.0
        }))));
        let (_, messages) = run(&action, &tracker(json!({}))).await;
        assert_eq!(texts(&messages), [NO_RECENT_WEATHER]);

        let provider = Arc::new(StubProvider::unconfigured());
        let action = ProvideOutfitAction::new(provider.clone());
        let t = tracker(json!({ "slots": { "location": "Paris" } }));
        let (_, messages) = run(&action, &t).await;
        assert_eq!(texts(&messages), [NO_RECENT_WEATHER]);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn stored_weather_without_temperature_is_not_enough() {
        let action = ProvideOutfitAction::new(Arc::new(StubProvider::unconfigured()));
        let t = tracker(json!({
            "slots": { "weather_data": { "humidity": 70, "condition": { "text": "Overcast" } } }
        }));

        let (_, messages) = run(&action, &t).await;

        assert_eq!(texts(&messages), [NO_RECENT_WEATHER]);
    }

    #[tokio::test]
    async fn stored_rain_without_temperature_still_gets_advice() {
        let action = ProvideOutfitAction::new(Arc::new(StubProvider::unconfigured()));
        let t = tracker(json!({ "slots": { "weather_data": { "condition": { "text": "Heavy rain" } } } }));

        let (events, messages) = run(&action, &t).await;

        assert!(events.is_empty());
        assert_eq!(
            texts(&messages),
            ["Outfit suggestion: It looks wet — bring an umbrella and wear a waterproof jacket."]
        );
    }

    #[tokio::test]
    async fn stored_snow_without_temperature_still_gets_advice() {
        let action = ProvideOutfitAction::new(Arc::new(StubProvider::unconfigured()));
        let t = tracker(json!({ "slots": { "weather_data": { "condition": { "text": "Light snow" } } } }));

        let (_, messages) = run(&action, &t).await;

        assert_eq!(
            texts(&messages),
            ["Outfit suggestion: Snowy — wear a warm coat, insulated boots and consider layers."]
        );
    }

    #[tokio::test]
    async fn fetch_error_is_reported() {
        let action = ProvideOutfitAction::new(Arc::new(StubProvider::api_error(
            "No matching location found.",
        )));
        let t = tracker(json!({ "slots": { "location": "Atlantis" } }));

        let (events, messages) = run(&action, &t).await;

        assert!(events.is_empty());
        assert_eq!(texts(&messages), ["WeatherAPI error: No matching location found."]);
    }
}
