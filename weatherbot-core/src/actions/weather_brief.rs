use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    detail::WeatherField,
    model::WeatherSnapshot,
    protocol::{Dispatcher, Event, Tracker},
    provider::WeatherProvider,
};

use super::{
    Action, fetch_or_report, format_field, format_value, require_location, summary,
    weather_data_event,
};

/// Short weather summary that also answers "is it raining/snowing/sunny?"
/// questions found in the user's message.
#[derive(Debug, Clone)]
pub struct WeatherBriefAction {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherBriefAction {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Action for WeatherBriefAction {
    fn name(&self) -> &'static str {
        "action_weather_brief"
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let Some(location) = require_location(tracker, dispatcher) else {
            return Vec::new();
        };
        let Some(snapshot) = fetch_or_report(self.provider.as_ref(), &location, dispatcher).await
        else {
            return Vec::new();
        };

        let question = tracker.latest_text().to_lowercase();
        dispatcher.utter_text(brief_reply(&question, &location, &snapshot));

        vec![weather_data_event(&snapshot)]
    }
}

fn brief_reply(question: &str, location: &str, snapshot: &WeatherSnapshot) -> String {
    let condition = snapshot.condition().to_lowercase();
    let summary = summary(snapshot);

    if question.contains("rain") {
        let precip = snapshot.precipitation_mm.unwrap_or(0.0);
        if precip > 0.0 || condition.contains("rain") {
            format!(
                "Yes, it's currently raining in {location}. {summary}. Precipitation: {}mm.",
                format_value(Some(precip))
            )
        } else {
            format!("No, it's not raining in {location} right now. {summary}.")
        }
    } else if question.contains("snow") {
        if condition.contains("snow") {
            format!("Yes, it's snowing in {location}. {summary}.")
        } else {
            format!("No, it's not snowing in {location}. {summary}.")
        }
    } else if question.contains("sun") {
        if condition.contains("sunny") || condition.contains("clear") {
            format!("Yes, it's sunny in {location}. {summary}.")
        } else {
            format!("Not very sunny in {location} right now. {summary}.")
        }
    } else if question.contains("cloud") {
        let cloud = snapshot.cloud_percent.unwrap_or(0.0);
        format!("Cloud cover in {location}: {}%. {summary}.", format_field(WeatherField::Cloud, cloud))
    } else {
        format!("Current weather in {location}: {summary}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{StubProvider, run, texts, tracker};
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> WeatherSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rain_question_uses_precipitation() {
        let wet = snapshot(json!({ "temp_c": 11.0, "condition": { "text": "Overcast" }, "precip_mm": 0.3 }));
        assert_eq!(
            brief_reply("is it raining?", "Leeds", &wet),
            "Yes, it's currently raining in Leeds. Overcast, 11.0°C. Precipitation: 0.3mm."
        );

        let dry = snapshot(json!({ "temp_c": 11.0, "condition": { "text": "Overcast" } }));
        assert_eq!(
            brief_reply("will it rain", "Leeds", &dry),
            "No, it's not raining in Leeds right now. Overcast, 11.0°C."
        );
    }

    #[test]
    fn rain_in_condition_counts_without_precipitation() {
        let s = snapshot(json!({ "temp_c": 9.0, "condition": { "text": "Light rain shower" }, "precip_mm": 0 }));
        assert_eq!(
            brief_reply("rain?", "Cork", &s),
            "Yes, it's currently raining in Cork. Light rain shower, 9.0°C. Precipitation: 0.0mm."
        );
    }

    #[test]
    fn snow_question() {
        let s = snapshot(json!({ "temp_c": -2.0, "condition": { "text": "Light snow" } }));
        assert_eq!(brief_reply("is it snowing", "Oslo", &s), "Yes, it's snowing in Oslo. Light snow, -2.0°C.");

        let s = snapshot(json!({ "temp_c": -2.0, "condition": { "text": "Clear" } }));
        assert_eq!(brief_reply("any snow?", "Oslo", &s), "No, it's not snowing in Oslo. Clear, -2.0°C.");
    }

    #[test]
    fn sun_question_accepts_clear() {
        let s = snapshot(json!({ "temp_c": 20.0, "condition": { "text": "Clear" } }));
        assert_eq!(brief_reply("is it sunny", "Nice", &s), "Yes, it's sunny in Nice. Clear, 20.0°C.");

        let s = snapshot(json!({ "temp_c": 20.0, "condition": { "text": "Mist" } }));
        assert_eq!(brief_reply("sun out?", "Nice", &s), "Not very sunny in Nice right now. Mist, 20.0°C.");
    }

    #[test]
    fn cloud_question_reports_cover() {
        let s = snapshot(json!({ "temp_c": 15.0, "condition": { "text": "Partly cloudy" }, "cloud": 25 }));
        assert_eq!(
            brief_reply("how cloudy is it", "Porto", &s),
            "Cloud cover in Porto: 25%. Partly cloudy, 15.0°C."
        );
    }

    #[test]
    fn other_questions_get_general_summary() {
        let s = snapshot(json!({ "temp_c": 15.0, "condition": { "text": "Partly cloudy" } }));
        assert_eq!(
            brief_reply("what's the weather like", "Porto", &s),
            "Current weather in Porto: Partly cloudy, 15.0°C"
        );
    }

    #[tokio::test]
    async fn run_reads_latest_message_and_stores_data() {
        let action = WeatherBriefAction::new(Arc::new(StubProvider::returning(json!({
            "temp_c": 4.0, "condition": { "text": "Moderate snow" }
        }))));
        let t = tracker(json!({
            "slots": { "location": "Tromsø" },
            "latest_message": { "text": "Is it SNOWING in Tromsø?" }
        }));

        let (events, messages) = run(&action, &t).await;

        assert_eq!(texts(&messages), ["Yes, it's snowing in Tromsø. Moderate snow, 4.0°C."]);
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn run_asks_for_location() {
        let action = WeatherBriefAction::new(Arc::new(StubProvider::unconfigured()));

        let (events, messages) = run(&action, &tracker(json!({}))).await;

        assert!(events.is_empty());
        assert_eq!(messages[0].response.as_deref(), Some("utter_ask_location"));
    }
}
