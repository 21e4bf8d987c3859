use std::fmt;

/// Clothing advice derived from current conditions.
///
/// Precipitation in the condition text wins over temperature; otherwise the
/// temperature (Celsius) picks a band. Bands are closed below and open above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutfitAdvice {
    Wet,
    Snow,
    Hot,
    Mild,
    Cool,
    Cold,
    Freezing,
}

const WET_KEYWORDS: [&str; 3] = ["rain", "drizzle", "thunderstorm"];

impl OutfitAdvice {
    /// Pick advice for a temperature and a free-text condition.
    ///
    /// Total over its inputs: a NaN temperature fails every band check and
    /// ends up as [`OutfitAdvice::Freezing`].
    pub fn suggest(temperature_c: f64, condition: &str) -> Self {
        if let Some(advice) = Self::from_condition(condition) {
            return advice;
        }

        match temperature_c {
            t if t >= 26.0 => OutfitAdvice::Hot,
            t if (18.0..26.0).contains(&t) => OutfitAdvice::Mild,
            t if (10.0..18.0).contains(&t) => OutfitAdvice::Cool,
            t if (0.0..10.0).contains(&t) => OutfitAdvice::Cold,
            _ => OutfitAdvice::Freezing,
        }
    }

    /// Advice decided by the condition text alone (rain or snow), if any.
    pub fn from_condition(condition: &str) -> Option<Self> {
        let condition = condition.to_lowercase();

        if WET_KEYWORDS.iter().any(|k| condition.contains(k)) {
            Some(OutfitAdvice::Wet)
        } else if condition.contains("snow") {
            Some(OutfitAdvice::Snow)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutfitAdvice::Wet => "It looks wet — bring an umbrella and wear a waterproof jacket.",
            OutfitAdvice::Snow => "Snowy — wear a warm coat, insulated boots and consider layers.",
            OutfitAdvice::Hot => "Hot — light clothing, sunglasses and sunscreen are recommended.",
            OutfitAdvice::Mild => {
                "Nice weather — a t-shirt or light shirt is fine; take a light jacket just in case."
            }
            OutfitAdvice::Cool => "A bit cool — wear a sweater or layered clothing with a jacket.",
            OutfitAdvice::Cold => "Cold — wear a coat, hat and gloves.",
            OutfitAdvice::Freezing => {
                "Freezing — wear a heavy winter coat, thermal layers and warm boots."
            }
        }
    }
}

impl fmt::Display for OutfitAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
