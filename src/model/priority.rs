use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::answers::Answers;

/// Willingness-to-pay brackets that count as high for lead scoring.
const HIGH_WILLINGNESS: [&str; 4] = [
    "40-60€/mes",
    "60-80€/mes",
    "80-100€/mes",
    "Más de 100€/mes",
];

const TRIAL_NOW: &str = "Sí, ahora mismo";
const TRIAL_ONE_TO_TWO_MONTHS: &str = "Sí, en 1-2 meses";
const CONTACT_THIS_WEEK: &str = "Esta semana";
const CONTACT_NEXT_WEEK: &str = "Próxima semana";

/// The lead-scoring tier of a survey response.
///
/// Serialized with the emoji labels the dashboard and the operator emails
/// display, so the wire format matches what reviewers see.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "🔥 HOT")]
    Hot,
    #[serde(rename = "🟡 WARM")]
    Warm,
    #[serde(rename = "🟢 COLD")]
    Cold,
}

impl Priority {
    /// Classify a submission. First matching rule wins:
    /// 1. High willingness to pay, wants the trial now, and wants contact
    ///    this week: `Hot`.
    /// 2. Wants the trial in 1-2 months, or contact next week: `Warm`.
    /// 3. Anything else, including missing answers: `Cold`.
    pub fn classify(answers: &Answers) -> Priority {
        let willingness = answers.willingness_to_pay();
        let trial = answers.trial_preference();
        let contact = answers.contact_preference();

        if willingness.map_or(false, |w| HIGH_WILLINGNESS.contains(&w))
            && trial == Some(TRIAL_NOW)
            && contact == Some(CONTACT_THIS_WEEK)
        {
            Priority::Hot
        } else if trial == Some(TRIAL_ONE_TO_TWO_MONTHS) || contact == Some(CONTACT_NEXT_WEEK) {
            Priority::Warm
        } else {
            Priority::Cold
        }
    }

    /// The wire label, e.g. `🔥 HOT`.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Hot => "🔥 HOT",
            Priority::Warm => "🟡 WARM",
            Priority::Cold => "🟢 COLD",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_answers(willingness: &str) -> Answers {
        Answers::from([
            ("p3", willingness),
            ("p5", TRIAL_NOW),
            ("p16", CONTACT_THIS_WEEK),
        ])
    }

    #[test]
    fn hot_for_every_high_willingness_bracket() {
        for bracket in HIGH_WILLINGNESS {
            assert_eq!(Priority::Hot, Priority::classify(&hot_answers(bracket)));
        }
    }

    #[test]
    fn breaking_any_hot_condition_drops_the_tier() {
        // Low willingness: trial-now no longer makes it hot, and neither
        // fallback condition holds, so it falls all the way to cold.
        assert_ne!(
            Priority::Hot,
            Priority::classify(&hot_answers("20-40€/mes"))
        );

        // Trial deferred: demoted to warm via the trial fallback.
        let deferred = Answers::from([
            ("p3", "60-80€/mes"),
            ("p5", TRIAL_ONE_TO_TWO_MONTHS),
            ("p16", CONTACT_THIS_WEEK),
        ]);
        assert_eq!(Priority::Warm, Priority::classify(&deferred));

        // Contact deferred: demoted to warm via the contact fallback.
        let later = Answers::from([
            ("p3", "60-80€/mes"),
            ("p5", TRIAL_NOW),
            ("p16", CONTACT_NEXT_WEEK),
        ]);
        assert_eq!(Priority::Warm, Priority::classify(&later));
    }

    #[test]
    fn warm_on_either_fallback_condition() {
        let trial_only = Answers::from([("p5", TRIAL_ONE_TO_TWO_MONTHS)]);
        assert_eq!(Priority::Warm, Priority::classify(&trial_only));

        let contact_only = Answers::from([("p16", CONTACT_NEXT_WEEK)]);
        assert_eq!(Priority::Warm, Priority::classify(&contact_only));
    }

    #[test]
    fn everything_else_is_cold() {
        let uninterested = Answers::from([
            ("p3", "No pagaría"),
            ("p5", "No me interesa"),
            ("p16", "No tengo prisa"),
        ]);
        assert_eq!(Priority::Cold, Priority::classify(&uninterested));

        // Missing answers never panic and never match a rule.
        assert_eq!(Priority::Cold, Priority::classify(&Answers::default()));
    }

    #[test]
    fn serializes_with_the_display_labels() {
        let json = serde_json::to_string(&Priority::Hot).unwrap();
        assert_eq!("\"🔥 HOT\"", json);
        assert_eq!("🔥 HOT", Priority::Hot.to_string());

        let parsed: Priority = serde_json::from_str("\"🟡 WARM\"").unwrap();
        assert_eq!(Priority::Warm, parsed);
    }
}
