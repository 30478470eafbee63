use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::model::{answers::Answers, response::SurveyResponse};

/// How a campaign decides whether a submission enters the raffle.
///
/// Historical campaign pages disagreed on this rule, so it is data rather
/// than code: each deployment picks one variant in its config.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    /// The submitted city contains one of the campaign's target patterns,
    /// case-insensitively.
    City,
    /// The entrant ticked the raffle opt-in checkbox.
    OptIn,
    /// Both of the above.
    Both,
}

impl EligibilityRule {
    /// Whether `answers` qualify for the raffle under this rule.
    /// `city_patterns` are matched lowercase; missing answers never qualify.
    pub fn is_eligible(&self, answers: &Answers, city_patterns: &[String]) -> bool {
        match self {
            EligibilityRule::City => city_matches(answers, city_patterns),
            EligibilityRule::OptIn => opted_in(answers),
            EligibilityRule::Both => {
                city_matches(answers, city_patterns) && opted_in(answers)
            }
        }
    }
}

fn city_matches(answers: &Answers, patterns: &[String]) -> bool {
    answers.city().map_or(false, |city| {
        let city = city.to_lowercase();
        patterns
            .iter()
            .any(|pattern| city.contains(&pattern.to_lowercase()))
    })
}

fn opted_in(answers: &Answers) -> bool {
    answers.raffle_opt_in().map_or(false, |value| {
        matches!(value.to_lowercase().as_str(), "si" | "sí")
    })
}

/// Pick a raffle winner uniformly at random among the eligible responses.
///
/// Each call draws independently; nothing marks a winner as already drawn.
/// Returns `None` when no response is eligible.
pub fn draw_winner(responses: &[SurveyResponse]) -> Option<&SurveyResponse> {
    let participants: Vec<&SurveyResponse> = responses
        .iter()
        .filter(|response| response.participates_in_raffle)
        .collect();
    participants.choose(&mut rand::thread_rng()).copied()
}
