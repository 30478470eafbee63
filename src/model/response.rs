use serde::{Deserialize, Serialize};

use crate::model::{answers::Answers, priority::Priority};

/// A recorded survey submission: the raw answers plus the fields the
/// backend derives at submission time. Created once per submission and never
/// mutated afterwards; the only removal path is deletion by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// The submitted answers, flattened so the wire shape stays the flat
    /// record the dashboard and the PDF script already consume.
    #[serde(flatten)]
    pub answers: Answers,
    pub priority: Priority,
    #[serde(rename = "participatesInRaffle")]
    pub participates_in_raffle: bool,
    #[serde(rename = "raffleNumber")]
    pub raffle_number: Option<u32>,
    /// ISO-8601 submission instant, also the record's deletion key.
    pub timestamp: String,
}
