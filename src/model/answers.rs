use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The raw answer set submitted by the survey form.
///
/// The form posts one flat JSON object whose keys are the question names
/// (`p1`..`p16`, multi-choice answers already joined client-side as
/// comma-separated strings) plus the raffle opt-in. Campaigns add and rename
/// questions freely, so this is deliberately schemaless: every lookup is
/// optional and non-string values read as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(Map<String, Value>);

/// Keys the backend derives itself. The legacy front-end sends its own
/// `timestamp`, and a crafted payload could send any of these; the stored
/// record flattens the answers next to the derived fields, so client-sent
/// copies must be discarded or the record serializes with duplicate keys
/// and can no longer be read back.
const RESERVED_FIELDS: [&str; 4] = [
    "priority",
    "participatesInRaffle",
    "raffleNumber",
    "timestamp",
];

impl Answers {
    /// Drop any client-sent copies of the derived fields. The server's own
    /// values always win, like the original spread-then-override record
    /// construction.
    pub fn strip_reserved(&mut self) {
        for field in RESERVED_FIELDS {
            self.0.remove(field);
        }
    }

    /// Look up an answer by question name. Absent keys and non-string
    /// values both read as `None`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The first field from `required` that is missing or blank, if any.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required
            .iter()
            .find(|field| {
                self.get(field)
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .copied()
    }

    // Named accessors for the fields the backend itself reads.

    /// Willingness to pay per month (p3).
    pub fn willingness_to_pay(&self) -> Option<&str> {
        self.get("p3")
    }

    /// Free-trial preference (p5).
    pub fn trial_preference(&self) -> Option<&str> {
        self.get("p5")
    }

    /// Contact name (p10).
    pub fn name(&self) -> Option<&str> {
        self.get("p10")
    }

    /// Salon name (p11).
    pub fn business(&self) -> Option<&str> {
        self.get("p11")
    }

    /// WhatsApp number (p12).
    pub fn whatsapp(&self) -> Option<&str> {
        self.get("p12")
    }

    /// Email address (p13).
    pub fn email(&self) -> Option<&str> {
        self.get("p13")
    }

    /// City (p14), used by the raffle eligibility check.
    pub fn city(&self) -> Option<&str> {
        self.get("p14")
    }

    /// Preferred contact window (p16).
    pub fn contact_preference(&self) -> Option<&str> {
        self.get("p16")
    }

    /// Raffle opt-in checkbox (`wantRaffle`).
    pub fn raffle_opt_in(&self) -> Option<&str> {
        self.get("wantRaffle")
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Answers {
    fn from(fields: [(&str, &str); N]) -> Self {
        Answers(
            fields
                .iter()
                .map(|(key, value)| (key.to_string(), Value::from(*value)))
                .collect(),
        )
    }
}
