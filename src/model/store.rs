use std::{
    fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{answers::Answers, priority::Priority, response::SurveyResponse};

/// The persisted shape: every response ever recorded plus the next raffle
/// number to hand out. Matches the layout of the legacy `responses.json`
/// files so existing campaign data loads unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    responses: Vec<SurveyResponse>,
    #[serde(rename = "nextRaffleNumber")]
    next_raffle_number: u32,
}

/// The process-wide response store.
///
/// Owns the in-memory response list and the raffle counter behind one lock,
/// so number assignment and append are atomic by contract rather than by
/// accident of single-threaded scheduling. When a backing file is configured
/// the whole store is rewritten after every mutation via a temp file and
/// rename; a crash mid-write therefore leaves either the old file or the new
/// one, never a torn mix. Save failures are logged and swallowed: memory
/// stays the source of truth for the rest of the process lifetime.
#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    data: Mutex<StoreData>,
}

impl Store {
    /// Open the store, loading `path` if it names an existing file.
    /// A fresh store starts its raffle numbering at `raffle_start`.
    pub fn open(path: Option<PathBuf>, raffle_start: u32) -> Result<Store> {
        let data = match &path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)?;
                let data: StoreData = serde_json::from_str(&contents)?;
                info!(
                    "Loaded {} responses from {} (next raffle number {})",
                    data.responses.len(),
                    path.display(),
                    data.next_raffle_number
                );
                data
            }
            _ => StoreData {
                responses: Vec::new(),
                next_raffle_number: raffle_start,
            },
        };
        Ok(Store {
            path,
            data: Mutex::new(data),
        })
    }

    /// An in-memory store for tests and store-less deployments.
    pub fn in_memory(raffle_start: u32) -> Store {
        Store {
            path: None,
            data: Mutex::new(StoreData {
                responses: Vec::new(),
                next_raffle_number: raffle_start,
            }),
        }
    }

    /// Record a submission: assign a raffle number iff `eligible`, stamp the
    /// submission time, append, and persist. Returns the finished record.
    /// Client-sent copies of the derived fields are discarded first, so the
    /// flattened record never carries duplicate keys.
    pub fn append(
        &self,
        mut answers: Answers,
        priority: Priority,
        eligible: bool,
    ) -> SurveyResponse {
        answers.strip_reserved();
        let mut data = self.locked();
        let raffle_number = eligible.then(|| {
            let number = data.next_raffle_number;
            data.next_raffle_number += 1;
            number
        });
        let response = SurveyResponse {
            answers,
            priority,
            participates_in_raffle: eligible,
            raffle_number,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        data.responses.push(response.clone());
        self.save(&data);
        response
    }

    /// A snapshot of every recorded response, in submission order.
    pub fn list(&self) -> Vec<SurveyResponse> {
        self.locked().responses.clone()
    }

    /// The response at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<SurveyResponse> {
        self.locked().responses.get(index).cloned()
    }

    /// Delete the first response with the given timestamp and persist.
    /// Returns whether anything was removed.
    pub fn delete(&self, timestamp: &str) -> bool {
        let mut data = self.locked();
        let Some(position) = data
            .responses
            .iter()
            .position(|response| response.timestamp == timestamp)
        else {
            return false;
        };
        data.responses.remove(position);
        self.save(&data);
        true
    }

    /// The raffle number the next eligible submission will receive.
    pub fn next_raffle_number(&self) -> u32 {
        self.locked().next_raffle_number
    }

    fn locked(&self) -> MutexGuard<'_, StoreData> {
        // A poisoned lock means a panic mid-mutation; nothing to recover.
        self.data.lock().expect("store lock poisoned")
    }

    /// Rewrite the backing file, if any. Write-temp-then-rename; failures
    /// are logged, never raised.
    fn save(&self, data: &StoreData) {
        let Some(path) = &self.path else { return };
        let result = serde_json::to_string_pretty(data)
            .map_err(std::io::Error::from)
            .and_then(|json| {
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, json)?;
                fs::rename(&tmp, path)
            });
        if let Err(err) = result {
            warn!("Failed to persist store to {}: {err}", path.display());
        }
    }
}
