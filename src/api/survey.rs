use rocket::{serde::json::Json, Route, State};
use serde::Serialize;

use crate::{
    config::Config,
    error::{Error, Result},
    model::{answers::Answers, notify::Notifier, priority::Priority, store::Store},
};

/// Fields the form cannot submit without. `p15` (address) and the raffle
/// opt-in are optional; `p6`/`p7` arrive joined from the checkbox groups.
const REQUIRED_FIELDS: [&str; 15] = [
    "p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9", "p10", "p11", "p12", "p13", "p14",
    "p16",
];

pub fn routes() -> Vec<Route> {
    routes![submit_survey]
}

#[derive(Debug, Serialize)]
struct SubmitReply {
    success: bool,
    #[serde(rename = "raffleNumber")]
    raffle_number: Option<u32>,
    priority: Priority,
    message: &'static str,
}

/// Record one completed survey.
///
/// Derives the priority tier and raffle eligibility, assigns the next raffle
/// number when eligible, stores the response, and fires the best-effort
/// notifications. Deliberately not idempotent: submitting twice records two
/// leads and burns two raffle numbers, exactly like the forms it replaces.
#[post("/api/submit-survey", data = "<answers>", format = "json")]
async fn submit_survey(
    answers: Json<Answers>,
    config: &State<Config>,
    store: &State<Store>,
    notifier: &State<Notifier>,
) -> Result<Json<SubmitReply>> {
    let answers = answers.into_inner();
    if let Some(field) = answers.first_missing(&REQUIRED_FIELDS) {
        return Err(Error::BadRequest(format!(
            "Falta el campo obligatorio: {field}"
        )));
    }

    let priority = Priority::classify(&answers);
    let eligible = config
        .eligibility()
        .is_eligible(&answers, config.city_patterns());
    let response = store.append(answers, priority, eligible);

    info!(
        "Nueva encuesta recibida: {} - {}",
        response.answers.name().unwrap_or("?"),
        response.priority
    );
    notifier.notify_submission(&response);

    Ok(Json(SubmitReply {
        success: true,
        raffle_number: response.raffle_number,
        priority: response.priority,
        message: "Encuesta recibida correctamente",
    }))
}
