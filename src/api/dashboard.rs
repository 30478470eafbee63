use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{priority::Priority, raffle, response::SurveyResponse, store::Store},
};

pub fn routes() -> Vec<Route> {
    routes![responses, draw_winner, delete_response]
}

#[derive(Debug, Serialize)]
struct ResponsesReply {
    total: usize,
    hot: usize,
    warm: usize,
    cold: usize,
    #[serde(rename = "raffleParticipants")]
    raffle_participants: usize,
    responses: Vec<SurveyResponse>,
}

/// Aggregate counts plus the full raw response list. The dashboard is a
/// single-operator tool; there is no pagination and no redaction.
#[get("/api/responses")]
fn responses(store: &State<Store>) -> Json<ResponsesReply> {
    let responses = store.list();
    let count = |priority| {
        responses
            .iter()
            .filter(|response| response.priority == priority)
            .count()
    };
    Json(ResponsesReply {
        total: responses.len(),
        hot: count(Priority::Hot),
        warm: count(Priority::Warm),
        cold: count(Priority::Cold),
        raffle_participants: responses
            .iter()
            .filter(|response| response.participates_in_raffle)
            .count(),
        responses,
    })
}

#[derive(Debug, Serialize)]
struct Winner {
    name: Option<String>,
    business: Option<String>,
    #[serde(rename = "raffleNumber")]
    raffle_number: Option<u32>,
    email: Option<String>,
    whatsapp: Option<String>,
}

#[derive(Debug, Serialize)]
struct DrawReply {
    winner: Winner,
    #[serde(rename = "totalParticipants")]
    total_participants: usize,
}

/// Draw a raffle winner among the eligible responses. Each call draws
/// independently; a drawn winner stays in the pool.
#[post("/api/draw-winner")]
fn draw_winner(store: &State<Store>) -> Result<Json<DrawReply>> {
    let responses = store.list();
    let total_participants = responses
        .iter()
        .filter(|response| response.participates_in_raffle)
        .count();
    let winner = raffle::draw_winner(&responses)
        .ok_or_else(|| Error::BadRequest("No hay participantes en el sorteo".to_string()))?;

    Ok(Json(DrawReply {
        winner: Winner {
            name: winner.answers.name().map(str::to_string),
            business: winner.answers.business().map(str::to_string),
            raffle_number: winner.raffle_number,
            email: winner.answers.email().map(str::to_string),
            whatsapp: winner.answers.whatsapp().map(str::to_string),
        },
        total_participants,
    }))
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteReply {
    success: bool,
}

/// Delete one response by its timestamp.
#[post("/api/delete-response", data = "<request>", format = "json")]
fn delete_response(request: Json<DeleteRequest>, store: &State<Store>) -> Result<Json<DeleteReply>> {
    let timestamp = request
        .into_inner()
        .timestamp
        .filter(|timestamp| !timestamp.is_empty())
        .ok_or_else(|| Error::BadRequest("Falta el campo timestamp".to_string()))?;

    if !store.delete(&timestamp) {
        return Err(Error::NotFound(
            "No se encontró ninguna respuesta con ese timestamp".to_string(),
        ));
    }
    Ok(Json(DeleteReply { success: true }))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json::{self, json, Value},
    };

    use crate::model::answers::Answers;
    use crate::testing::client;

    async fn submit(client: &Client, answers: &Answers) {
        let response = client
            .post("/api/submit-survey")
            .header(ContentType::JSON)
            .body(serde_json::to_string(answers).unwrap())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
    }

    async fn body_json(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    #[rocket::async_test]
    async fn responses_aggregates_counts_per_tier() {
        let client = client().await;

        // One hot Coruña lead, one hot Madrid lead, one warm, one cold.
        submit(&client, &Answers::example()).await;
        submit(&client, &Answers::example_madrid()).await;
        submit(&client, &Answers::example().with("p5", "Sí, en 1-2 meses")).await;
        submit(
            &client,
            &Answers::example()
                .with("p5", "No me interesa")
                .with("p16", "No tengo prisa"),
        )
        .await;

        let response = client.get(uri!(super::responses)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let reply = body_json(response).await;

        assert_eq!(json!(4), reply["total"]);
        assert_eq!(json!(2), reply["hot"]);
        assert_eq!(json!(1), reply["warm"]);
        assert_eq!(json!(1), reply["cold"]);
        assert_eq!(json!(3), reply["raffleParticipants"]);
        assert_eq!(4, reply["responses"].as_array().unwrap().len());
    }

    #[rocket::async_test]
    async fn drawing_with_no_participants_is_a_client_error() {
        let client = client().await;

        let response = client.post(uri!(super::draw_winner)).dispatch().await;
        assert_eq!(Status::BadRequest, response.status());
        let reply = body_json(response).await;
        assert_eq!(json!("No hay participantes en el sorteo"), reply["error"]);
    }

    #[rocket::async_test]
    async fn drawing_with_one_participant_returns_that_entry() {
        let client = client().await;

        submit(&client, &Answers::example_madrid()).await; // not eligible
        submit(&client, &Answers::example()).await; // eligible, number 20

        let response = client.post(uri!(super::draw_winner)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let reply = body_json(response).await;

        assert_eq!(json!("María García López"), reply["winner"]["name"]);
        assert_eq!(json!("Salón María Estilo"), reply["winner"]["business"]);
        assert_eq!(json!(20), reply["winner"]["raffleNumber"]);
        assert_eq!(json!("maria@salonestilo.es"), reply["winner"]["email"]);
        assert_eq!(json!("+34 600 123 456"), reply["winner"]["whatsapp"]);
        assert_eq!(json!(1), reply["totalParticipants"]);
    }

    #[rocket::async_test]
    async fn delete_removes_exactly_the_named_response() {
        let client = client().await;

        submit(&client, &Answers::example()).await;
        submit(&client, &Answers::example_madrid()).await;

        let listing = body_json(client.get(uri!(super::responses)).dispatch().await).await;
        let timestamp = listing["responses"][0]["timestamp"].as_str().unwrap().to_string();

        let response = client
            .post(uri!(super::delete_response))
            .header(ContentType::JSON)
            .body(json!({ "timestamp": timestamp }).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        assert_eq!(json!(true), body_json(response).await["success"]);

        let listing = body_json(client.get(uri!(super::responses)).dispatch().await).await;
        assert_eq!(json!(1), listing["total"]);

        // Deleting it again is a 404.
        let response = client
            .post(uri!(super::delete_response))
            .header(ContentType::JSON)
            .body(json!({ "timestamp": timestamp }).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[rocket::async_test]
    async fn delete_without_a_timestamp_is_rejected() {
        let client = client().await;

        let response = client
            .post(uri!(super::delete_response))
            .header(ContentType::JSON)
            .body("{}")
            .dispatch()
            .await;

        assert_eq!(Status::BadRequest, response.status());
        let reply = body_json(response).await;
        assert_eq!(json!("Falta el campo timestamp"), reply["error"]);
    }
}
