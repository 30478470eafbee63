use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{
        report::{self, ReportKind},
        store::Store,
    },
};

pub fn routes() -> Vec<Route> {
    routes![generate_report]
}

#[derive(Debug, Deserialize)]
struct ReportRequest {
    index: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReportReply {
    report: String,
}

/// Generate a templated report for one stored response.
/// `type` is `completo` or `propuesta`; `index` is the position in the
/// response list as shown by the dashboard.
#[post("/api/generate-report", data = "<request>", format = "json")]
fn generate_report(request: Json<ReportRequest>, store: &State<Store>) -> Result<Json<ReportReply>> {
    let request = request.into_inner();

    let raw_kind = request
        .kind
        .ok_or_else(|| Error::BadRequest("Falta el campo type".to_string()))?;
    let kind = raw_kind
        .parse::<ReportKind>()
        .map_err(|_| Error::BadRequest(format!("Tipo de informe desconocido: {raw_kind}")))?;

    let index = request
        .index
        .ok_or_else(|| Error::BadRequest("Falta el campo index".to_string()))?;
    let response = usize::try_from(index)
        .ok()
        .and_then(|index| store.get(index))
        .ok_or_else(|| Error::NotFound(format!("No existe ninguna respuesta con índice {index}")))?;

    Ok(Json(ReportReply {
        report: report::generate(&response, kind),
    }))
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

    async fn request_report(client: &Client, body: Value) -> (Status, Value) {
        let response = client
            .post(uri!(super::generate_report))
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status();
        let body = response.into_string().await.unwrap();
        (status, serde_json::from_str(&body).unwrap())
    }

    async fn submit_example(client: &Client) {
        let response = client
            .post("/api/submit-survey")
            .header(ContentType::JSON)
            .body(serde_json::to_string(&Answers::example()).unwrap())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
    }

    #[rocket::async_test]
    async fn both_report_kinds_render_for_a_stored_response() {
        let client = client().await;
        submit_example(&client).await;

        let (status, reply) =
            request_report(&client, json!({ "index": 0, "type": "completo" })).await;
        assert_eq!(Status::Ok, status);
        let report = reply["report"].as_str().unwrap();
        assert!(report.contains("ANÁLISIS COMPLETO"));
        assert!(report.contains("María García López"));

        let (status, reply) =
            request_report(&client, json!({ "index": 0, "type": "propuesta" })).await;
        assert_eq!(Status::Ok, status);
        let report = reply["report"].as_str().unwrap();
        assert!(report.contains("PROPUESTA COMERCIAL"));
        assert!(report.contains("69€/mes"));
    }

    #[rocket::async_test]
    async fn an_out_of_range_index_is_a_not_found_error() {
        let client = client().await;
        submit_example(&client).await;

        for index in [1, -1, 999] {
            let (status, reply) =
                request_report(&client, json!({ "index": index, "type": "completo" })).await;
            assert_eq!(Status::NotFound, status, "index {index}");
            assert!(reply["error"].as_str().unwrap().contains("índice"));
        }
    }

    #[rocket::async_test]
    async fn an_unknown_report_type_is_rejected() {
        let client = client().await;
        submit_example(&client).await;

        let (status, reply) =
            request_report(&client, json!({ "index": 0, "type": "pdf" })).await;
        assert_eq!(Status::BadRequest, status);
        assert_eq!(
            json!("Tipo de informe desconocido: pdf"),
            reply["error"]
        );

        let (status, _) = request_report(&client, json!({ "index": 0 })).await;
        assert_eq!(Status::BadRequest, status);
    }
}
