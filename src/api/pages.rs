use rocket::{fs::NamedFile, response::Redirect, Route, State};

use crate::{config::Config, error::Result};

pub fn routes() -> Vec<Route> {
    routes![survey_page, dashboard_page, pdf_redirect]
}

/// The public survey page. Self-contained HTML, no templating engine.
#[get("/")]
async fn survey_page(config: &State<Config>) -> Result<NamedFile> {
    Ok(NamedFile::open(config.pages_dir().join("index.html")).await?)
}

/// The operator dashboard.
#[get("/dashboard")]
async fn dashboard_page(config: &State<Config>) -> Result<NamedFile> {
    Ok(NamedFile::open(config.pages_dir().join("dashboard.html")).await?)
}

/// Re-enter the survey page with a timestamp so its client-side script
/// regenerates the PDF for that response.
#[get("/generar-pdf?<timestamp>")]
fn pdf_redirect(timestamp: String) -> Redirect {
    Redirect::to(format!("/?pdf={timestamp}"))
}

#[cfg(test)]
mod tests {
    use rocket::http::Status;

    use crate::testing::client;

    #[rocket::async_test]
    async fn pages_are_served_from_the_pages_dir() {
        let client = client().await;

        let response = client.get("/").dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("<form id=\"surveyForm\""));

        let response = client.get("/dashboard").dispatch().await;
        assert_eq!(Status::Ok, response.status());
    }

    #[rocket::async_test]
    async fn pdf_redirect_carries_the_timestamp_back_to_the_form() {
        let client = client().await;

        let response = client
            .get("/generar-pdf?timestamp=2025-11-03T09:30:00.000Z")
            .dispatch()
            .await;

        assert_eq!(Status::SeeOther, response.status());
        let location = response.headers().get_one("Location").unwrap();
        assert_eq!("/?pdf=2025-11-03T09:30:00.000Z", location);
    }
}
