use rocket::Route;

mod dashboard;
mod pages;
mod report;
mod survey;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(pages::routes());
    routes.extend(survey::routes());
    routes.extend(dashboard::routes());
    routes.extend(report::routes());
    routes
}
