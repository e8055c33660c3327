use axum::{Router, routing::get};

pub mod admin;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod payments;
pub mod schedules;
pub mod system;
pub mod users;

/// Router for every API endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .merge(auth::router())
        .nest("/classes", classes::router())
        .nest("/schedules", schedules::router())
        .route("/schedule/mine", get(schedules::my_schedule))
        .nest("/enrollments", enrollments::router())
        .nest("/payments", payments::router())
        .nest("/users", users::router())
        .route("/instructors", get(users::list_instructors))
        .nest("/admin", admin::router())
        .route("/reports/enrollments", get(admin::enrollment_report))
}
