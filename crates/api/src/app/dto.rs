use serde::Deserialize;

use dojo_domain::{DojoClass, Enrollment, Payment, Schedule, User};
use dojo_infra::Store;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub schedule: Option<String>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<i64>,
    pub schedule: Option<String>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub martial_class_id: i64,
    pub weekday: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateScheduleRequest {
    pub martial_class_id: Option<i64>,
    pub weekday: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
}

/// A `student_id` in the body is tolerated and ignored; the enrollment's
/// student is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub martial_class_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub enrollment_id: i64,
    /// Smallest currency unit.
    pub amount: i64,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListUsersQuery {
    pub role: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Public user body. The password hash never appears here.
pub fn user_to_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "role": user.role,
    })
}

/// Class body with the instructor embedded as a full user record.
pub fn class_to_json(store: &dyn Store, class: &DojoClass) -> serde_json::Value {
    let instructor = store.get_user(class.instructor_id).map(|u| user_to_json(&u));
    serde_json::json!({
        "id": class.id,
        "name": class.name,
        "description": class.description,
        "instructor": instructor,
        "schedule": class.schedule,
        "capacity": class.capacity,
    })
}

pub fn schedule_to_json(store: &dyn Store, schedule: &Schedule) -> serde_json::Value {
    let martial_class = store
        .get_class(schedule.class_id)
        .map(|c| class_to_json(store, &c));
    serde_json::json!({
        "id": schedule.id,
        "martial_class": martial_class,
        "weekday": schedule.weekday,
        "start_time": schedule.start_time,
        "end_time": schedule.end_time,
        "location": schedule.location,
    })
}

pub fn enrollment_to_json(store: &dyn Store, enrollment: &Enrollment) -> serde_json::Value {
    let student = store.get_user(enrollment.student_id).map(|u| user_to_json(&u));
    let martial_class = store
        .get_class(enrollment.class_id)
        .map(|c| class_to_json(store, &c));
    serde_json::json!({
        "id": enrollment.id,
        "student": student,
        "martial_class": martial_class,
        "date_enrolled": enrollment.date_enrolled,
    })
}

pub fn payment_to_json(store: &dyn Store, payment: &Payment) -> serde_json::Value {
    let enrollment = store
        .get_enrollment(payment.enrollment_id)
        .map(|e| enrollment_to_json(store, &e));
    serde_json::json!({
        "id": payment.id,
        "enrollment": enrollment,
        "amount": payment.amount,
        "date": payment.date,
        "status": payment.status,
    })
}
