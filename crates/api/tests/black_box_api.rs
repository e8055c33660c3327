use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use dojo_api::config::ApiConfig;

const JWT_SECRET: &str = "test-secret";
const PASSWORD: &str = "osu-123456";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port. Low bcrypt cost
        // keeps registration-heavy tests fast.
        let config = ApiConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            token_ttl_hours: 1,
            bcrypt_cost: 4,
        };
        let app = dojo_api::app::build_app(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    role: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "email": format!("{username}@dojo.example"),
            "role": role,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "registering {username}");
    res.json().await.unwrap()
}

async fn login(client: &reqwest::Client, base_url: &str, username: &str) -> String {
    let res = client
        .post(format!("{base_url}/token"))
        .json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "logging in {username}");
    let body: serde_json::Value = res.json().await.unwrap();
    body["access"].as_str().unwrap().to_string()
}

async fn create_class(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    name: &str,
    instructor_id: i64,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/classes"))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "description": "conditioning and kata",
            "instructor_id": instructor_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "creating class {name}");
    res.json().await.unwrap()
}

async fn create_schedule(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    class_id: i64,
    weekday: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/schedules"))
        .bearer_auth(token)
        .json(&json!({
            "martial_class_id": class_id,
            "weekday": weekday,
            "start_time": "18:00",
            "end_time": "19:30",
            "location": "Main Hall",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "creating schedule slot");
    res.json().await.unwrap()
}

async fn enroll(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    class_id: i64,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/enrollments"))
        .bearer_auth(token)
        .json(&json!({ "martial_class_id": class_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "enrolling in class {class_id}");
    res.json().await.unwrap()
}

#[derive(serde::Serialize)]
struct ForgedClaims {
    user_id: i64,
    username: String,
    role: String,
    iat: i64,
    exp: i64,
}

fn mint_token(secret: &str, user_id: i64, username: &str, role: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = ForgedClaims {
        user_id,
        username: username.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + 3600,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn registration_rejects_bad_input() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "aiko", "student").await;

    // Same username again is a conflict.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "username": "aiko", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    // Unknown role.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "username": "botan", "password": PASSWORD, "role": "ninja" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Blank password.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "username": "botan", "password": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_never_appears_in_user_bodies() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = register(&client, &srv.base_url, "aiko", "student").await;
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());
    assert_eq!(created["username"], "aiko");

    let token = login(&client, &srv.base_url, "aiko").await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .get(format!("{}/users/{id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert!(fetched.get("password").is_none());
    assert!(fetched.get("password_hash").is_none());

    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listing: serde_json::Value = res.json().await.unwrap();
    for item in listing["items"].as_array().unwrap() {
        assert!(item.get("password").is_none());
        assert!(item.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn login_issues_tokens_only_for_valid_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "aiko", "student").await;

    // Wrong password.
    let res = client
        .post(format!("{}/token", srv.base_url))
        .json(&json!({ "username": "aiko", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Unknown user, same refusal.
    let res = client
        .post(format!("{}/token", srv.base_url))
        .json(&json!({ "username": "ghost", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // A real token opens protected routes.
    let token = login(&client, &srv.base_url, "aiko").await;
    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn students_cannot_create_classes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    register(&client, &srv.base_url, "aiko", "student").await;
    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let aiko_token = login(&client, &srv.base_url, "aiko").await;
    let sensei_id = sensei["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/classes", srv.base_url))
        .bearer_auth(&aiko_token)
        .json(&json!({ "name": "Karate Basics", "instructor_id": sensei_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");

    // Staff may.
    create_class(&client, &srv.base_url, &sensei_token, "Karate Basics", sensei_id).await;
}

#[tokio::test]
async fn classes_are_browsable_anonymously() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    let token = login(&client, &srv.base_url, "sensei").await;
    let class = create_class(
        &client,
        &srv.base_url,
        &token,
        "Karate Basics",
        sensei["id"].as_i64().unwrap(),
    )
    .await;

    // No token at all.
    let res = client
        .get(format!("{}/classes", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listing: serde_json::Value = res.json().await.unwrap();
    let items = listing["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["instructor"]["username"], "sensei");
    assert!(items[0]["instructor"].get("password").is_none());
    assert!(items[0]["instructor"].get("password_hash").is_none());

    let class_id = class["id"].as_i64().unwrap();
    let res = client
        .get(format!("{}/classes/{class_id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let detail: serde_json::Value = res.json().await.unwrap();
    assert_eq!(detail["name"], "Karate Basics");

    let res = client
        .get(format!("{}/instructors", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let directory: serde_json::Value = res.json().await.unwrap();
    assert_eq!(directory["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn enrollment_student_is_always_the_caller() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    let aiko = register(&client, &srv.base_url, "aiko", "student").await;
    let botan = register(&client, &srv.base_url, "botan", "student").await;
    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let aiko_token = login(&client, &srv.base_url, "aiko").await;

    let class = create_class(
        &client,
        &srv.base_url,
        &sensei_token,
        "Karate Basics",
        sensei["id"].as_i64().unwrap(),
    )
    .await;

    // Aiko names Botan in the body; the record is Aiko's anyway.
    let res = client
        .post(format!("{}/enrollments", srv.base_url))
        .bearer_auth(&aiko_token)
        .json(&json!({
            "martial_class_id": class["id"].as_i64().unwrap(),
            "student_id": botan["id"].as_i64().unwrap(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let enrollment: serde_json::Value = res.json().await.unwrap();
    assert_eq!(enrollment["student"]["id"], aiko["id"]);
    assert_eq!(enrollment["student"]["username"], "aiko");
    assert_eq!(enrollment["martial_class"]["id"], class["id"]);
}

#[tokio::test]
async fn protected_endpoints_require_authentication() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in [
        "/enrollments",
        "/payments",
        "/users",
        "/schedule/mine",
        "/admin/stats",
        "/reports/enrollments",
        "/schedules/1",
    ] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "GET {path}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "unauthenticated", "GET {path}");
    }

    // The schedule listing, unlike its detail view, is public.
    let res = client
        .get(format!("{}/schedules", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn presented_tokens_must_be_valid_even_on_public_routes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "aiko", "student").await;

    // Garbage bearer on a public route still fails.
    let res = client
        .get(format!("{}/classes", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme.
    let res = client
        .get(format!("{}/classes", srv.base_url))
        .header("Authorization", "Token abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Signed with the wrong secret.
    let forged = mint_token("other-secret", 1, "aiko", "student");
    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Right secret, but the user does not exist.
    let orphaned = mint_token(JWT_SECRET, 9999, "ghost", "admin");
    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&orphaned)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn schedule_times_must_be_ordered() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    let token = login(&client, &srv.base_url, "sensei").await;
    let class = create_class(
        &client,
        &srv.base_url,
        &token,
        "Karate Basics",
        sensei["id"].as_i64().unwrap(),
    )
    .await;
    let class_id = class["id"].as_i64().unwrap();

    for (start, end) in [("19:00", "18:00"), ("18:00", "18:00")] {
        let res = client
            .post(format!("{}/schedules", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "martial_class_id": class_id,
                "weekday": "monday",
                "start_time": start,
                "end_time": end,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{start}..{end}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error");
    }

    // Ordered times pass.
    create_schedule(&client, &srv.base_url, &token, class_id, "monday").await;
}

#[tokio::test]
async fn my_schedule_lists_slots_for_enrolled_classes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    register(&client, &srv.base_url, "aiko", "student").await;
    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let aiko_token = login(&client, &srv.base_url, "aiko").await;
    let sensei_id = sensei["id"].as_i64().unwrap();

    let judo = create_class(&client, &srv.base_url, &sensei_token, "Judo", sensei_id).await;
    let karate = create_class(&client, &srv.base_url, &sensei_token, "Karate", sensei_id).await;
    let judo_id = judo["id"].as_i64().unwrap();
    let karate_id = karate["id"].as_i64().unwrap();

    create_schedule(&client, &srv.base_url, &sensei_token, judo_id, "monday").await;
    create_schedule(&client, &srv.base_url, &sensei_token, judo_id, "wednesday").await;
    create_schedule(&client, &srv.base_url, &sensei_token, karate_id, "friday").await;

    enroll(&client, &srv.base_url, &aiko_token, judo_id).await;
    enroll(&client, &srv.base_url, &aiko_token, karate_id).await;

    let res = client
        .get(format!("{}/schedule/mine", srv.base_url))
        .bearer_auth(&aiko_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(
        items
            .iter()
            .all(|slot| slot["martial_class"]["instructor"]["username"] == "sensei")
    );
}

#[tokio::test]
async fn admin_stats_requires_the_admin_role() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "aiko", "student").await;
    let token = login(&client, &srv.base_url, "aiko").await;

    let res = client
        .get(format!("{}/admin/stats", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    // An explanation instead of the stats payload.
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body.get("totalStudents").is_none());
}

#[tokio::test]
async fn admin_stats_counts_the_seeded_dojo() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for name in ["aiko", "botan", "chiyo"] {
        register(&client, &srv.base_url, name, "student").await;
    }
    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    register(&client, &srv.base_url, "renshi", "instructor").await;
    register(&client, &srv.base_url, "kancho", "admin").await;

    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let aiko_token = login(&client, &srv.base_url, "aiko").await;
    let admin_token = login(&client, &srv.base_url, "kancho").await;

    let class = create_class(
        &client,
        &srv.base_url,
        &sensei_token,
        "Karate Basics",
        sensei["id"].as_i64().unwrap(),
    )
    .await;
    enroll(&client, &srv.base_url, &aiko_token, class["id"].as_i64().unwrap()).await;

    let res = client
        .get(format!("{}/admin/stats", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stats["totalStudents"], 3);
    assert_eq!(stats["activeInstructors"], 2);
    assert_eq!(stats["totalClasses"], 1);
    assert_eq!(stats["totalEnrollments"], 1);
}

#[tokio::test]
async fn enrollment_report_orders_classes_by_count() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    register(&client, &srv.base_url, "kancho", "admin").await;
    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let admin_token = login(&client, &srv.base_url, "kancho").await;
    let sensei_id = sensei["id"].as_i64().unwrap();

    let aikido = create_class(&client, &srv.base_url, &sensei_token, "Aikido", sensei_id).await;
    let judo = create_class(&client, &srv.base_url, &sensei_token, "Judo", sensei_id).await;
    let aikido_id = aikido["id"].as_i64().unwrap();
    let judo_id = judo["id"].as_i64().unwrap();

    for name in ["aiko", "botan", "chiyo"] {
        register(&client, &srv.base_url, name, "student").await;
        let token = login(&client, &srv.base_url, name).await;
        enroll(&client, &srv.base_url, &token, aikido_id).await;
    }
    let aiko_token = login(&client, &srv.base_url, "aiko").await;
    enroll(&client, &srv.base_url, &aiko_token, judo_id).await;

    // Students may not read the report.
    let res = client
        .get(format!("{}/reports/enrollments", srv.base_url))
        .bearer_auth(&aiko_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/reports/enrollments", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value = res.json().await.unwrap();
    assert_eq!(report["total_enrollments"], 4);
    let summary = report["class_summary"].as_array().unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0]["name"], "Aikido");
    assert_eq!(summary[0]["count"], 3);
    assert_eq!(summary[1]["name"], "Judo");
    assert_eq!(summary[1]["count"], 1);
}

#[tokio::test]
async fn deleting_a_class_cascades_over_http() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let sensei = register(&client, &srv.base_url, "sensei", "instructor").await;
    let aiko = register(&client, &srv.base_url, "aiko", "student").await;
    let sensei_token = login(&client, &srv.base_url, "sensei").await;
    let aiko_token = login(&client, &srv.base_url, "aiko").await;

    let class = create_class(
        &client,
        &srv.base_url,
        &sensei_token,
        "Karate Basics",
        sensei["id"].as_i64().unwrap(),
    )
    .await;
    let class_id = class["id"].as_i64().unwrap();
    let slot = create_schedule(&client, &srv.base_url, &sensei_token, class_id, "monday").await;
    let enrollment = enroll(&client, &srv.base_url, &aiko_token, class_id).await;

    let res = client
        .post(format!("{}/payments", srv.base_url))
        .bearer_auth(&aiko_token)
        .json(&json!({
            "enrollment_id": enrollment["id"].as_i64().unwrap(),
            "amount": 5000,
            "status": "paid",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let payment: serde_json::Value = res.json().await.unwrap();

    let res = client
        .delete(format!("{}/classes/{class_id}", srv.base_url))
        .bearer_auth(&sensei_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    for path in [
        format!("/schedules/{}", slot["id"].as_i64().unwrap()),
        format!("/enrollments/{}", enrollment["id"].as_i64().unwrap()),
        format!("/payments/{}", payment["id"].as_i64().unwrap()),
    ] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .bearer_auth(&sensei_token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET {path}");
    }

    // The people survive the cascade.
    let res = client
        .get(format!("{}/users/{}", srv.base_url, aiko["id"].as_i64().unwrap()))
        .bearer_auth(&sensei_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn users_support_partial_updates_and_role_filtering() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "sensei", "instructor").await;
    let aiko = register(&client, &srv.base_url, "aiko", "student").await;
    let token = login(&client, &srv.base_url, "sensei").await;
    let aiko_id = aiko["id"].as_i64().unwrap();

    let res = client
        .get(format!("{}/users?role=student", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listing: serde_json::Value = res.json().await.unwrap();
    let items = listing["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["username"], "aiko");

    let res = client
        .get(format!("{}/users?role=ninja", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // PATCH updates only what it names.
    let res = client
        .patch(format!("{}/users/{aiko_id}", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "first_name": "Aiko" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["first_name"], "Aiko");
    assert_eq!(updated["username"], "aiko");

    // PUT has the same partial semantics.
    let res = client
        .put(format!("{}/users/{aiko_id}", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "last_name": "Tanaka" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["last_name"], "Tanaka");
    assert_eq!(updated["first_name"], "Aiko");

    let res = client
        .delete(format!("{}/users/{aiko_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/users/{aiko_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
