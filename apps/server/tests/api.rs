use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use babyassist_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    router: Router,
    _dir: TempDir,
}

async fn build_app(analysis_url: &str) -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        analysis_url: analysis_url.to_string(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

async fn app() -> TestApp {
    build_app("http://127.0.0.1:9").await
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_mother(app: &TestApp, body: Value) -> String {
    let (status, mother) = send(app, Method::POST, "/api/v1/mothers", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{mother}");
    mother["id"].as_str().unwrap().to_string()
}

async fn create_child(app: &TestApp, mother_id: &str, name: &str, months: i32) -> String {
    let (status, child) = send(
        app,
        Method::POST,
        "/api/v1/children",
        Some(json!({ "name": name, "ageInMonths": months, "motherId": mother_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{child}");
    child["id"].as_str().unwrap().to_string()
}

fn multipart_upload(notes: Option<&str>) -> (String, Vec<u8>) {
    let boundary = "babyassist-test-boundary";
    let mut body = Vec::new();
    if let Some(notes) = notes {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\n{notes}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn upload(app: &TestApp, uri: &str, notes: Option<&str>) -> (StatusCode, Value) {
    let (content_type, body) = multipart_upload(notes);
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = app().await;
    for uri in ["/api/v1/healthz", "/api/v1/readyz"] {
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}

#[tokio::test]
async fn mother_lifecycle() {
    let app = app().await;
    let id = create_mother(
        &app,
        json!({ "name": "Asha", "age": 26, "riskLevel": "high", "mobile": "555-0101" }),
    )
    .await;

    let (status, mother) = send(&app, Method::GET, &format!("/api/v1/mothers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mother["name"], "Asha");
    assert_eq!(mother["riskLevel"], "high");

    let (status, high) = send(&app, Method::GET, "/api/v1/mothers/risk/high", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(high.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/mothers/{id}"),
        Some(json!({
            "name": "Asha K",
            "age": 27,
            "riskLevel": "low",
            "childrenCount": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["name"], "Asha K");
    assert_eq!(updated["mobile"], Value::Null);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/mothers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/mothers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn invalid_input_maps_to_client_errors() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/mothers",
        Some(json!({ "name": "  ", "age": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(&app, Method::GET, "/api/v1/mothers/risk/extreme", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_mother(&app, json!({ "id": "m-dup", "name": "Bina", "age": 31 })).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/mothers",
        Some(json!({ "id": "m-dup", "name": "Bina again", "age": 31 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/children",
        Some(json!({ "name": "Orphan", "ageInMonths": 3, "motherId": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn children_age_range_and_vaccinations() {
    let app = app().await;
    let mother_id = create_mother(&app, json!({ "name": "Chitra", "age": 29 })).await;
    let baby = create_child(&app, &mother_id, "Baby", 6).await;
    create_child(&app, &mother_id, "Toddler", 24).await;
    create_child(&app, &mother_id, "Infant", 12).await;

    let (status, ranged) = send(
        &app,
        Method::GET,
        "/api/v1/children?minMonths=6&maxMonths=12",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ages: Vec<i64> = ranged
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["ageInMonths"].as_i64().unwrap())
        .collect();
    assert_eq!(ages, vec![6, 12]);

    let (status, _) = send(&app, Method::GET, "/api/v1/children?minMonths=6", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, by_mother) = send(
        &app,
        Method::GET,
        &format!("/api/v1/mothers/{mother_id}/children"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_mother.as_array().unwrap().len(), 3);

    let uri = format!("/api/v1/children/{baby}/vaccinations");
    let (status, record) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["totalVaccines"], 6);
    assert_eq!(record["progressPercentage"], 0);
    assert_eq!(record["bcg"], false);

    let (status, record) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "bcg": true, "opv_0": true, "hepatitis_b": true, "pentavalent_1": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{record}");
    assert_eq!(record["completedVaccines"], 4);
    assert_eq!(record["progressPercentage"], 67);

    let (_, child) = send(&app, Method::GET, &format!("/api/v1/children/{baby}"), None).await;
    assert_eq!(child["vaccinationsCompleted"], 4);
    assert_eq!(child["vaccinationsTotal"], 6);
}

#[tokio::test]
async fn examination_submission_updates_child() {
    let app = app().await;
    let mother_id = create_mother(&app, json!({ "name": "Deepa", "age": 24 })).await;
    let child_id = create_child(&app, &mother_id, "Ravi", 10).await;

    let (status, questions) =
        send(&app, Method::GET, "/api/v1/examinations/questions/child", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(questions.as_array().unwrap().len(), 5);
    assert_eq!(questions[0]["id"], "height");

    let uri = format!("/api/v1/examinations/child/{child_id}");
    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "answers": { "height": "75", "weight": 8 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("feeding"));

    let (status, exam) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "answers": {
            "height": "75",
            "weight": 8,
            "feeding": "Yes",
            "vaccination": "Yes",
            "fever": "No"
        }})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{exam}");
    assert!((exam["bmi"].as_f64().unwrap() - 14.22).abs() < 1e-9);
    assert_eq!(exam["bmiCategory"], "underweight");
    assert_eq!(exam["healthStatus"], "needs_attention");

    let (_, child) = send(&app, Method::GET, &format!("/api/v1/children/{child_id}"), None).await;
    assert_eq!(child["healthStatus"], "needs_attention");

    let (_, listed) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let exam_uri = format!("/api/v1/examinations/item/{}", exam["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &exam_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &exam_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/examinations/questions/father", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn visits_today_and_nearest() {
    let app = app().await;
    let near = create_mother(
        &app,
        json!({ "name": "Near", "age": 25, "latitude": 1.0, "longitude": 1.0 }),
    )
    .await;
    let far = create_mother(
        &app,
        json!({ "name": "Far", "age": 30, "latitude": 5.0, "longitude": 5.0 }),
    )
    .await;
    let today = chrono::Utc::now().date_naive().to_string();

    let (status, empty) = send(&app, Method::GET, "/api/v1/visits/nearest?lat=0&lng=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, Value::Null);

    for mother_id in [&far, &near] {
        let (status, visit) = send(
            &app,
            Method::POST,
            "/api/v1/visits",
            Some(json!({ "motherId": mother_id, "visitDate": today, "visitType": "prenatal" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{visit}");
        assert_eq!(visit["status"], "scheduled");
    }

    let (_, todays) = send(&app, Method::GET, "/api/v1/visits/today", None).await;
    assert_eq!(todays.as_array().unwrap().len(), 2);

    let (status, nearest) =
        send(&app, Method::GET, "/api/v1/visits/nearest?lat=0&lng=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nearest["mother"]["id"], near.as_str());
    assert!((nearest["distance"].as_f64().unwrap() - 2f64.sqrt()).abs() < 1e-9);

    let (status, _) = send(&app, Method::GET, "/api/v1/visits/nearest?lat=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stats) = send(&app, Method::GET, "/api/v1/dashboard/stats", None).await;
    assert_eq!(stats["totalMothers"], 2);
    assert_eq!(stats["totalVisits"], 2);
    assert_eq!(stats["todayVisits"], 2);
}

#[tokio::test]
async fn assessment_calculators() {
    let app = app().await;

    let (status, bmi) = send(
        &app,
        Method::POST,
        "/api/v1/assessment/bmi",
        Some(json!({ "weightKg": 80, "heightCm": 160, "subjectType": "mother" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{bmi}");
    assert!((bmi["bmi"].as_f64().unwrap() - 31.25).abs() < 1e-9);
    assert_eq!(bmi["category"], "obese");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/assessment/bmi",
        Some(json!({ "weightKg": 60, "heightCm": 0, "subjectType": "mother" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, assessment) = send(
        &app,
        Method::POST,
        "/api/v1/assessment/status",
        Some(json!({
            "subjectType": "mother",
            "heightCm": 160,
            "answers": {
                "weight": "80",
                "chronic_conditions": "Yes",
                "complications": "Yes",
                "vitamins": "Sometimes",
                "symptoms": "No"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{assessment}");
    assert_eq!(assessment["riskFactors"], 3);
    assert_eq!(assessment["healthStatus"], "critical");
}

#[tokio::test]
async fn child_screening_upload_stores_results() {
    let analysis = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assess-skin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "condition": "eczema",
            "confidence": 0.8,
            "recommendations": ["Moisturise"],
            "severity": "severe"
        })))
        .mount(&analysis)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze-posture"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posture_condition": "normal",
            "abnormalities": []
        })))
        .mount(&analysis)
        .await;

    let app = build_app(&analysis.uri()).await;
    let mother_id = create_mother(&app, json!({ "name": "Esha", "age": 28 })).await;
    let child_id = create_child(&app, &mother_id, "Mira", 8).await;

    let (status, outcome) = upload(
        &app,
        &format!("/api/v1/screenings/child/{child_id}"),
        Some("Rash on arm"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{outcome}");
    let screenings = outcome["screenings"].as_array().unwrap();
    assert_eq!(screenings.len(), 3);
    assert_eq!(screenings[0]["analysisType"], "skin");
    assert_eq!(screenings[0]["riskLevel"], "high");
    assert_eq!(screenings[0]["notes"], "Rash on arm");
    assert_eq!(screenings[2]["analysisType"], "combined");

    let (_, child) = send(&app, Method::GET, &format!("/api/v1/children/{child_id}"), None).await;
    assert_eq!(child["skinCondition"], "eczema");
    assert_eq!(child["postureCondition"], "normal");
    assert!(child["lastScreening"].is_string());

    let (_, stats) = send(&app, Method::GET, "/api/v1/screenings/stats", None).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["recent"], 3);

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/api/v1/screenings/child/{child_id}"),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn screening_upload_errors() {
    let analysis = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
        .mount(&analysis)
        .await;

    let app = build_app(&analysis.uri()).await;
    let mother_id = create_mother(&app, json!({ "name": "Farah", "age": 33 })).await;

    let (status, body) = upload(&app, &format!("/api/v1/screenings/mother/{mother_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("model offline"));

    let (_, stats) = send(&app, Method::GET, "/api/v1/screenings/stats", None).await;
    assert_eq!(stats["total"], 0);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/screenings/mother/{mother_id}"))
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=empty-boundary",
        )
        .body(Body::from("--empty-boundary--\r\n"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
