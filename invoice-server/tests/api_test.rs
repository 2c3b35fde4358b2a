mod common;

use common::{invoice, item, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "invoice-server");
}

#[tokio::test]
async fn generate_then_view_returns_stored_pdf() {
    let app = TestApp::spawn().await;

    let response = app
        .generate(&invoice("INV001", vec![item(1, "Widget", json!(20))]))
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "PDF generated successfully!" }));

    let path = app.output_dir.path().join("INV001.pdf");
    let stored = std::fs::read(&path).unwrap();
    assert!(stored.starts_with(b"%PDF-"));

    let response = app.view("INV001.pdf").await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers()["content-disposition"].to_str().unwrap(),
        "inline; filename=\"INV001.pdf\""
    );
    let served = response.bytes().await.unwrap();
    assert_eq!(served.as_ref(), stored.as_slice());

    let text = String::from_utf8_lossy(&served);
    assert!(text.contains("(Invoice: INV001) Tj"));
    assert!(text.contains("( 20) Tj"));
}

#[tokio::test]
async fn missing_field_is_rejected_without_writing() {
    let app = TestApp::spawn().await;
    let mut body = invoice("INV002", vec![item(1, "Widget", json!(20))]);
    body.as_object_mut().unwrap().remove("buyer_details");

    let response = app.generate(&body).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing required field: buyer_details");
    assert!(!app.output_dir.path().join("INV002.pdf").exists());
}

#[tokio::test]
async fn unsafe_invoice_number_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .generate(&invoice("../escape", vec![item(1, "Widget", json!(20))]))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invoice_number"));
    assert_eq!(std::fs::read_dir(app.output_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn text_total_is_unprocessable() {
    let app = TestApp::spawn().await;

    let response = app
        .generate(&invoice("INV003", vec![item(1, "Widget", json!("twenty"))]))
        .await;

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("items[0].total"));
    assert!(!app.output_dir.path().join("INV003.pdf").exists());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/generate-pdf", app.address))
        .header("content-type", "application/json")
        .body("{\"invoice_number\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn viewing_unknown_invoice_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.view("NOPE.pdf").await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "PDF file not found. Please generate it first!" })
    );
}

#[tokio::test]
async fn view_treats_unsafe_file_names_as_not_found() {
    let app = TestApp::spawn().await;
    app.generate(&invoice("INV001", vec![item(1, "Widget", json!(20))]))
        .await;

    for filename in ["../Cargo.toml", "INV001", ".hidden.pdf", "../INV001.pdf"] {
        let response = app.view(filename).await;
        assert_eq!(response.status(), 404, "filename {filename}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "PDF file not found. Please generate it first!");
    }
}

#[tokio::test]
async fn view_without_filename_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/view-pdf", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing required field: filename");
}

#[tokio::test]
async fn regenerating_overwrites_previous_file() {
    let app = TestApp::spawn().await;

    app.generate(&invoice("INV004", vec![item(1, "First", json!(20))]))
        .await;
    let response = app
        .generate(&invoice("INV004", vec![item(1, "Second", json!(30))]))
        .await;
    assert_eq!(response.status(), 201);

    let served = app.view("INV004.pdf").await.bytes().await.unwrap();
    let text = String::from_utf8_lossy(&served);
    assert!(text.contains("(Second) Tj"));
    assert!(!text.contains("(First) Tj"));
}

#[tokio::test]
async fn concurrent_generations_leave_a_complete_file() {
    let app = TestApp::spawn().await;

    let requests = (0..8).map(|i| {
        let body = invoice("INV005", vec![item(1, &format!("Item {i}"), json!(i))]);
        let client = app.client.clone();
        let url = format!("{}/generate-pdf", app.address);
        async move { client.post(url).json(&body).send().await.unwrap() }
    });
    let responses = spawn_all(requests).await;

    for response in responses {
        assert_eq!(response.status(), 201);
    }
    let stored = std::fs::read(app.output_dir.path().join("INV005.pdf")).unwrap();
    assert!(stored.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&stored).trim_end().ends_with("%%EOF"));
    assert_eq!(std::fs::read_dir(app.output_dir.path()).unwrap().count(), 1);
}

async fn spawn_all<F>(futures: impl Iterator<Item = F>) -> Vec<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        outputs.push(handle.await.unwrap());
    }
    outputs
}

#[tokio::test]
async fn first_page_only_header_setting_is_honored() {
    let app = TestApp::spawn_with(|settings| settings.header_on_every_page = false).await;
    let items: Vec<Value> = (1..=80).map(|i| item(i, "Seed", json!(1))).collect();

    let response = app.generate(&invoice("INV006", items)).await;
    assert_eq!(response.status(), 201);

    let served = app.view("INV006.pdf").await.bytes().await.unwrap();
    let text = String::from_utf8_lossy(&served);
    assert!(text.matches("/Type /Page /").count() > 1);
    assert_eq!(text.matches("(Invoice: INV006) Tj").count(), 1);
}
