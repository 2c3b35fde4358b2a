use invoice_server::config::Settings;
use invoice_server::startup::Application;
use serde_json::{json, Value};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub output_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut Settings)) -> Self {
        let output_dir = TempDir::new().expect("Failed to create output directory");
        let mut settings = Settings {
            host: "127.0.0.1".to_string(),
            port: 0,
            output_dir: output_dir.path().to_path_buf(),
            compress: false,
            ..Settings::default()
        };
        customize(&mut settings);

        let app = Application::build(&settings)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            output_dir,
            client,
        }
    }

    pub async fn generate(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/generate-pdf", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn view(&self, filename: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/view-pdf", self.address))
            .query(&[("filename", filename)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn item(sno: i64, name: &str, total: Value) -> Value {
    json!({
        "sno": sno, "name": name, "hsn_code": "1234", "tax_slab": "5%",
        "quantity": 2, "price": 10, "total": total
    })
}

pub fn invoice(number: &str, items: Vec<Value>) -> Value {
    json!({
        "issuer_details": ["Acme Co", "1 Main St"],
        "buyer_details": ["Jane Doe", "2 Oak Ave"],
        "items": items,
        "invoice_number": number,
    })
}
