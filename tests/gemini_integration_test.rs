use menu_lens_common::parse_menu_response;
use serde_json::json;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";

#[tokio::test]
async fn gemini_menu_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let prompt = r#"Return ONLY a JSON array exactly in this format:
[
  {
    "original": "integration test dish",
    "translated": "integration test dish",
    "description": "",
    "ingredients": [],
    "dietary": [],
    "spiceLevel": "Mild",
    "category": "Main",
    "price": "",
    "allergens": []
  }
]
"#;

    let body = json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": {
            "temperature": 0.1,
            "responseMimeType": "application/json"
        }
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}?key={}", GEMINI_API_URL, api_key))
        .json(&body)
        .send()
        .await
        .expect("request failed");

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        panic!("gemini api failed with status {}: {}", status, text);
    }

    let payload: serde_json::Value = response.json().await.expect("invalid json response");
    let text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .expect("response text missing");

    let items = parse_menu_response(text).expect("failed to parse menu response");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].original, "integration test dish");
}
