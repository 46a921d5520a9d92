mod common;

use finder_config::LlmSettings;
use finder_llm::completion::Completion;
use finder_llm::connect_backend;

#[tokio::test]
#[ignore]
async fn gemini_self_test_smoketest() {
    common::init_test_tracing();
    let Ok(key) = std::env::var("GOOGLE_API_KEY") else {
        tracing::debug!("Skipping: GOOGLE_API_KEY not set");
        return;
    };

    let settings = LlmSettings {
        api_key: Some(key),
        ..LlmSettings::default()
    };
    let client = connect_backend(&settings).await;
    tracing::debug!(candidates = ?client.candidates(), "live candidates");

    match client.self_test().await {
        Ok(Completion::Text(text)) => assert!(!text.trim().is_empty()),
        other => panic!("live self-test failed: {other:?}"),
    }
}
