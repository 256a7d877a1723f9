use std::time::Duration;

use monitor_engine::{Notifier, NotifyError, TelegramNotifier, TelegramSettings};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> TelegramSettings {
    TelegramSettings {
        api_base: server.uri(),
        ..TelegramSettings::new("test-token", "12345")
    }
}

#[tokio::test]
async fn notify_posts_the_expected_send_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_json(serde_json::json!({
            "chat_id": "12345",
            "text": "hello there",
            "disable_web_page_preview": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server));
    notifier.notify("hello there").await.expect("delivered");
}

#[tokio::test]
async fn rejected_message_surfaces_the_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server));
    let err = notifier.notify("blocked").await.unwrap_err();
    assert!(matches!(err, NotifyError::HttpStatus(403)));
}

#[tokio::test]
async fn transport_failure_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = TelegramSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let notifier = TelegramNotifier::new(settings);

    let err = notifier.notify("slow").await.unwrap_err();
    assert!(matches!(err, NotifyError::Transport(_)));
}

#[tokio::test]
async fn notify_is_attempted_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server));
    let _ = notifier.notify("no retries").await;
}
