//! Request executor against a real HTTP peer
//!
//! Header, body and failure-taxonomy behaviour of `ApiClient::execute`.

mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use docchat::client::{ApiClient, ClientError, NoToken, RequestOptions, SharedToken, StaticToken};
    use docchat::shared::ApiConfig;
    use pretty_assertions::assert_eq;
    use reqwest::header::{HeaderValue, AUTHORIZATION};
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::builder()
            .base_url(format!("{}/api", server.uri()))
            .build()
            .unwrap();
        ApiClient::new(config)
    }

    #[tokio::test]
    async fn test_bearer_header_when_token_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .and(header("authorization", "Bearer abc.def.ghi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_token_source(StaticToken::new("abc.def.ghi"));
        let documents = client.get_documents().await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        for client in [
            client_for(&server).with_token_source(NoToken),
            client_for(&server).with_token_source(StaticToken(Some("   ".to_string()))),
        ] {
            client.get_documents().await.unwrap();
        }

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert!(request.headers.get("authorization").is_none());
        }
    }

    #[tokio::test]
    async fn test_token_is_read_on_every_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let token = SharedToken::new();
        let client = client_for(&server).with_token_source(token.clone());

        client.get_documents().await.unwrap();
        token.set(Some("fresh".to_string()));
        client.get_documents().await.unwrap();
        token.clear();
        client.get_documents().await.unwrap();

        let seen: Vec<Option<String>> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                r.headers
                    .get("authorization")
                    .map(|v| v.to_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(seen, vec![None, Some("Bearer fresh".to_string()), None]);
    }

    #[tokio::test]
    async fn test_json_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "t",
                "user": {
                    "id": "00000000-0000-0000-0000-000000000001",
                    "name": "Admin",
                    "email": "admin@mail.com"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = client_for(&server)
            .login("admin@mail.com", "admin123")
            .await
            .unwrap();
        assert_eq!(auth.token, "t");
        assert_eq!(auth.user.name, "Admin");

        let requests = server.received_requests().await.unwrap();
        let body: Value = requests[0].body_json().unwrap();
        assert_eq!(body, json!({ "email": "admin@mail.com", "password": "admin123" }));
        assert_eq!(requests[0].headers.get_all("content-type").iter().count(), 1);
    }

    #[tokio::test]
    async fn test_multipart_upload_has_transport_content_type_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/documents/upload"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "00000000-0000-0000-0000-000000000002",
                "userId": "00000000-0000-0000-0000-000000000001",
                "fileName": "notes.txt",
                "mimeType": "text/plain",
                "size": 5,
                "status": "ready",
                "extractedText": "hello",
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let document = client_for(&server)
            .with_token_source(StaticToken::new("tok"))
            .upload_document("notes.txt", b"hello".to_vec(), Some("text/plain"))
            .await
            .unwrap();
        assert_eq!(document.file_name, "notes.txt");

        let requests = server.received_requests().await.unwrap();
        let request = &requests[0];
        let content_types: Vec<&str> = request
            .headers
            .get_all("content-type")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(content_types.len(), 1);
        assert!(content_types[0].starts_with("multipart/form-data; boundary="));

        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"document\""));
        assert!(body.contains("filename=\"notes.txt\""));
        assert!(body.contains("hello"));
    }

    #[tokio::test]
    async fn test_caller_header_overrides_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .and(header("authorization", "Bearer caller"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_token_source(StaticToken::new("store"));
        let options = RequestOptions::get()
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
        let body: Value = client.execute("/health", options).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_application_failure_keeps_status_and_body() {
        let server = MockServer::start().await;
        let raw = r#"{"error":"Document not found","status":404}"#;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string(raw))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_document(uuid::Uuid::new_v4())
            .await
            .unwrap_err();

        assert_matches!(
            &err,
            ClientError::Application { status, body } if *status == StatusCode::NOT_FOUND && body == raw
        );
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains(raw));
        assert!(err.is_application());
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream <b>down</b>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_documents().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(err.to_string().ends_with("upstream <b>down</b>"));
    }

    #[tokio::test]
    async fn test_decode_failure_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_documents().await.unwrap_err();
        assert_matches!(&err, ClientError::Decode { body, .. } if body == "<html>not json</html>");
        assert!(err.is_decode());
        assert!(!err.is_application());
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let config = ApiConfig::builder()
            .base_url("http://127.0.0.1:1/api")
            .build()
            .unwrap();
        let err = ApiClient::new(config).get_documents().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_deadline_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = ApiConfig::builder()
            .base_url(format!("{}/api", server.uri()))
            .timeout(Some(Duration::from_millis(50)))
            .build()
            .unwrap();
        let err = ApiClient::new(config).get_documents().await.unwrap_err();
        assert_matches!(err, ClientError::Transport(e) if e.is_timeout());
    }
}
