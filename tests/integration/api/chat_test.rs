//! Chat endpoint tests

mod tests {
    use axum::http::StatusCode;
    use axum::Router;
    use docchat::backend::routes::create_router;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::common::*;

    const TEXT: &[u8] = b"Tokio is an async runtime. Axum is a web framework. \
                          Axum builds on tower services.";

    struct Fixture {
        app: Router,
        user: TestUser,
        document_id: String,
    }

    async fn fixture() -> Fixture {
        let state = test_state();
        let user = create_unique_test_user(&state).await;
        let app = create_router(state);

        let body = multipart_body("document", "stack.txt", "text/plain", TEXT);
        let created = send(app.clone(), upload(Some(&user.token), body)).await;
        let document_id = created.body["id"].as_str().unwrap().to_string();

        Fixture {
            app,
            user,
            document_id,
        }
    }

    async fn create_session(f: &Fixture) -> Value {
        let response = send(
            f.app.clone(),
            post_json(
                "/api/chat/sessions",
                Some(&f.user.token),
                &json!({ "documentId": f.document_id, "userId": f.user.id }),
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }

    #[tokio::test]
    async fn test_conversation_flow() {
        let f = fixture().await;
        let session = create_session(&f).await;
        assert_eq!(session["title"], "Chat about stack.txt");
        let session_id = session["id"].as_str().unwrap().to_string();

        let sent = send(
            f.app.clone(),
            post_json(
                &format!("/api/chat/sessions/{}/messages", session_id),
                Some(&f.user.token),
                &json!({ "message": "What is Axum?", "userId": f.user.id }),
            ),
        )
        .await;
        assert_eq!(sent.status, StatusCode::OK);
        assert_eq!(sent.body["userMessage"]["role"], "user");
        assert_eq!(sent.body["userMessage"]["content"], "What is Axum?");
        assert_eq!(sent.body["assistantMessage"]["role"], "assistant");
        let reply = sent.body["assistantMessage"]["content"].as_str().unwrap();
        assert!(reply.contains("Axum is a web framework."));

        for uri in [
            format!("/api/chat/sessions/{}/messages?userId={}", session_id, f.user.id),
            format!("/api/chat/sessions/{}?userId={}", session_id, f.user.id),
        ] {
            let messages = send(f.app.clone(), get_with_token(&uri, &f.user.token)).await;
            assert_eq!(messages.status, StatusCode::OK);
            assert_eq!(messages.body.as_array().unwrap().len(), 2);
        }

        let sessions = send(
            f.app.clone(),
            get_with_token(
                &format!("/api/chat/sessions?userId={}", f.user.id),
                &f.user.token,
            ),
        )
        .await;
        assert_eq!(sessions.body.as_array().unwrap().len(), 1);

        let deleted = send(
            f.app.clone(),
            delete_with_token(
                &format!("/api/chat/sessions/{}?userId={}", session_id, f.user.id),
                &f.user.token,
            ),
        )
        .await;
        assert_eq!(deleted.status, StatusCode::OK);

        let gone = send(
            f.app,
            get_with_token(
                &format!("/api/chat/sessions/{}?userId={}", session_id, f.user.id),
                &f.user.token,
            ),
        )
        .await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_id_must_match_token() {
        let f = fixture().await;
        let session = create_session(&f).await;
        let session_id = session["id"].as_str().unwrap();
        let someone_else = Uuid::new_v4();

        let create = send(
            f.app.clone(),
            post_json(
                "/api/chat/sessions",
                Some(&f.user.token),
                &json!({ "documentId": f.document_id, "userId": someone_else }),
            ),
        )
        .await;
        assert_eq!(create.status, StatusCode::FORBIDDEN);

        let list = send(
            f.app.clone(),
            get_with_token(
                &format!("/api/chat/sessions?userId={}", someone_else),
                &f.user.token,
            ),
        )
        .await;
        assert_eq!(list.status, StatusCode::FORBIDDEN);

        let message = send(
            f.app,
            post_json(
                &format!("/api/chat/sessions/{}/messages", session_id),
                Some(&f.user.token),
                &json!({ "message": "hi", "userId": someone_else }),
            ),
        )
        .await;
        assert_eq!(message.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_things_are_404() {
        let f = fixture().await;

        let unknown_document = send(
            f.app.clone(),
            post_json(
                "/api/chat/sessions",
                Some(&f.user.token),
                &json!({ "documentId": Uuid::new_v4(), "userId": f.user.id }),
            ),
        )
        .await;
        assert_eq!(unknown_document.status, StatusCode::NOT_FOUND);

        let unknown_session = send(
            f.app,
            post_json(
                &format!("/api/chat/sessions/{}/messages", Uuid::new_v4()),
                Some(&f.user.token),
                &json!({ "message": "hi", "userId": f.user.id }),
            ),
        )
        .await;
        assert_eq!(unknown_session.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleting_document_drops_its_sessions() {
        let f = fixture().await;
        let session = create_session(&f).await;
        let session_id = session["id"].as_str().unwrap();

        send(
            f.app.clone(),
            delete_with_token(&format!("/api/documents/{}", f.document_id), &f.user.token),
        )
        .await;

        let response = send(
            f.app,
            get_with_token(
                &format!("/api/chat/sessions/{}?userId={}", session_id, f.user.id),
                &f.user.token,
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_message_is_400() {
        let f = fixture().await;
        let session = create_session(&f).await;

        let response = send(
            f.app,
            post_json(
                &format!("/api/chat/sessions/{}/messages", session["id"].as_str().unwrap()),
                Some(&f.user.token),
                &json!({ "message": "   ", "userId": f.user.id }),
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
