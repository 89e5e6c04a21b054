//! Server lifecycle tests
//!
//! Every test binds 127.0.0.1:0 with its own `Lifecycle`, so they run in
//! parallel without interfering.

mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::routing::get;
    use axum::Router;
    use docchat::backend::auth::seed::DEMO_EMAIL;
    use docchat::backend::routes::{create_router, with_pipeline};
    use docchat::backend::server::lifecycle::{bind, schedule_bootstrap};
    use docchat::backend::server::{schedule_demo_seed, LifecycleError, Phase};
    use docchat::client::NoToken;
    use futures_util::future::join_all;
    use tokio::net::TcpStream;

    use crate::common::*;

    #[tokio::test]
    async fn test_phases_over_a_full_run() {
        let state = test_state();
        assert_eq!(state.lifecycle.phase(), Phase::Starting);

        let server = TestServer::spawn(&state, create_router(state.clone())).await;
        assert_eq!(server.lifecycle.phase(), Phase::Listening);
        assert_eq!(server.lifecycle.local_addr(), Some(server.addr));

        let lifecycle = server.lifecycle.clone();
        server.shutdown().await.unwrap();
        assert_eq!(lifecycle.phase(), Phase::Terminated);
    }

    #[tokio::test]
    async fn test_occupied_port_is_addr_in_use() {
        let state = test_state();
        let server = TestServer::spawn(&state, create_router(state.clone())).await;

        let other = test_state();
        let err = bind(server.addr, &other.lifecycle).await.unwrap_err();
        assert!(matches!(err, LifecycleError::AddrInUse(addr) if addr == server.addr));
        assert_eq!(other.lifecycle.phase(), Phase::Starting);

        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_in_flight_request_drains_on_shutdown() {
        let state = test_state();
        let routes = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(400)).await;
                "finished"
            }),
        );
        let mut server = TestServer::spawn(&state, with_pipeline(routes, state.clone())).await;

        let url = server.url("/slow");
        let in_flight = tokio::spawn(async move {
            let response = reqwest::get(url).await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        });

        // let the request reach the handler before signalling
        tokio::time::sleep(Duration::from_millis(100)).await;
        server.trigger_shutdown();
        server.lifecycle.reached(Phase::ShuttingDown).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(
            TcpStream::connect(server.addr).await.is_err(),
            "new connections must be refused while draining"
        );

        let (status, body) = in_flight.await.unwrap().unwrap();
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(body, "finished");

        let lifecycle = server.lifecycle.clone();
        server.shutdown().await.unwrap();
        assert_eq!(lifecycle.phase(), Phase::Terminated);
    }

    #[tokio::test]
    async fn test_failing_bootstrap_leaves_server_listening() {
        let state = test_state();
        let server = TestServer::spawn(&state, create_router(state.clone())).await;

        let ran = schedule_bootstrap(
            server.lifecycle.clone(),
            Duration::from_millis(5),
            || async { Err::<(), _>("seed store unreachable") },
        )
        .await
        .unwrap();
        assert!(!ran);
        assert_eq!(server.lifecycle.phase(), Phase::Listening);
        assert!(!server.lifecycle.demo_seeded());

        let health = reqwest::get(server.url("/health")).await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::OK);

        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_demo_seed_runs_after_listen() {
        let state = test_state();
        let server = TestServer::spawn(&state, create_router(state.clone())).await;

        assert!(schedule_demo_seed(&state).await.unwrap());
        assert!(state.lifecycle.demo_seeded());
        assert!(state.users.find_by_email(DEMO_EMAIL).await.is_some());

        // seeding again is a no-op, still a success
        assert!(schedule_demo_seed(&state).await.unwrap());
        assert_eq!(state.users.len().await, 1);

        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_health_checks() {
        let state = test_state();
        let server = TestServer::spawn(&state, create_router(state.clone())).await;
        let client = server.client(NoToken);

        let results = join_all((0..50).map(|_| {
            let client = client.clone();
            async move { client.health().await }
        }))
        .await;

        for result in results {
            let health = result.unwrap();
            assert_eq!(health.status, "ok");
        }

        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_independent_servers_in_one_process() {
        let first = test_state();
        let second = test_state();
        let a = TestServer::spawn(&first, create_router(first.clone())).await;
        let b = TestServer::spawn(&second, create_router(second.clone())).await;
        assert_ne!(a.addr, b.addr);
        assert!(!Arc::ptr_eq(&a.lifecycle, &b.lifecycle));

        a.shutdown().await.unwrap();
        assert_eq!(b.lifecycle.phase(), Phase::Listening);
        b.shutdown().await.unwrap();
    }
}
