//! Cross-layer tests for the auth crate
//!
//! Requests are driven through the real router, middleware and use cases on
//! top of the in-memory repository.

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::value_object::SessionToken;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::{auth_router_generic, with_identity};

    struct Reply {
        status: StatusCode,
        set_cookie: Option<String>,
        body: Value,
    }

    fn app_with(repo: Arc<InMemoryAuthRepository>, config: AuthConfig) -> Router {
        let config = Arc::new(config);
        let routes = Router::new().nest(
            "/api/auth",
            auth_router_generic(repo.clone(), config.clone()),
        );
        with_identity(routes, repo, config)
    }

    fn app(repo: Arc<InMemoryAuthRepository>) -> Router {
        app_with(repo, AuthConfig::development())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Reply {
            status,
            set_cookie,
            body,
        }
    }

    /// `name=value` part of a `Set-Cookie` header
    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().trim().to_string()
    }

    fn alice() -> Value {
        json!({"username": "alice", "email": "a@x.com", "password": "secret1"})
    }

    async fn register_and_login(app: &Router) -> String {
        let reply = send(app, Method::POST, "/api/auth/register", Some(alice()), None).await;
        assert_eq!(reply.status, StatusCode::OK);

        let reply = send(
            app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "secret1"})),
            None,
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        cookie_pair(&reply.set_cookie.unwrap())
    }

    #[tokio::test]
    async fn test_register_login_me_logout_flow() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));

        let reply = send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({"status": "ok"}));

        let again = json!({"username": "alice", "email": "other@x.com", "password": "secret1"});
        let reply = send(&app, Method::POST, "/api/auth/register", Some(again), None).await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.body["reason"], "duplicate");

        let reply = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "secret1"})),
            None,
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({"status": "ok"}));

        let set_cookie = reply.set_cookie.unwrap();
        assert!(set_cookie.starts_with("session_id="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=6047"));
        assert!(!set_cookie.contains("Secure"));
        let cookie = cookie_pair(&set_cookie);

        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["status"], "ok");
        assert_eq!(reply.body["user"]["username"], "alice");
        assert_eq!(reply.body["user"]["email"], "a@x.com");
        assert!(reply.body["user"]["id"].is_string());
        assert!(reply.body["user"].get("password_hash").is_none());

        let reply = send(&app, Method::POST, "/api/auth/logout", None, Some(&cookie)).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.set_cookie.unwrap().contains("Max-Age=0"));

        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body["reason"], "not_logged_in");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;

        let bob = json!({"username": "bob", "email": "A@x.com", "password": "hunter2"});
        let reply = send(&app, Method::POST, "/api/auth/register", Some(bob), None).await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.body["message"], "Username or email already exists");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_identical() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;

        let wrong_password = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "wrong"})),
            None,
        )
        .await;
        let unknown_user = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "mallory", "password": "secret1"})),
            None,
        )
        .await;

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.body, unknown_user.body);
        assert!(wrong_password.set_cookie.is_none());
        assert!(unknown_user.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(repo.clone());

        for body in [
            json!({"username": "alice", "email": "a@x.com"}),
            json!({"username": "", "email": "a@x.com", "password": "secret1"}),
            json!({"username": "alice", "email": "   ", "password": "secret1"}),
            json!({}),
        ] {
            let reply = send(&app, Method::POST, "/api/auth/register", Some(body), None).await;
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            assert_eq!(reply.body["status"], "error");
            assert_eq!(reply.body["reason"], "invalid_input");
        }

        // Nothing was stored, so the name is still free
        let reply = send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_with_empty_fields_is_unauthorized() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        let reply = send(&app, Method::POST, "/api/auth/login", Some(json!({})), None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body["reason"], "invalid_credentials");
    }

    #[tokio::test]
    async fn test_expired_session_is_anonymous() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(repo.clone());
        let cookie = register_and_login(&app).await;

        let token = SessionToken::parse(cookie.trim_start_matches("session_id=")).unwrap();
        assert!(repo.expire_session(&token).await);

        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        // The row is left for cleanup
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_bogus_cookie_is_anonymous() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));

        for cookie in [
            "session_id=garbage",
            "session_id=",
            "other=value",
            "session_id=AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        ] {
            let reply = send(&app, Method::GET, "/api/auth/me", None, Some(cookie)).await;
            assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "cookie: {cookie}");
        }
    }

    #[tokio::test]
    async fn test_logout_without_session_still_clears_cookie() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        let reply = send(&app, Method::POST, "/api/auth/logout", None, None).await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({"status": "ok"}));
        let set_cookie = reply.set_cookie.unwrap();
        assert!(set_cookie.starts_with("session_id=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_production_cookie_is_secure() {
        let app = app_with(
            Arc::new(InMemoryAuthRepository::new()),
            AuthConfig::for_environment("production"),
        );
        send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;

        let reply = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "secret1"})),
            None,
        )
        .await;
        assert!(reply.set_cookie.unwrap().contains("; Secure"));
    }

    #[tokio::test]
    async fn test_each_login_gets_its_own_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(repo.clone());
        let first = register_and_login(&app).await;

        let reply = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "secret1"})),
            None,
        )
        .await;
        let second = cookie_pair(&reply.set_cookie.unwrap());

        assert_ne!(first, second);
        assert_eq!(repo.session_count().await, 2);

        // Logging out one session leaves the other alive
        send(&app, Method::POST, "/api/auth/logout", None, Some(&first)).await;
        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&second)).await;
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_wrong_field_types_use_fixed_message() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));
        let body = json!({"username": 5, "email": "a@x.com", "password": "secret1"});

        let reply = send(&app, Method::POST, "/api/auth/register", Some(body), None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body["reason"], "invalid_input");
        assert_eq!(reply.body["message"], "Missing fields");

        let text = reply.body.to_string();
        assert!(!text.contains("invalid type"));
        assert!(!text.contains("deserialize"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_have_one_winner() {
        let app = app(Arc::new(InMemoryAuthRepository::new()));

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let body = json!({
                        "username": "alice",
                        "email": format!("alice{i}@x.com"),
                        "password": "secret1",
                    });
                    send(&app, Method::POST, "/api/auth/register", Some(body), None)
                        .await
                        .status
                })
            })
            .collect();

        let mut statuses = Vec::new();
        for attempt in attempts {
            statuses.push(attempt.await.unwrap());
        }

        let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let conflicts = statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count();
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_duplicate_cookie_falls_through_to_valid_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(repo.clone());
        let cookie = register_and_login(&app).await;
        let both = format!("session_id=junk; {cookie}");

        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&both)).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["user"]["username"], "alice");

        send(&app, Method::POST, "/api/auth/logout", None, Some(&both)).await;
        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_prepared_sign_in_rejects_unknown_user() {
        crate::application::prepare_sign_in().await.unwrap();

        let app = app(Arc::new(InMemoryAuthRepository::new()));
        let reply = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "mallory", "password": "secret1"})),
            None,
        )
        .await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_custom_cookie_name() {
        let config = AuthConfig::development()
            .with_session_cookie_name("sid")
            .unwrap();
        let app = app_with(Arc::new(InMemoryAuthRepository::new()), config);
        send(&app, Method::POST, "/api/auth/register", Some(alice()), None).await;

        let reply = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "alice", "password": "secret1"})),
            None,
        )
        .await;
        let cookie = cookie_pair(&reply.set_cookie.unwrap());
        assert!(cookie.starts_with("sid="));

        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(reply.status, StatusCode::OK);

        let renamed = cookie.replacen("sid=", "session_id=", 1);
        let reply = send(&app, Method::GET, "/api/auth/me", None, Some(&renamed)).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod store_failure_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use axum::routing::get;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::identity::Identity;
    use crate::domain::entity::session::{ResolvedSession, Session};
    use crate::domain::entity::user::{Credential, User};
    use crate::domain::repository::{SessionRepository, UserRepository};
    use crate::domain::value_object::{SessionToken, UserName, UserPassword};
    use crate::error::{AuthError, AuthResult};
    use crate::presentation::{auth_router_generic, with_identity};

    /// Store whose every call fails
    #[derive(Clone)]
    struct UnavailableStore;

    impl UserRepository for UnavailableStore {
        async fn create(&self, _user: &User, _password_hash: &UserPassword) -> AuthResult<()> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_user_name(&self, _user_name: &UserName) -> AuthResult<Option<Credential>> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    impl SessionRepository for UnavailableStore {
        async fn create(&self, _session: &Session) -> AuthResult<()> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn resolve(&self, _token: &SessionToken) -> AuthResult<Option<ResolvedSession>> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn delete(&self, _token: &SessionToken) -> AuthResult<()> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    async fn whoami(identity: Identity) -> &'static str {
        if identity.is_authenticated() {
            "user"
        } else {
            "anonymous"
        }
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_anonymous() {
        let routes = Router::new().route("/whoami", get(whoami));
        let app = with_identity(
            routes,
            Arc::new(UnavailableStore),
            Arc::new(AuthConfig::development()),
        );

        let cookie = format!("session_id={}", SessionToken::generate().as_str());
        let request = Request::builder()
            .uri("/whoami")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"anonymous");
    }

    #[tokio::test]
    async fn test_identity_defaults_to_anonymous_without_middleware() {
        let app = Router::new().route("/whoami", get(whoami));
        let request = Request::builder().uri("/whoami").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"anonymous");
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn failing_app() -> Router {
        let store = Arc::new(UnavailableStore);
        let config = Arc::new(AuthConfig::development());
        let routes = Router::new().nest(
            "/api/auth",
            auth_router_generic(store.clone(), config.clone()),
        );
        with_identity(routes, store, config)
    }

    #[tokio::test]
    async fn test_register_store_failure_hides_detail() {
        let body = json!({"username": "alice", "email": "a@x.com", "password": "secret1"});
        let (status, body) = post_json(failing_app(), "/api/auth/register", body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "reason": "internal_error", "message": "Internal error"})
        );
    }

    #[tokio::test]
    async fn test_login_store_failure_hides_detail() {
        let body = json!({"username": "alice", "password": "secret1"});
        let (status, body) = post_json(failing_app(), "/api/auth/login", body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["reason"], "internal_error");
        let text = body.to_string().to_lowercase();
        assert!(!text.contains("pool"));
        assert!(!text.contains("database"));
    }
}
