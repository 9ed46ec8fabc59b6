//! A live feed server for tests
//!
//! The server listens on an ephemeral localhost port against the database in
//! `DATABASE_URL`, with migrations applied on start.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use feed_api::{create_app, create_app_state};
use feed_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, HttpConfig, JwtConfig,
    JwtService, RateLimitConfig, ServerConfig,
};
use feed_core::UserId;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Direct access for seeding rows and checking counters
    pub pool: PgPool,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let pool = state.service_context().pool().clone();
        let app = create_app(state);

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {e}");
            }
        });

        Ok(Self {
            addr,
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            pool,
            jwt,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Session token the server will accept for `user_id`
    pub fn token_for(&self, user_id: UserId) -> Result<String> {
        Ok(self.jwt.issue_access_token(user_id)?)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url()));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let request = self.request(Method::POST, path, Some(token)).json(body);
        Ok(request.send().await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let request = self.request(Method::PUT, path, Some(token)).json(body);
        Ok(request.send().await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(token)).send().await?)
    }
}

/// Fixed settings around the `DATABASE_URL` from the environment
pub fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();

    Ok(AppConfig {
        app: AppSettings {
            name: "feed-integration".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
            run_migrations: true,
            migrations_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/feed-db/migrations")
                .to_string(),
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        http: HttpConfig {
            request_timeout_secs: 10,
        },
    })
}

/// False, with a note on stderr, when no database is configured
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    let available = std::env::var_os("DATABASE_URL").is_some();
    if !available {
        eprintln!("DATABASE_URL not set; skipping");
    }
    available
}

async fn expect_status(response: Response, expected: StatusCode) -> Result<Response> {
    let actual = response.status();
    if actual == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("expected {expected}, got {actual}: {body}")
}

/// Check the status, then decode the JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Result<T> {
    Ok(expect_status(response, expected).await?.json().await?)
}

pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    expect_status(response, expected).await.map(drop)
}
