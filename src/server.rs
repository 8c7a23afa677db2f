//! Local preview server for `trunk build` output, behind the `dev-server`
//! feature. Production hosting is any static file host.

use axum::Router;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_host: IpAddr,
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST,
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u16_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
        let bind_host = non_empty(lookup("BIND_ADDRESS"))
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(DEFAULT_BIND_HOST);
        let dist_dir = non_empty(lookup("DIST_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));

        Self {
            bind_host,
            port,
            dist_dir,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u16_with_bounds(value: Option<String>, default: u16, bounds: (u16, u16)) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

/// Serves the built single-page app, answering unknown paths with its
/// `index.html` so client-side anchors keep working.
pub fn router(dist_dir: &Path) -> Router {
    let static_service =
        ServeDir::new(dist_dir).not_found_service(ServeFile::new(dist_dir.join("index.html")));

    Router::new().fallback_service(static_service)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    if !config.dist_dir.join("index.html").is_file() {
        tracing::warn!(
            dist_dir = %config.dist_dir.display(),
            "index.html not found, run `trunk build --release` first"
        );
    }

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(address = %listener.local_addr()?, "serving portfolio");
    axum::serve(listener, router(&config.dist_dir)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    async fn get(address: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(address).await.expect("connect");
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.expect("write request");

        let mut response = String::new();
        stream.read_to_string(&mut response).await.expect("read response");
        response
    }

    #[test]
    fn defaults_apply_without_environment() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn environment_overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", " 3000 "),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("DIST_DIR", "public"),
        ]));

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.dist_dir, PathBuf::from("public"));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "0"),
            ("BIND_ADDRESS", "localhost"),
            ("DIST_DIR", "   "),
        ]));

        assert_eq!(config, ServerConfig::default());
    }

    #[tokio::test]
    async fn serves_assets_and_falls_back_to_index() {
        let dist = tempfile::tempdir().expect("temp dir");
        std::fs::write(dist.path().join("index.html"), "<div id=\"app\"></div>").expect("write index");
        std::fs::write(dist.path().join("style.css"), ".neon-grid{}").expect("write css");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local addr");
        let app = router(dist.path());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let asset = get(address, "/style.css").await;
        assert!(asset.starts_with("HTTP/1.1 200"));
        assert!(asset.ends_with(".neon-grid{}"));

        let fallback = get(address, "/projects/unknown").await;
        assert!(fallback.contains("<div id=\"app\"></div>"));
    }
}
