// Everything below except `logging` and `server` backs the browser build. The
// native binary only compiles these modules for their unit tests.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod contact;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod driver;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod error;
mod logging;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod motion;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod pool;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod scroll;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod theme;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod throttle;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(all(not(target_arch = "wasm32"), feature = "dev-server"))]
mod server;

#[cfg(all(not(target_arch = "wasm32"), feature = "dev-server"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    server::run(server::ServerConfig::from_env()).await
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "dev-server")))]
fn main() {
    logging::init();
    tracing::info!("this project is frontend-only; run `trunk serve` or `trunk build --release`");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    logging::init();
    frontend::run();
}
