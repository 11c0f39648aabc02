#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population map server binary.
//!
//! Configuration comes from `WEBGIS_CONFIG` (TOML), `BIND_ADDR`, `PORT`,
//! and `RUST_LOG`.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    webgis_server::run_server().await
}
