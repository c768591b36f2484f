pub mod clock;
pub mod config;
pub mod error;
pub mod prices;
#[cfg(feature = "cli")]
pub mod telemetry;
pub mod verra;

/// `User-Agent` sent with every outbound request.
pub const USER_AGENT: &str = concat!(
    "carbondata/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);
