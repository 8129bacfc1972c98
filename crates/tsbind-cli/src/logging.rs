//! Tracing configuration.
//!
//! The subscriber is only initialised when `TSBIND_LOG` (or `RUST_LOG`) is
//! set, so there is zero overhead in normal runs. `TSBIND_LOG` takes
//! precedence and uses the usual `EnvFilter` directive syntax, e.g.
//! `TSBIND_LOG=tsbind_core=debug tsbind -m surface.json`.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let directives = std::env::var("TSBIND_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let Some(directives) = directives else {
        return;
    };
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
