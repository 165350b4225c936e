//! # Example: compute_pair
//!
//! Runs the default two-function computation for `x = 5`:
//! - `Function_1 = x*2`, finishes after 2s
//! - `Function_2 = x*x`, finishes after 7s
//!
//! with a 10s global timeout. Type `q` + Enter to request a stop, then `y`
//! to confirm or `n` to resume.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► InputListener::spawn(stdin)   (q / y / n)
//!   ├─► Supervisor::run_configured()
//!   │     ├─► publish RunStarted, TaskStarting × 2
//!   │     ├─► poll until AllDone / TimedOut / Cancelled
//!   │     └─► harvest → Report
//!   ├─► Supervisor::shutdown()        (flush status lines)
//!   └─► print Report
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example compute_pair --features logging
//! ```

use std::sync::Arc;

use computevisor::{InputListener, StopSignal, Subscribe, Supervisor, SupervisorConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = SupervisorConfig::default();

    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(computevisor::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let sup = Supervisor::builder(cfg)
        .with_subscribers(subs)
        .with_os_signals()
        .build();

    let stop = StopSignal::new();
    let (mut answers, _listener) = InputListener::spawn(BufReader::new(tokio::io::stdin()), stop.clone());

    let report = sup.run_configured(&stop, &mut answers).await?;
    sup.shutdown().await;

    println!();
    println!("{report}");

    // A pending stdin read cannot be cancelled and would keep the runtime alive.
    std::process::exit(if report.is_success() { 0 } else { 1 });
}
