use backend::app::{exit_status, run};
use backend::logging::{init_logging, LoggingConfig};
use backend::BackendConfig;

fn main() {
    let config = BackendConfig::default();
    init_logging(LoggingConfig {
        filter: None,
        verbose: config.verbose_driver_diagnostics,
    });

    let outcome = run(&config);
    if let Ok(stats) = &outcome {
        log::debug!("exited cleanly after {} frames", stats.frames);
    }
    std::process::exit(exit_status(&outcome));
}
