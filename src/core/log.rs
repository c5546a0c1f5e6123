use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// HTTP stack crates that only log above `WARN` even when verbose.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "fjall", "lsm_tree"];

fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    QUIET_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, LevelFilter::WARN.min(level))
        })
        .with_target("fxconv", level)
}

/// Logs go to stderr so conversion results on stdout stay pipeable.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_verbose_targets() {
        let targets = app_targets(true);
        assert!(targets.would_enable("fxconv::providers", &Level::DEBUG));
        assert!(!targets.would_enable("hyper_util::client", &Level::DEBUG));
        assert!(targets.would_enable("reqwest::connect", &Level::WARN));
    }

    #[test]
    fn test_quiet_by_default() {
        let targets = app_targets(false);
        assert!(!targets.would_enable("fxconv", &Level::ERROR));
        assert!(!targets.would_enable("reqwest", &Level::WARN));
    }
}
