use tracing::Level;

/// Install the global fmt subscriber. Diagnostics go to stderr so they never
/// interleave with listings on stdout.
pub fn init(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
