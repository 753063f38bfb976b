use tracing_subscriber::EnvFilter;

/// Human-readable logs on a terminal, JSON lines otherwise. Logs go to
/// stderr so stdout stays free for command output.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,glossa=debug".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json || !atty::is(atty::Stream::Stderr) {
        builder.json().init();
    } else {
        builder.init();
    }
}
