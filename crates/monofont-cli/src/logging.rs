//! Tracing subscriber setup.

use tracing::Level;

/// Maximum level of encoder events printed to stderr.
pub fn max_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    }
}

/// Installs the global fmt subscriber. Events go to stderr so generated
/// output on stdout stays clean.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level(verbose))
        .with_writer(std::io::stderr)
        .finish();
    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
