//! Logging setup for applications using su2mesh-rs.

/// Installs the `env_logger` backend for the `log` facade.
///
/// Verbosity follows `RUST_LOG` (for example `RUST_LOG=su2mesh=debug`).
/// Calling this more than once, or after another logger was installed, is a
/// no-op. Library code never calls it.
///
/// # Example
///
/// ```no_run
/// su2mesh::init_logging();
/// let (volume, _) = su2mesh::load("wing.su2")?;
/// # Ok::<(), su2mesh::Su2Error>(())
/// ```
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("su2mesh-rs logging initialized");
    }
}
