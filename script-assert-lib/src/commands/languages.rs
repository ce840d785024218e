use super::Host;
use crate::Result;
use crate::backends::BackendRegistry;
use std::io::Write;

/// Lists the names under which expression backends are registered
///
/// # Errors
///
/// This command does not currently fail.
pub fn list_languages<H: Host>(host: &mut H) -> Result<()> {
    let registry = BackendRegistry::shared();
    for language in registry.languages() {
        let _ = writeln!(host.output(), "{language}");
    }

    Ok(())
}
