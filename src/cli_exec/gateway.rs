use super::*;

pub(super) fn connect(settings: &Settings) -> Result<Gateway> {
    Gateway::connect(&settings.server, settings.timeout())
        .with_context(|| format!("connect to {}", settings.server))
}

/// Runs an action against the configured daemon with an echoing transcript.
pub(super) fn with_gateway<F>(settings: &Settings, f: F) -> Result<bool>
where
    F: FnOnce(&Gateway, &mut Transcript) -> Result<bool>,
{
    let gw = connect(settings)?;
    let mut out = Transcript::echoing();
    f(&gw, &mut out)
}
