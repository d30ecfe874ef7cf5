use std::process::{Command, Output};

use anyhow::{Context, Result};

fn lbry_bulk(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_lbry-bulk"))
        .args(args)
        .output()
        .with_context(|| format!("run lbry-bulk {:?}", args))
}

fn run_ok(args: &[&str]) -> Result<String> {
    let out = lbry_bulk(args)?;
    if !out.status.success() {
        anyhow::bail!(
            "lbry-bulk {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_ok(&["--help"])?;
    assert!(help.contains("Usage: lbry-bulk"));
    for cmd in ["download", "list", "delete", "peers", "supports", "seeding-ratio", "comments", "settings"] {
        assert!(help.contains(cmd), "missing {}", cmd);
    }
    assert!(help.contains("--server"));

    let list_help = run_ok(&["list", "--help"])?;
    assert!(list_help.contains("Usage: lbry-bulk list <COMMAND>"));
    for cmd in ["claims", "sizes", "channels", "supports", "bids", "trending", "search", "subs", "latest"] {
        assert!(list_help.contains(cmd), "missing list {}", cmd);
    }

    let supports_help = run_ok(&["supports", "update", "--help"])?;
    assert!(supports_help.contains("--strategy"));
    assert!(supports_help.contains("--invalid"));

    Ok(())
}

#[test]
fn settings_save_then_show() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    let config = path.to_string_lossy().to_string();

    run_ok(&["--config", &config, "--server", "http://127.0.0.1:6000", "settings", "save"])?;
    assert!(path.exists());

    let shown = run_ok(&["--config", &config, "settings", "show"])?;
    let value: serde_json::Value = serde_json::from_str(&shown)?;
    assert_eq!(value["server"], "http://127.0.0.1:6000");
    Ok(())
}

#[test]
fn unreachable_daemon_exits_nonzero() -> Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("none.json").to_string_lossy().to_string();
    let server = format!("http://127.0.0.1:{}", port);

    let out = lbry_bulk(&["--config", &config, "--server", &server, "list", "claims"])?;
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Cannot establish connection to 'lbrynet' on"));
    Ok(())
}
