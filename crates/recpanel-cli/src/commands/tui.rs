#[cfg(not(unix))]
use anyhow::Context as _;
use anyhow::{anyhow, Result};
use recpanel_config as config;
use std::env;
use std::path::PathBuf;
use std::process::Command;

pub fn launch(
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    verbose: bool,
) -> Result<()> {
    let base_url = base_url
        .map(|raw| config::validate_base_url(&raw))
        .transpose()?;
    let mut command = build_command(config_path, base_url);
    if verbose {
        eprintln!("launching {:?}", command.get_program());
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = command.status().with_context(|| "launch recpanel-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(config_path: Option<PathBuf>, base_url: Option<String>) -> Command {
    let binary = find_tui_binary();
    let mut command = Command::new(binary);
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(url) = base_url {
        command.arg("--base-url").arg(url);
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("recpanel-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

#[cfg(unix)]
fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "recpanel-tui binary not found; build it with `cargo build -p recpanel-tui` or install the package"
        );
    }
    anyhow!("launch recpanel-tui failed: {}", err)
}
