use anyhow::{Result, anyhow};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

const UNIX_CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_notes(notes: &str) -> Result<()> {
    if cfg!(target_os = "macos") {
        return pipe_to("pbcopy", &[], notes);
    }
    if cfg!(target_os = "windows") {
        return pipe_to("clip", &[], notes);
    }

    for (command, args) in UNIX_CLIPBOARD_COMMANDS {
        match pipe_to(command, args, notes) {
            Ok(()) => return Ok(()),
            Err(err) => debug!(command, error = %err, "clipboard command unavailable"),
        }
    }
    Err(anyhow!(
        "no clipboard command available (tried wl-copy, xclip, xsel)"
    ))
}

fn pipe_to(command: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command '{}' exited with {}", command, status))
    }
}
