use crate::error::{RabbitError, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

fn command(tool: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(tool);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Запускает утилиту и возвращает её stdout.
/// Ненулевой код возврата превращается в `ExternalTool`,
/// невозможность запуска (нет в PATH) в `ToolNotStarted`.
pub async fn run_tool(tool: &str, args: &[&str]) -> Result<String> {
    run_tool_with_input(tool, args, None).await
}

/// То же, что [`run_tool`], но с передачей `input` на stdin
pub async fn run_tool_with_input(
    tool: &str,
    args: &[&str],
    input: Option<&str>,
) -> Result<String> {
    debug!("Запуск {} {:?}", tool, args);

    let mut cmd = command(tool, args);
    cmd.stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() });

    let mut child = cmd
        .spawn()
        .map_err(|e| RabbitError::not_started(tool, e.to_string()))?;

    if let Some(input) = input {
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await?;
            // stdin закрывается при drop, иначе dmenu ждёт конца ввода
        }
    }

    let output = child.wait_with_output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("{} вернул ошибку: {}", tool, stderr.trim());
        return Err(RabbitError::external(
            tool,
            format!("{} {}", output.status, stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Запускает процесс без ожидания завершения
pub fn spawn_detached(program: &str, args: &[String]) -> Result<u32> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(child.id().unwrap_or_default())
}

/// Проверяет наличие утилиты в PATH
pub async fn is_available(tool: &str) -> bool {
    run_tool("which", &[tool]).await.is_ok()
}
