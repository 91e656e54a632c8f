/// Asks the host to power off by running `command`.
///
/// Best effort: the clock has already released the display and exits
/// regardless of the outcome.
pub async fn power_off(command: &[String]) -> Result<(), crate::error::Error> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };
    let command_line = command.join(" ");

    tracing::warn!(command = %command_line, "System is going to shut down");
    let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|source| crate::error::Error::PowerOff {
            command: command_line.clone(),
            source,
        })?;

    if !status.success() {
        return Err(crate::error::Error::PowerOffStatus {
            command: command_line,
            status,
        });
    }

    Ok(())
}
