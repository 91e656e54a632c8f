/// Reports the clock's lifecycle to systemd when run as a `Type=notify`
/// service. Without `NOTIFY_SOCKET` every call is a no-op.
#[derive(Debug)]
pub struct ServiceNotifier {
    span: tracing::Span,
}

impl ServiceNotifier {
    pub fn new() -> Self {
        Self {
            span: tracing::info_span!("systemd"),
        }
    }

    pub fn set_running(&self, mode: crate::mode::DisplayMode) {
        let status = format!("showing time, {mode:?}");
        self.send(&[NotifyState::Ready, NotifyState::Status(&status)]);
    }

    pub fn set_stopping(&self, reason: &str) {
        self.send(&[NotifyState::Stopping, NotifyState::Status(reason)]);
    }

    fn send(&self, states: &[NotifyState<'_>]) {
        tracing::debug!(parent: &self.span, ?states, "Notifying service manager");
        if let Err(error) = notify(states) {
            tracing::error!(parent: &self.span, ?error, "Failed to notify systemd of state change");
        }
    }
}

#[derive(Clone, Debug)]
enum NotifyState<'a> {
    Ready,
    Stopping,
    Status(&'a str),
}

impl std::fmt::Display for NotifyState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyState::Ready => write!(f, "READY=1"),
            NotifyState::Stopping => write!(f, "STOPPING=1"),
            NotifyState::Status(msg) => write!(f, "STATUS={msg}"),
        }
    }
}

fn message(states: &[NotifyState<'_>]) -> String {
    use std::fmt::Write;

    let mut msg = String::new();
    for s in states {
        let _ = writeln!(msg, "{s}");
    }
    msg
}

fn connect_notify_socket() -> std::io::Result<Option<std::os::unix::net::UnixDatagram>> {
    let Some(socket_path) = std::env::var_os("NOTIFY_SOCKET") else {
        return Ok(None);
    };

    let sock = std::os::unix::net::UnixDatagram::unbound()?;
    sock.connect(socket_path)?;

    Ok(Some(sock))
}

fn notify(states: &[NotifyState<'_>]) -> std::io::Result<()> {
    let Some(sock) = connect_notify_socket()? else {
        return Ok(());
    };

    let msg = message(states);
    let len = sock.send(msg.as_bytes())?;

    if len != msg.len() {
        Err(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "incomplete write",
        ))
    } else {
        Ok(())
    }
}
