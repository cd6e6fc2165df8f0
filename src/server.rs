use std::{fs, io::ErrorKind, os::unix::fs::FileTypeExt, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::{UnixListener, UnixStream},
    signal::unix::{SignalKind, signal},
    sync::mpsc,
};
use tracing::{info, warn};

use crate::{
    checks::resolver::ConfiguredCheckResolver,
    config::Config,
    dispatch::registry::InMemoryHandlerRegistry,
    forge::rest::RestForgeClient,
    protocol::{ClientMessage, parse_client_message},
    retest::filter::CommandOverlapResolver,
    skip::handler::SkipHandler,
};

enum ExitReason {
    SocketMessage,
    Signal(&'static str),
}

/// Wires the collaborator ports and registers every command handler.
pub fn build_registry(config: &Config) -> Result<InMemoryHandlerRegistry> {
    let forge = Arc::new(
        RestForgeClient::from_config(&config.forge).context("failed to construct forge client")?,
    );
    let checks = Arc::new(
        ConfiguredCheckResolver::from_config(&config.checks)
            .context("invalid checks configuration")?,
    );
    let overlap = Arc::new(CommandOverlapResolver);

    let registry = InMemoryHandlerRegistry::new();
    registry
        .register(Arc::new(SkipHandler::new(forge, checks, overlap)))
        .context("failed to register skip handler")?;
    Ok(registry)
}

/// Event ingress loop: NDJSON envelopes on a unix socket, one dispatch task
/// per comment event. Stops on SIGINT/SIGTERM or an `exit` envelope.
pub async fn run(config: Config) -> Result<()> {
    let registry = Arc::new(build_registry(&config)?);

    let socket_path = config.server.socket_path.clone();
    prepare_socket_path(&socket_path)?;
    let listener = UnixListener::bind(&socket_path)
        .with_context(|| format!("unable to bind socket {}", socket_path.display()))?;

    let mut sigint =
        signal(SignalKind::interrupt()).context("unable to listen for SIGINT (Ctrl+C)")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;
    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<ClientMessage>();

    info!(
        target: "server",
        socket = %socket_path.display(),
        handlers = ?registry.handler_names(),
        "listening_for_events"
    );

    let exit_reason = loop {
        tokio::select! {
            _ = sigint.recv() => break ExitReason::Signal("SIGINT"),
            _ = sigterm.recv() => break ExitReason::Signal("SIGTERM"),
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        let sender = message_tx.clone();
                        tokio::spawn(async move {
                            if let Err(err) = handle_client(stream, sender).await {
                                warn!(target: "server", error = %err, "client_handling_failed");
                            }
                        });
                    }
                    Err(err) => warn!(target: "server", error = %err, "accept_failed"),
                }
            }
            Some(message) = message_rx.recv() => {
                match message {
                    ClientMessage::Exit => break ExitReason::SocketMessage,
                    ClientMessage::Comment(event) => {
                        // Each invocation gets its own task and snapshot;
                        // invocations do not coordinate.
                        let registry = Arc::clone(&registry);
                        tokio::spawn(async move {
                            registry.dispatch(&event).await;
                        });
                    }
                }
            }
        }
    };

    cleanup_socket_path(&socket_path)?;
    match exit_reason {
        ExitReason::SocketMessage => info!(target: "server", "stopped: received exit message"),
        ExitReason::Signal(signal_name) => {
            info!(target: "server", signal = signal_name, "stopped: received signal");
        }
    }

    Ok(())
}

async fn handle_client(
    stream: UnixStream,
    message_tx: mpsc::UnboundedSender<ClientMessage>,
) -> Result<()> {
    let mut lines = BufReader::new(stream).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_client_message(line) {
            Ok(message) => {
                let _ = message_tx.send(message);
            }
            Err(err) => warn!(target: "server", error = %err, "ignoring_invalid_envelope"),
        }
    }

    Ok(())
}

fn prepare_socket_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;
    }

    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            if metadata.file_type().is_socket() || metadata.is_file() {
                fs::remove_file(path)
                    .with_context(|| format!("unable to remove stale socket {}", path.display()))?;
            } else {
                bail!(
                    "socket path exists but is not removable as file/socket: {}",
                    path.display()
                );
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("unable to inspect {}", path.display()));
        }
    }

    Ok(())
}

fn cleanup_socket_path(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("unable to remove {}", path.display())),
    }
}
