use crate::core::fetch::{FetchCompletion, FetchRequest};
use crate::services::fetch_client::FetchClient;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Run one fetch on the runtime and report its completion
///
/// The request owns a snapshot of the credentials, so later edits cannot
/// leak into a fetch that is already running.
pub fn spawn_fetch(
    client: Arc<FetchClient>,
    request: FetchRequest,
    completions: UnboundedSender<FetchCompletion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let FetchRequest {
            ticket,
            credentials,
        } = request;
        let result = client.fetch(ticket.kind, &credentials).await;
        if completions.send(FetchCompletion { ticket, result }).is_err() {
            debug!(seq = ticket.seq, "completion dropped, receiver closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credentials::Credentials;
    use crate::core::fetch::{FetchError, FetchTicket};
    use crate::core::types::DatasetKind;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_completion_carries_ticket() {
        // Grab a free port and release it so the connection is refused
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Arc::new(FetchClient::new(&format!("http://{addr}"), None).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticket = FetchTicket {
            kind: DatasetKind::Events,
            seq: 42,
        };

        spawn_fetch(
            client,
            FetchRequest {
                ticket,
                credentials: Credentials::default(),
            },
            tx,
        )
        .await
        .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.ticket, ticket);
        assert!(matches!(completion.result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_closed_receiver_is_tolerated() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Arc::new(FetchClient::new(&format!("http://{addr}"), None).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let handle = spawn_fetch(
            client,
            FetchRequest {
                ticket: FetchTicket {
                    kind: DatasetKind::Issues,
                    seq: 1,
                },
                credentials: Credentials::default(),
            },
            tx,
        );
        assert!(handle.await.is_ok());
    }
}
