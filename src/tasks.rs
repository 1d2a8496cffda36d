//! Async task management for non-blocking API operations.
//!
//! Requests run in background tokio tasks so the UI keeps rendering. Each
//! task sends exactly one [`ApiMessage`] back through an unbounded channel,
//! which the main loop drains with `try_recv()` every iteration.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{CustomerClient, CustomerDraft, Record};
use crate::state::Command;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Customer list result, tagged with the load it answers.
    CustomersFetched {
        generation: u64,
        result: Result<Vec<Record>, String>,
    },

    /// Creation result: the backend confirmation or an error message.
    CustomerCreated(Result<String, String>),
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Start the I/O described by a state command.
    pub fn dispatch(&self, client: &CustomerClient, command: Command) {
        match command {
            Command::FetchCustomers { generation } => {
                self.spawn_fetch_customers(client, generation)
            }
            Command::CreateCustomer(draft) => self.spawn_create_customer(client, draft),
        }
    }

    /// Spawn a task to fetch the customer list.
    pub fn spawn_fetch_customers(&self, client: &CustomerClient, generation: u64) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.list_customers().await.map_err(|e| e.to_string());
            if tx
                .send(ApiMessage::CustomersFetched { generation, result })
                .is_err()
            {
                debug!(generation, "Receiver gone, dropping customer list");
            }
        });
    }

    /// Spawn a task to submit a new customer.
    pub fn spawn_create_customer(&self, client: &CustomerClient, draft: CustomerDraft) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .create_customer(&draft)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::CustomerCreated(result));
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner).
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DraftField;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CustomerClient {
        CustomerClient::with_endpoints(
            &format!("{}/get_data.php", server.uri()),
            &format!("{}/add_data.php", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_tagged_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"nombre":"Ana"}]"#))
            .mount(&server)
            .await;

        let (mut rx, spawner) = create_task_channel();
        spawner.dispatch(&client_for(&server), Command::FetchCustomers { generation: 7 });

        match rx.recv().await {
            Some(ApiMessage::CustomersFetched { generation, result }) => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("Expected CustomersFetched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_stringified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (mut rx, spawner) = create_task_channel();
        spawner.spawn_fetch_customers(&client_for(&server), 1);

        match rx.recv().await {
            Some(ApiMessage::CustomersFetched { result, .. }) => {
                assert_eq!(result.unwrap_err(), "Network error: 404 Not Found");
            }
            other => panic!("Expected CustomersFetched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_sends_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add_data.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "mensaje": "ok" })),
            )
            .mount(&server)
            .await;

        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Nombre, "Ana");

        let (mut rx, spawner) = create_task_channel();
        spawner.dispatch(&client_for(&server), Command::CreateCustomer(draft));

        match rx.recv().await {
            Some(ApiMessage::CustomerCreated(result)) => assert_eq!(result.unwrap(), "ok"),
            other => panic!("Expected CustomerCreated, got {:?}", other),
        }
    }
}
