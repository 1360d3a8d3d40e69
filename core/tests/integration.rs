//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using ureq as the host. Validates that request
//! building and response parsing work end-to-end with the actual server.

use items_core::{HttpMethod, HttpResponse, ItemInput, ItemsClient};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: items_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();
    let client = ItemsClient::new(&format!("http://{addr}/"));

    // Step 1: list: should be empty.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert!(items.is_empty(), "expected empty list");

    // Step 2: create; the server assigns id and timestamps.
    let input = ItemInput::new("Integration test", "created over HTTP");
    let req = client.build_create_item(&input).unwrap();
    let created = client.parse_create_item(execute(req)).unwrap();
    assert_eq!(created.name, "Integration test");
    assert_eq!(created.description, "created over HTTP");
    assert!(created.created_at.is_some());
    assert_eq!(created.extra["__v"], 0);
    let id = created.id.clone().expect("server assigns an id");

    // Step 3: get returns the same record.
    let fetched = client.parse_get_item(execute(client.build_get_item(&id))).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update with the edited form copy.
    let mut edited = ItemInput::from(&fetched);
    edited.description = "edited".to_string();
    let req = client.build_update_item(&id, &edited).unwrap();
    let updated = client.parse_update_item(execute(req)).unwrap();
    assert_eq!(updated.id.as_deref(), Some(id.as_str()));
    assert_eq!(updated.description, "edited");
    assert_eq!(updated.created_at, created.created_at);

    // Step 5: list: should have one item.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert_eq!(items, vec![updated]);

    // Step 6: delete.
    client.parse_delete_item(execute(client.build_delete_item(&id))).unwrap();

    // Step 7: get after delete: surfaces the 404.
    let err = client.parse_get_item(execute(client.build_get_item(&id))).unwrap_err();
    assert!(err.is_not_found());

    // Step 8: delete again: 404 as well.
    let err = client.parse_delete_item(execute(client.build_delete_item(&id))).unwrap_err();
    assert_eq!(err.status(), Some(404));

    // Step 9: list: should be empty again.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert!(items.is_empty(), "expected empty list after delete");
}
