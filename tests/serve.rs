use std::time::Duration;

use cairn::middleware::{CORRELATION_HEADER, Correlate, PathDecode, TraceLog};
use cairn::{Request, Response, Router, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn echo(req: Request) -> Response {
    let name = req.param("name").unwrap_or_default();
    Response::text(format!("{name}|{}|{}", req.correlation_id(), req.content_type()))
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn send(port: u16, raw: &str) -> String {
    let mut stream = loop {
        match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(stream) => break stream,
            Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    };
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn serves_the_middleware_chain_over_http1() {
    let port = free_port();
    let app = Router::new()
        .layer(Correlate::new())
        .layer(TraceLog::forwarding())
        .layer(PathDecode)
        .get("/things/{name}", echo);

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::bind(&format!("127.0.0.1:{port}")).serve_with_shutdown(app, async {
            stopped.await.ok();
        }),
    );

    let ok = send(
        port,
        &format!(
            "GET /things/a%20b HTTP/1.1\r\nhost: localhost\r\n{CORRELATION_HEADER}: abc-123\r\n\
             content-type: text/csv\r\nconnection: close\r\n\r\n"
        ),
    )
    .await;
    assert!(ok.starts_with("HTTP/1.1 200"), "{ok}");
    assert!(ok.to_ascii_lowercase().contains("x-correlation-id: abc-123"), "{ok}");
    assert!(ok.ends_with("a b|abc-123|text/csv"), "{ok}");

    let bad = send(
        port,
        "GET /things/a%zz HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(bad.starts_with("HTTP/1.1 400"), "{bad}");
    assert!(bad.contains("invalid path parameter `name`"), "{bad}");

    let missing = send(
        port,
        "GET /nowhere HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

    let unknown = send(
        port,
        "PURGE /things/x HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(unknown.starts_with("HTTP/1.1 405"), "{unknown}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
