use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum StubReply {
    Json(String),
    Status(u16, String),
}

/// Stands in for the Aladin item search endpoint at `/ttb/api/ItemSearch.aspx`.
pub struct ProviderStub {
    pub base_url: String,
    pub seen_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProviderStub {
    pub fn spawn(reply: StubReply) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start provider stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/ttb/api/ItemSearch.aspx");

        let seen_queries = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&seen_queries);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = url::Url::parse(&format!("http://stub{}", request.url()))
                    .expect("parse stub request url");
                if url.path() != "/ttb/api/ItemSearch.aspx" {
                    let _ = request.respond(
                        tiny_http::Response::from_string("not found").with_status_code(404),
                    );
                    continue;
                }

                let query = url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect::<HashMap<_, _>>();
                seen.lock().expect("seen queries lock").push(query);

                let response = match &reply {
                    StubReply::Json(body) => {
                        let mut resp = tiny_http::Response::from_string(body.clone());
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"application/json; charset=utf-8"[..],
                        )
                        .expect("content-type header");
                        resp.add_header(header);
                        resp
                    }
                    StubReply::Status(status, body) => {
                        tiny_http::Response::from_string(body.clone()).with_status_code(*status)
                    }
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            seen_queries,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for ProviderStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
