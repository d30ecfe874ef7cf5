#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::{Value, json};

use lbry_bulk::gateway::{Gateway, GatewayError, RpcReply, Transport};
use lbry_bulk::model::Lbc;
use lbry_bulk::transcript::Transcript;

pub const FAKE_ENDPOINT: &str = "http://fake-daemon:5279";

/// Deterministic 40-hex claim ID.
pub fn cid(n: u32) -> String {
    format!("{:040x}", n)
}

pub fn lbc(s: &str) -> Lbc {
    s.parse().unwrap()
}

#[derive(Default)]
struct State {
    down: bool,
    claims: Vec<Value>,
    /// Supports by others, per claim ID.
    base: HashMap<String, Lbc>,
    files: Vec<Value>,
    supports: Vec<Value>,
    prefs: Value,
    peers: HashMap<String, Vec<Value>>,
    own: Vec<String>,
    download_dir: PathBuf,
    blobs: u64,
    next_tx: u64,
    failing: Vec<String>,
}

/// In-memory daemon. Answers the JSON-RPC methods the gateway uses and
/// records every call, including calls made while it is down.
pub struct FakeDaemon {
    state: Mutex<State>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeDaemon {
    pub fn new(download_dir: &Path) -> Self {
        Self {
            state: Mutex::new(State {
                download_dir: download_dir.to_path_buf(),
                prefs: json!({}),
                ..State::default()
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn down() -> Self {
        let fake = Self::new(Path::new("/nonexistent"));
        fake.state.lock().unwrap().down = true;
        fake
    }

    pub fn add_channel(&self, name: &str, id: &str) -> &Self {
        self.state.lock().unwrap().claims.push(json!({
            "claim_id": id,
            "name": name,
            "canonical_url": format!("lbry://{}#{}", name, &id[..1]),
            "permanent_url": format!("lbry://{}#{}", name, id),
            "value_type": "channel",
            "height": 1,
            "amount": "1.0",
        }));
        self
    }

    /// A downloadable stream signed by `channel` (name, id).
    pub fn add_stream(&self, name: &str, id: &str, channel: Option<(&str, &str)>, release_time: i64) -> &Self {
        let mut claim = json!({
            "claim_id": id,
            "name": name,
            "canonical_url": format!("lbry://{}#{}", name, &id[..2]),
            "permanent_url": format!("lbry://{}#{}", name, id),
            "value_type": "stream",
            "height": release_time / 100,
            "timestamp": release_time,
            "amount": "0.1",
            "value": {
                "title": format!("Title of {}", name),
                "stream_type": "video",
                "release_time": release_time.to_string(),
                "source": {
                    "media_type": "video/mp4",
                    "size": "1048576",
                    "sd_hash": format!("sd-{}", id),
                },
                "video": { "duration": 60 },
            },
        });
        if let Some((ch_name, ch_id)) = channel {
            claim["signing_channel"] = json!({
                "name": ch_name,
                "claim_id": ch_id,
                "canonical_url": format!("lbry://{}#{}", ch_name, &ch_id[..1]),
            });
        }
        self.state.lock().unwrap().claims.push(claim);
        self
    }

    /// A stream without a blob source.
    pub fn add_livestream(&self, name: &str, id: &str, channel: (&str, &str), release_time: i64) -> &Self {
        self.state.lock().unwrap().claims.push(json!({
            "claim_id": id,
            "name": name,
            "canonical_url": format!("lbry://{}#{}", name, &id[..2]),
            "permanent_url": format!("lbry://{}#{}", name, id),
            "value_type": "stream",
            "timestamp": release_time,
            "value": { "release_time": release_time },
            "signing_channel": {
                "name": channel.0,
                "claim_id": channel.1,
                "canonical_url": format!("lbry://{}#{}", channel.0, &channel.1[..1]),
            },
        }));
        self
    }

    pub fn set_base_support(&self, claim_id: &str, amount: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .base
            .insert(claim_id.to_string(), lbc(amount));
        self
    }

    /// One of our supports on `claim_id`, which need not resolve.
    pub fn add_support(&self, claim_id: &str, name: &str, amount: &str) -> &Self {
        let mut st = self.state.lock().unwrap();
        st.next_tx += 1;
        let tx = format!("tx{}", st.next_tx);
        st.supports.push(json!({
            "claim_id": claim_id,
            "name": name,
            "amount": amount,
            "txid": tx,
            "nout": 0,
        }));
        self
    }

    pub fn add_peers(&self, claim_id: &str, nodes: &[&str]) -> &Self {
        let peers = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                json!({
                    "node_id": node,
                    "address": format!("10.0.0.{}", i + 1),
                    "tcp_port": 3333,
                    "udp_port": 4444,
                })
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .peers
            .insert(format!("sd-{}", claim_id), peers);
        self
    }

    /// Marks a stream as held locally, with all of its blobs.
    pub fn add_local_file(&self, claim_id: &str, download_path: Option<&Path>) -> &Self {
        let mut st = self.state.lock().unwrap();
        let Some(claim) = st.claims.iter().find(|c| c["claim_id"] == claim_id).cloned() else {
            panic!("unknown claim {}", claim_id);
        };
        let item = file_item(&claim, download_path);
        st.files.push(item);
        self
    }

    pub fn set_preferences(&self, prefs: Value) -> &Self {
        self.state.lock().unwrap().prefs = prefs;
        self
    }

    pub fn set_own(&self, ids: &[&str]) -> &Self {
        self.state.lock().unwrap().own = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn set_blobs(&self, n: u64) -> &Self {
        self.state.lock().unwrap().blobs = n;
        self
    }

    /// Calls to `method` answer with a daemon error payload.
    pub fn fail_method(&self, method: &str) -> &Self {
        self.state.lock().unwrap().failing.push(method.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|(m, _)| m == method).count()
    }

    pub fn local_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .iter()
            .filter_map(|f| f["claim_id"].as_str().map(str::to_string))
            .collect()
    }

    /// Sum of our supports on `claim_id`.
    pub fn ours(&self, claim_id: &str) -> Lbc {
        self.state
            .lock()
            .unwrap()
            .supports
            .iter()
            .filter(|s| s["claim_id"] == claim_id)
            .map(|s| lbc(s["amount"].as_str().unwrap_or("0")))
            .sum()
    }

    /// The reply a daemon would give, without recording the call.
    pub fn answer(&self, method: &str, params: &Value) -> RpcReply {
        let mut st = self.state.lock().unwrap();
        if st.failing.iter().any(|m| m == method) {
            return RpcReply::Error(json!({ "code": -32500, "message": format!("{} failed", method) }));
        }
        match method {
            "version" => RpcReply::Result(json!({ "version": "0.113.0" })),
            "settings_get" => RpcReply::Result(json!({
                "download_dir": st.download_dir.display().to_string(),
            })),
            "resolve" => {
                let mut out = serde_json::Map::new();
                for uri in params["urls"].as_array().cloned().unwrap_or_default() {
                    let uri = uri.as_str().unwrap_or_default().to_string();
                    let item = match find_by_uri(&st, &uri) {
                        Some(claim) => with_supports(&st, claim),
                        None if uri.contains(' ') => json!({ "error": {
                            "name": "INVALID_URL",
                            "text": format!("{} is not a valid url", uri),
                        }}),
                        None => json!({ "error": {
                            "name": "NOT_FOUND",
                            "text": format!("Could not find claim at \"{}\".", uri),
                        }}),
                    };
                    out.insert(uri, item);
                }
                RpcReply::Result(Value::Object(out))
            }
            "claim_search" => RpcReply::Result(claim_search(&st, params)),
            "get" => match get(&mut st, params) {
                Ok(item) => RpcReply::Result(item),
                Err(text) => RpcReply::Result(json!({ "error": text })),
            },
            "file_list" => {
                let items: Vec<Value> = st
                    .files
                    .iter()
                    .filter(|f| matches_filter(f, params, "claim_id"))
                    .filter(|f| matches_filter(f, params, "channel_claim_id"))
                    .cloned()
                    .collect();
                RpcReply::Result(page(items))
            }
            "file_delete" => {
                let id = params["claim_id"].as_str().unwrap_or_default();
                let from_dir = params["delete_from_download_dir"].as_bool().unwrap_or(false);
                let before = st.files.len();
                st.files.retain(|f| {
                    if f["claim_id"] != id {
                        return true;
                    }
                    if from_dir {
                        if let Some(p) = f["download_path"].as_str() {
                            let _ = std::fs::remove_file(p);
                        }
                    }
                    false
                });
                RpcReply::Result(json!(st.files.len() < before))
            }
            "support_list" => {
                let items: Vec<Value> = st
                    .supports
                    .iter()
                    .filter(|s| matches_filter(s, params, "claim_id"))
                    .cloned()
                    .collect();
                RpcReply::Result(page(items))
            }
            "support_create" => {
                let id = params["claim_id"].as_str().unwrap_or_default().to_string();
                let amount = params["amount"].as_str().unwrap_or("0").to_string();
                let name = st
                    .claims
                    .iter()
                    .find(|c| c["claim_id"] == id.as_str())
                    .and_then(|c| c["name"].as_str())
                    .unwrap_or_default()
                    .to_string();
                st.next_tx += 1;
                let tx = format!("tx{}", st.next_tx);
                st.supports.push(json!({
                    "claim_id": id, "name": name, "amount": amount, "txid": tx, "nout": 0,
                }));
                RpcReply::Result(json!({ "txid": tx }))
            }
            "support_abandon" => {
                let id = params["claim_id"].as_str().unwrap_or_default().to_string();
                let name = st
                    .supports
                    .iter()
                    .find(|s| s["claim_id"] == id.as_str())
                    .and_then(|s| s["name"].as_str())
                    .map(str::to_string);
                let Some(name) = name else {
                    return RpcReply::Error(json!({ "message": "No supports found" }));
                };
                st.supports.retain(|s| s["claim_id"] != id.as_str());
                st.next_tx += 1;
                let tx = format!("tx{}", st.next_tx);
                if let Some(keep) = params["keep"].as_str() {
                    st.supports.push(json!({
                        "claim_id": id, "name": name, "amount": keep, "txid": tx, "nout": 0,
                    }));
                }
                RpcReply::Result(json!({ "txid": tx }))
            }
            "peer_list" => {
                let hash = params["blob_hash"].as_str().unwrap_or_default();
                let peers = st.peers.get(hash).cloned().unwrap_or_default();
                RpcReply::Result(page(peers))
            }
            "preference_get" => RpcReply::Result(st.prefs.clone()),
            "claim_list" | "channel_list" => {
                let want_channel = method == "channel_list";
                let items: Vec<Value> = st
                    .claims
                    .iter()
                    .filter(|c| st.own.iter().any(|id| c["claim_id"] == id.as_str()))
                    .filter(|c| (c["value_type"] == "channel") == want_channel)
                    .map(|c| with_supports(&st, c))
                    .collect();
                RpcReply::Result(page(items))
            }
            "blob_list" => RpcReply::Result(json!({
                "items": [], "page": 1, "total_pages": 1, "total_items": st.blobs,
            })),
            other => RpcReply::Error(json!({ "message": format!("unknown method {}", other) })),
        }
    }
}

impl Transport for FakeDaemon {
    fn endpoint(&self) -> &str {
        FAKE_ENDPOINT
    }

    fn call(&self, method: &str, params: Value) -> Result<RpcReply, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));
        if self.state.lock().unwrap().down {
            return Err(GatewayError::Connection {
                endpoint: FAKE_ENDPOINT.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self.answer(method, &params))
    }
}

fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "items": items, "page": 1, "total_pages": 1, "total_items": total })
}

fn matches_filter(item: &Value, params: &Value, key: &str) -> bool {
    match params.get(key) {
        Some(Value::String(want)) => item[key] == want.as_str(),
        _ => true,
    }
}

/// `name`, `@name`, `name#id-prefix`, `name:id-prefix`, with or without
/// the `lbry://` scheme, or a canonical or permanent URL.
fn find_by_uri<'a>(st: &'a State, uri: &str) -> Option<&'a Value> {
    if let Some(c) = st
        .claims
        .iter()
        .find(|c| c["canonical_url"] == uri || c["permanent_url"] == uri)
    {
        return Some(c);
    }
    let bare = uri.trim_start_matches("lbry://");
    let (name, prefix) = match bare.split_once(['#', ':']) {
        Some((n, p)) => (n, p),
        None => (bare, ""),
    };
    st.claims.iter().find(|c| {
        c["name"] == name && c["claim_id"].as_str().is_some_and(|id| id.starts_with(prefix))
    })
}

fn with_supports(st: &State, claim: &Value) -> Value {
    let id = claim["claim_id"].as_str().unwrap_or_default();
    let base = st.base.get(id).copied().unwrap_or_default();
    let ours: Lbc = st
        .supports
        .iter()
        .filter(|s| s["claim_id"] == id)
        .map(|s| lbc(s["amount"].as_str().unwrap_or("0")))
        .sum();
    let mut claim = claim.clone();
    claim["meta"] = json!({ "support_amount": (base + ours).to_string() });
    claim
}

fn claim_search(st: &State, params: &Value) -> Value {
    let types: Vec<String> = params["claim_type"]
        .as_array()
        .map(|a| a.iter().filter_map(|t| t.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let mut hits: Vec<&Value> = st
        .claims
        .iter()
        .filter(|c| match params.get("claim_id").and_then(Value::as_str) {
            Some(id) => c["claim_id"] == id,
            None => true,
        })
        .filter(|c| match params.get("channel").and_then(Value::as_str) {
            Some(ch) => {
                let sc = &c["signing_channel"];
                sc["canonical_url"] == ch || sc["name"] == ch.trim_start_matches("lbry://")
            }
            None => true,
        })
        .filter(|c| match params.get("text").and_then(Value::as_str) {
            Some(text) => c["name"].as_str().is_some_and(|n| n.contains(text)),
            None => true,
        })
        .filter(|c| {
            types.is_empty() || types.iter().any(|t| c["value_type"] == t.as_str())
        })
        .collect();
    hits.sort_by_key(|c| std::cmp::Reverse(release_time(c)));

    let page_no = params["page"].as_u64().unwrap_or(1).max(1) as usize;
    let size = params["page_size"].as_u64().unwrap_or(20).max(1) as usize;
    let total = hits.len();
    let total_pages = total.div_ceil(size).max(1);
    let items: Vec<Value> = hits
        .into_iter()
        .skip((page_no - 1) * size)
        .take(size)
        .map(|c| with_supports(st, c))
        .collect();
    json!({ "items": items, "page": page_no, "total_pages": total_pages, "total_items": total })
}

fn release_time(c: &Value) -> i64 {
    let rt = &c["value"]["release_time"];
    rt.as_i64()
        .or_else(|| rt.as_str().and_then(|s| s.parse().ok()))
        .or_else(|| c["timestamp"].as_i64())
        .unwrap_or(0)
}

fn file_item(claim: &Value, download_path: Option<&Path>) -> Value {
    json!({
        "claim_id": claim["claim_id"],
        "claim_name": claim["name"],
        "channel_name": claim["signing_channel"]["name"],
        "channel_claim_id": claim["signing_channel"]["claim_id"],
        "download_path": download_path.map(|p| p.display().to_string()),
        "file_name": download_path.and_then(|p| p.file_name()).map(|n| n.to_string_lossy().to_string()),
        "sd_hash": claim["value"]["source"]["sd_hash"],
        "blobs_completed": 2,
        "blobs_in_stream": 2,
        "completed": true,
        "added_on": 1_700_000_000,
        "timestamp": claim["timestamp"],
        "metadata": claim["value"],
    })
}

fn get(st: &mut State, params: &Value) -> Result<Value, String> {
    let uri = params["uri"].as_str().unwrap_or_default();
    let claim = find_by_uri(st, uri)
        .cloned()
        .ok_or_else(|| format!("Failed to resolve stream at '{}'", uri))?;
    let id = claim["claim_id"].as_str().unwrap_or_default().to_string();

    let path = if params["save_file"].as_bool().unwrap_or(true) {
        let dir = PathBuf::from(params["download_directory"].as_str().unwrap_or("."));
        let path = dir.join(format!("{}.mp4", claim["name"].as_str().unwrap_or("file")));
        std::fs::write(&path, b"media").map_err(|e| e.to_string())?;
        Some(path)
    } else {
        None
    };

    st.files.retain(|f| f["claim_id"] != id.as_str());
    let item = file_item(&claim, path.as_deref());
    st.files.push(item.clone());
    Ok(item)
}

pub fn gateway(fake: FakeDaemon) -> Gateway<FakeDaemon> {
    Gateway::new(fake)
}

pub fn transcript() -> Transcript {
    Transcript::captured()
}

/// Channel `@Alice` with `n` streams released one day apart, newest last.
pub fn alice(fake: &FakeDaemon, n: u32) -> String {
    let ch = cid(0xA11CE);
    fake.add_channel("@Alice", &ch);
    for i in 0..n {
        fake.add_stream(
            &format!("alice-{}", i),
            &cid(0xA000 + i),
            Some(("@Alice", &ch)),
            1_600_000_000 + i as i64 * 86_400,
        );
    }
    ch
}

pub fn bob(fake: &FakeDaemon, n: u32) -> String {
    let ch = cid(0xB0B);
    fake.add_channel("@Bob", &ch);
    for i in 0..n {
        fake.add_stream(
            &format!("bob-{}", i),
            &cid(0xB000 + i),
            Some(("@Bob", &ch)),
            1_650_000_000 + i as i64 * 86_400,
        );
    }
    ch
}

pub struct ServerGuard {
    pub base_url: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Serves `fake` as a JSON-RPC endpoint over HTTP on an ephemeral port.
pub fn spawn_http_daemon(fake: std::sync::Arc<FakeDaemon>) -> Result<ServerGuard> {
    use axum::{Json, Router, extract::State as AxState, routing::post};

    async fn rpc(AxState(fake): AxState<std::sync::Arc<FakeDaemon>>, Json(body): Json<Value>) -> Json<Value> {
        let method = body["method"].as_str().unwrap_or_default().to_string();
        let params = body.get("params").cloned().unwrap_or_else(|| json!({}));
        let reply = match fake.call(&method, params) {
            Ok(RpcReply::Result(v)) => json!({ "jsonrpc": "2.0", "result": v }),
            Ok(RpcReply::Error(e)) => json!({ "jsonrpc": "2.0", "error": e }),
            Err(e) => json!({ "jsonrpc": "2.0", "error": { "message": e.to_string() } }),
        };
        Json(reply)
    }

    let (addr_tx, addr_rx) = std::sync::mpsc::channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let handle = thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(_) => return,
        };
        rt.block_on(async move {
            let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                Ok(l) => l,
                Err(_) => return,
            };
            let _ = addr_tx.send(listener.local_addr().ok());
            let app = Router::new().route("/", post(rpc)).with_state(fake);
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
    });

    let addr = addr_rx
        .recv_timeout(Duration::from_secs(5))
        .context("server address")?
        .context("bind server")?;
    let base_url = format!("http://{}", addr);
    let guard = ServerGuard {
        base_url,
        shutdown: Some(shutdown_tx),
        handle: Some(handle),
    };
    wait_for_version(&guard.base_url)?;
    Ok(guard)
}

pub fn wait_for_version(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("daemon did not answer at {}", base_url);
        }
        match client
            .post(base_url)
            .json(&json!({ "method": "version", "params": {} }))
            .send()
        {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => thread::sleep(Duration::from_millis(50)),
        }
    }
}

/// Subscription preferences as the wallet stores them.
pub fn prefs(side: &str, uris: &[&str], muted: &[&str]) -> Value {
    let following: Vec<Value> = uris
        .iter()
        .map(|u| json!({ "uri": u, "notificationsDisabled": muted.contains(u) }))
        .collect();
    let mut prefs = json!({});
    prefs[side] = json!({ "type": "object", "value": {
        "subscriptions": uris,
        "following": following,
    }});
    prefs
}
