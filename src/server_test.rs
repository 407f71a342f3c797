use std::net::SocketAddr;

use tempfile::TempDir;

use super::*;

/// Serve `dir` on an ephemeral port and return its base URL.
async fn spawn(dir: &Path) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let app = router(dir);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"main-app-container\"></div>").unwrap();
    std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
    std::fs::write(dir.path().join("pkg/app.js"), "export default async function init() {}").unwrap();
    dir
}

fn assert_no_cache(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["cache-control"], "no-cache, no-store, must-revalidate");
    assert_eq!(headers["pragma"], "no-cache");
    assert_eq!(headers["expires"], "0");
}

#[tokio::test]
async fn serves_index_at_root_without_caching() {
    let dir = site();
    let base = spawn(dir.path()).await;

    let response = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_no_cache(&response);
    assert!(response.text().await.unwrap().contains("main-app-container"));
}

#[tokio::test]
async fn serves_generated_package() {
    let dir = site();
    let base = spawn(dir.path()).await;

    let response = reqwest::get(format!("{base}/pkg/app.js")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_no_cache(&response);
}

#[tokio::test]
async fn healthz_is_ok() {
    let dir = site();
    let base = spawn(dir.path()).await;

    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn missing_file_is_404_without_caching() {
    let dir = site();
    let base = spawn(dir.path()).await;

    let response = reqwest::get(format!("{base}/favicon.ico")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_no_cache(&response);
}

#[test]
fn socket_addr_parses_ip_hosts() {
    assert_eq!(socket_addr("127.0.0.1", 8080).unwrap().to_string(), "127.0.0.1:8080");
    assert_eq!(socket_addr("0.0.0.0", 1).unwrap().port(), 1);
    assert!(socket_addr("::1", 9000).unwrap().is_ipv6());
}

#[test]
fn socket_addr_rejects_names() {
    let err = socket_addr("localhost", 8080).unwrap_err();
    assert!(matches!(err, CliError::InvalidHost { ref host, .. } if host == "localhost"));
    assert!(err.to_string().starts_with("invalid host address 'localhost'"));
}

#[tokio::test]
async fn serve_rejects_missing_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::resolve(dir.path(), Some(dir.path().join("nope")));
    let err = serve(&paths, "127.0.0.1", 0).await.unwrap_err();
    assert!(matches!(err, CliError::StaticDirMissing(_)));
}
