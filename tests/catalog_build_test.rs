use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chain_catalog::catalog::{build_catalog, SourceConfig};
use chain_catalog::infra::http_client::ReqwestHttp;
use chain_catalog::types::CatalogEntry;
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;
use tempfile::tempdir;

/// Serve a few fixed image routes on an ephemeral local port.
fn spawn_image_host() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/one.png", get(|| async { "one" }))
        .route("/gone.png", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .route(
            "/slow.png",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "slow"
            }),
        )
        .route("/three.png", get(|| async { "three" }));

    let listener = TcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    let server = hyper::Server::from_tcp(listener)?.serve(app.into_make_service());
    tokio::spawn(server);
    Ok(addr)
}

#[tokio::test]
async fn test_remote_build_skips_failed_locators() -> Result<()> {
    let addr = spawn_image_host()?;
    let base = format!("http://{}", addr);
    let source = SourceConfig::RemoteFetch {
        links: vec![
            format!("{}/one.png", base),
            format!("{}/gone.png", base),
            format!("{}/slow.png", base),
            format!("{}/three.png", base),
        ],
    };
    let fetcher = ReqwestHttp::new(Duration::from_millis(500))?;

    let report = build_catalog(&source, &fetcher).await;

    assert_eq!(
        report.entries,
        vec![
            CatalogEntry::new("chain_1", "data:image/png;base64,b25l"),
            CatalogEntry::new("chain_4", "data:image/png;base64,dGhyZWU="),
        ]
    );
    let skipped: Vec<_> = report.failures.iter().map(|f| f.item.as_str()).collect();
    assert_eq!(skipped, vec!["chain_2", "chain_3"]);
    assert!(report.loaded() <= 4);
    Ok(())
}

#[tokio::test]
async fn test_local_build_sorted_with_mime_types() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.png"), b"a")?;
    fs::write(dir.path().join("c.jpg"), b"c")?;
    fs::write(dir.path().join("b.jpeg"), b"b")?;
    let source = SourceConfig::LocalDirectory {
        dir: dir.path().to_path_buf(),
    };
    let fetcher = ReqwestHttp::new(Duration::from_secs(1))?;

    let catalog = build_catalog(&source, &fetcher).await.into_catalog();

    let entries = catalog.entries();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(entries[0].image_ref.starts_with("data:image/png;base64,"));
    assert!(entries[1].image_ref.starts_with("data:image/jpeg;base64,"));
    assert!(entries[2].image_ref.starts_with("data:image/jpeg;base64,"));
    Ok(())
}

#[tokio::test]
async fn test_local_build_survives_unreadable_file() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("one.png"), b"1")?;
    fs::write(dir.path().join("two.JPG"), b"2")?;
    fs::create_dir(dir.path().join("unreadable.jpeg"))?;
    let source = SourceConfig::LocalDirectory {
        dir: dir.path().to_path_buf(),
    };
    let fetcher = ReqwestHttp::new(Duration::from_secs(1))?;

    let report = build_catalog(&source, &fetcher).await;

    let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
    assert_eq!(report.skipped(), 1);
    Ok(())
}

#[tokio::test]
async fn test_direct_build_with_fallback_dir() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("extra.png"), b"x")?;
    let source = SourceConfig::DirectReference {
        entries: vec![CatalogEntry::new("Byzantine", "https://cdn.example.com/byz.png")],
        fallback_dir: Some(dir.path().to_path_buf()),
    };
    let fetcher = ReqwestHttp::new(Duration::from_secs(1))?;

    let catalog = build_catalog(&source, &fetcher).await.into_catalog();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.entries()[0].image_ref, "https://cdn.example.com/byz.png");
    assert_eq!(catalog.entries()[1].name, "extra");
    assert_eq!(catalog.entries()[1].image_ref, "data:image/png;base64,eA==");
    Ok(())
}
