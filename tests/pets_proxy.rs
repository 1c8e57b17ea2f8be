mod common;

use catalog_api::{proxy_app, Collection, ProxyState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::{client, spawn, spawn_store, BODY_LIMIT};

async fn spawn_proxy(upstream: &str) -> anyhow::Result<String> {
    let state = ProxyState::new(Collection::Pets.schema(), upstream)?;
    spawn(proxy_app(state, BODY_LIMIT)).await
}

#[tokio::test]
async fn relays_reads_from_upstream() -> anyhow::Result<()> {
    let backend = spawn_store(Collection::Pets).await?;
    let proxy = spawn_proxy(&backend).await?;
    let c = client();

    let res = c.get(format!("{}/pets", proxy)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let pets: Vec<Value> = res.json().await?;
    assert_eq!(pets.len(), 3);
    assert_eq!(pets[0], json!({"name": "Barky", "breed": "Golden Retriever"}));

    let barky: Value = c.get(format!("{}/pets/Barky", proxy)).send().await?.json().await?;
    assert_eq!(barky, json!({"name": "Barky", "breed": "Golden Retriever", "age": 3}));

    let missing = c.get(format!("{}/pets/Nobody", proxy)).send().await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.headers()["content-type"], "application/json");
    assert_eq!(missing.json::<Value>().await?, json!({"error": "Pet not found"}));
    Ok(())
}

#[tokio::test]
async fn path_parameters_become_upstream_bodies() -> anyhow::Result<()> {
    let backend = spawn_store(Collection::Pets).await?;
    let proxy = spawn_proxy(&backend).await?;
    let c = client();

    let created = c.post(format!("{}/pets/Mr%20Whiskers/German%20Shepherd/6", proxy)).send().await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = created.json().await?;
    assert_eq!(body["pet"], json!({"name": "Mr Whiskers", "breed": "German Shepherd", "age": 6}));

    let duplicate = c.post(format!("{}/pets/Mr%20Whiskers/Poodle/2", proxy)).send().await?;
    assert_eq!(duplicate.status(), StatusCode::FORBIDDEN);

    let updated = c.put(format!("{}/pets/Mr%20Whiskers/Beagle/7", proxy)).send().await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let pet: Value = c.get(format!("{}/pets/Mr%20Whiskers", backend)).send().await?.json().await?;
    assert_eq!(pet, json!({"name": "Mr Whiskers", "breed": "Beagle", "age": 7}));

    let bad_age = c.post(format!("{}/pets/Rex/Beagle/old", proxy)).send().await?;
    assert_eq!(bad_age.status(), StatusCode::BAD_REQUEST);

    let absent_update = c.put(format!("{}/pets/Ghost/Beagle/1", proxy)).send().await?;
    assert_eq!(absent_update.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_statuses_pass_through() -> anyhow::Result<()> {
    let backend = spawn_store(Collection::Pets).await?;
    let proxy = spawn_proxy(&backend).await?;
    let c = client();

    let res = c.delete(format!("{}/pets/Barky", proxy)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Pet with name Barky deleted"}));

    let again = c.delete(format!("{}/pets/Barky", proxy)).send().await?;
    assert_eq!(again.status(), StatusCode::NO_CONTENT);
    assert!(again.bytes().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() -> anyhow::Result<()> {
    let closed = {
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        format!("http://{}", listener.local_addr()?)
    };
    let proxy = spawn_proxy(&closed).await?;
    let c = client();

    let res = c.get(format!("{}/pets/Barky", proxy)).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let text = res.text().await?;
    assert!(text.starts_with("Error fetching Barky"), "unexpected body: {}", text);
    Ok(())
}

#[tokio::test]
async fn proxy_answers_preflight_and_rejects_unknown_routes() -> anyhow::Result<()> {
    let backend = spawn_store(Collection::Pets).await?;
    let proxy = spawn_proxy(&backend).await?;
    let c = client();

    let preflight = c.request(reqwest::Method::OPTIONS, format!("{}/pets/Barky", proxy)).send().await?;
    assert_eq!(preflight.status(), StatusCode::OK);

    let post_collection = c.post(format!("{}/pets", proxy)).send().await?;
    assert_eq!(post_collection.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
