//! End-to-end tests against a real listener

use clim_api::{ClimateServer, ServerConfig};
use clim_db::Database;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn sample_db() -> Database {
    let db = Database::new().unwrap();
    db.load_stations(
        "station,name,latitude,longitude,elevation
USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6
",
    )
    .unwrap();
    db.load_measurements(
        "station,date,prcp,tobs
USC00519281,2010-01-01,0.15,70
USC00519281,2017-08-18,0.06,79
USC00513117,2017-08-23,0.00,82
",
    )
    .unwrap();
    db
}

/// Start a server on an ephemeral port and return its base URL.
async fn start_server() -> (String, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel::<()>();
    let server = ClimateServer::new(ServerConfig::default(), sample_db());
    let handle = tokio::spawn(async move {
        server
            .serve(listener, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });
    (base, tx, handle)
}

#[tokio::test]
async fn serves_all_routes_over_http() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    let home = client.get(format!("{}/", base)).send().await.unwrap();
    assert!(home.status().is_success());
    assert!(home.text().await.unwrap().contains("Available Routes"));

    let stations: Value = client
        .get(format!("{}/api/v1.0/stations", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stations, json!(["WAIHEE 837.5, HI US", "KANEOHE 838.1, HI US"]));

    let tobs: Value = client
        .get(format!("{}/api/v1.0/tobs", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tobs, json!([["2017-08-18", 79.0]]));

    let summary: Value = client
        .get(format!("{}/api/v1.0/2010-01-01", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // tobs: 70 79 82 -> mean 77.0
    assert_eq!(summary, json!([70.0, 77.0, 82.0]));

    drop(client);
    shutdown.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/v1.0/precipitation", base);

    let first = client.get(&url).send().await.unwrap().text().await.unwrap();
    let second = client.get(&url).send().await.unwrap().text().await.unwrap();
    assert_eq!(first, second);

    let rows: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);

    drop(client);
    shutdown.send(()).unwrap();
    handle.await.unwrap();
}
