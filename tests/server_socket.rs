use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use solar_system_demo::server::{AppState, router};
use solar_system_demo::sim::clock::ClockSettings;
use solar_system_demo::sim::solar_system;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

async fn serve(tick_interval: Duration) -> String {
    let state = AppState::new(
        Arc::new(solar_system()),
        ClockSettings::default(),
        tick_interval,
        64,
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router(state)).await });
    format!("ws://{addr}/ws")
}

async fn connect(url: &str) -> Client {
    let (client, _) = connect_async(url).await.unwrap();
    client
}

/// Reads the next text frame as JSON, skipping control frames.
async fn next_event(client: &mut Client) -> Value {
    loop {
        let msg = timeout(WAIT, client.next())
            .await
            .expect("no message in time")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn initial_state_comes_first() {
    let url = serve(Duration::from_millis(20)).await;
    let mut client = connect(&url).await;

    let first = next_event(&mut client).await;
    assert_eq!(first["event"], "initial_state");

    let bodies = first["data"]["bodies"].as_object().unwrap();
    assert_eq!(bodies.len(), 9);
    assert_eq!(bodies["Earth"]["orbital_radius"], 40.0);
    assert!(bodies["Earth"]["current_position"]["x"].is_number());

    let state = &first["data"]["state"];
    assert_eq!(state["paused"], false);
    assert_eq!(state["positions"].as_object().unwrap().len(), 9);
}

#[tokio::test]
async fn updates_arrive_at_the_tick_cadence() {
    let url = serve(Duration::from_millis(10)).await;
    let mut client = connect(&url).await;
    assert_eq!(next_event(&mut client).await["event"], "initial_state");

    let mut last_time = -1.0;
    for _ in 0..3 {
        let update = next_event(&mut client).await;
        assert_eq!(update["event"], "position_update");
        assert_eq!(update["data"]["positions"].as_object().unwrap().len(), 9);

        let time = update["data"]["time"].as_f64().unwrap();
        assert!(time > last_time);
        last_time = time;
    }
}

#[tokio::test]
async fn request_update_gets_an_immediate_reply() {
    // Long enough that only the ticker's first, immediate tick fires.
    let url = serve(Duration::from_secs(3600)).await;
    let mut client = connect(&url).await;

    assert_eq!(next_event(&mut client).await["event"], "initial_state");
    let ticked = next_event(&mut client).await;
    assert_eq!(ticked["event"], "position_update");

    client
        .send(Message::Text(r#"{"event":"request_update"}"#.into()))
        .await
        .unwrap();

    let reply = next_event(&mut client).await;
    assert_eq!(reply["event"], "position_update");
    assert_eq!(reply["data"]["positions"].as_object().unwrap().len(), 9);
    assert_eq!(reply["data"]["time"], ticked["data"]["time"]);
}

#[tokio::test]
async fn unknown_client_messages_are_ignored() {
    let url = serve(Duration::from_secs(3600)).await;
    let mut client = connect(&url).await;

    assert_eq!(next_event(&mut client).await["event"], "initial_state");
    assert_eq!(next_event(&mut client).await["event"], "position_update");

    client
        .send(Message::Text(r#"{"event":"explode"}"#.into()))
        .await
        .unwrap();
    client
        .send(Message::Text(r#"{"event":"request_update"}"#.into()))
        .await
        .unwrap();

    // The bad message neither closed the socket nor got an answer of its own.
    assert_eq!(next_event(&mut client).await["event"], "position_update");
}
