mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use futures::StreamExt;
use restaurant_ordering_api::{
    error::{AppError, AppResult},
    realtime::{Change, Collection},
    routes::{create_api_router, create_live_router, live},
    services::live_service::{LiveEvent, LiveStream, Screen, screen_stream},
    state::AppState,
};
use uuid::Uuid;

use common::offline_state;

/// Records every reload it is asked for and renders how many it has seen.
struct RecordingScreen {
    reloads: Arc<Mutex<Vec<Option<Change>>>>,
    fail_first: bool,
}

impl RecordingScreen {
    fn new(fail_first: bool) -> (Self, Arc<Mutex<Vec<Option<Change>>>>) {
        let reloads = Arc::new(Mutex::new(Vec::new()));
        let screen = Self {
            reloads: reloads.clone(),
            fail_first,
        };
        (screen, reloads)
    }
}

impl Screen for RecordingScreen {
    type View = usize;

    const NAME: &'static str = "recording";
    const COLLECTIONS: &'static [Collection] = &[Collection::Products, Collection::Categories];

    async fn refresh(&mut self, _state: &AppState, change: Option<Change>) -> AppResult<()> {
        self.reloads.lock().unwrap().push(change);
        if self.fail_first {
            self.fail_first = false;
            return Err(AppError::Unavailable("snapshot source down".into()));
        }
        Ok(())
    }

    fn render(&self) -> usize {
        self.reloads.lock().unwrap().len()
    }
}

async fn next_event(stream: &mut LiveStream) -> LiveEvent {
    tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("event within 5s")
        .expect("stream still open")
}

#[tokio::test]
async fn screen_renders_once_then_after_each_change() {
    let state = offline_state();
    let (screen, reloads) = RecordingScreen::new(false);
    let mut events = screen_stream(state.clone(), screen);

    let first = next_event(&mut events).await;
    assert_eq!(first.name, "recording");
    assert_eq!(first.data, serde_json::json!(1));

    let id = Uuid::new_v4();
    state.feed.publish(Collection::Orders, None);
    state.feed.publish(Collection::Products, Some(id));

    let second = next_event(&mut events).await;
    assert_eq!(second.data, serde_json::json!(2));

    let reloads = reloads.lock().unwrap();
    assert_eq!(reloads[0], None);
    let change = reloads[1].expect("targeted reload");
    assert_eq!(change.collection, Collection::Products);
    assert_eq!(change.id, Some(id));
}

#[tokio::test]
async fn lagging_screen_reloads_everything() {
    let state = offline_state();
    let (screen, reloads) = RecordingScreen::new(false);
    let mut events = screen_stream(state.clone(), screen);
    next_event(&mut events).await;

    for _ in 0..300 {
        state.feed.publish(Collection::Categories, Some(Uuid::new_v4()));
    }
    next_event(&mut events).await;

    assert_eq!(reloads.lock().unwrap()[1], None);
}

#[tokio::test]
async fn failed_reload_is_followed_by_a_full_reload() {
    let state = offline_state();
    let (screen, reloads) = RecordingScreen::new(true);
    let mut events = screen_stream(state.clone(), screen);

    state.feed.publish(Collection::Products, Some(Uuid::new_v4()));

    // The failed first reload emits nothing; the next one starts from scratch.
    let first = next_event(&mut events).await;
    assert_eq!(first.data, serde_json::json!(2));
    assert_eq!(*reloads.lock().unwrap(), vec![None, None]);
}

#[tokio::test]
async fn dropping_the_stream_releases_its_subscription() {
    let state = offline_state();
    let (screen, _) = RecordingScreen::new(false);
    let events = screen_stream(state.clone(), screen);
    assert_eq!(state.feed.subscriber_count(), 1);
    drop(events);
    assert_eq!(state.feed.subscriber_count(), 0);
}

#[tokio::test]
async fn live_routes_answer_with_an_event_stream() {
    let response = live::live_board(State(offline_state())).await.into_response();
    assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");
}

#[tokio::test]
async fn api_and_live_routers_mount_side_by_side() {
    let _app: Router = Router::new()
        .nest("/api", create_api_router())
        .merge(Router::new().nest("/api", create_live_router()))
        .with_state(offline_state());
}
