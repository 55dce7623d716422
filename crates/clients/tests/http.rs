use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use elsewherr_clients::{
    ClientError, RadarrApi, RadarrClient, ReferenceList, TmdbApi, TmdbClient,
};
use elsewherr_core::types::{Movie, Provider};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn push(&self, what: &str, body: Value) {
        self.requests.lock().unwrap().push((what.to_string(), body));
    }

    fn all(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn check_key(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        Some("radarr-key") => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn create_tag(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&headers)?;
    rec.push("create_tag", body.clone());
    Ok(Json(json!({ "id": 3, "label": body["label"] })))
}

async fn update_movie(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_key(&headers)?;
    rec.push("update_movie", body.clone());
    Ok(Json(body))
}

fn radarr_app(rec: Recorded) -> Router {
    Router::new()
        .route(
            "/api/v3/tag",
            get(|headers: HeaderMap| async move {
                check_key(&headers)?;
                Ok::<_, StatusCode>(Json(json!([
                    { "id": 1, "label": "t-netflix" },
                    { "id": 2, "label": "favourite" }
                ])))
            })
            .post(create_tag),
        )
        .route(
            "/api/v3/movie",
            get(|headers: HeaderMap| async move {
                check_key(&headers)?;
                Ok::<_, StatusCode>(Json(json!([
                    { "id": 9, "title": "Heat", "tmdbId": 949, "tags": [1], "monitored": true }
                ])))
            })
            .put(update_movie),
        )
        .with_state(rec)
}

#[tokio::test]
async fn radarr_lists_tags_and_movies() {
    let base = serve(radarr_app(Recorded::default())).await;
    let client = RadarrClient::new(base, "radarr-key");

    let tags = client.list_tags().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].label, "t-netflix");

    let movies = client.list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].tmdb_id, 949);
    assert_eq!(movies[0].extra["monitored"], json!(true));
}

#[tokio::test]
async fn radarr_create_tag_posts_placeholder_id() {
    let rec = Recorded::default();
    let base = serve(radarr_app(rec.clone())).await;
    let client = RadarrClient::new(base, "radarr-key");

    let tag = client.create_tag("t-hulu").await.unwrap();
    assert_eq!(tag.id, 3);
    assert_eq!(tag.label, "t-hulu");
    assert_eq!(
        rec.all(),
        vec![("create_tag".to_string(), json!({ "id": 0, "label": "t-hulu" }))]
    );
}

#[tokio::test]
async fn radarr_update_sends_full_record() {
    let rec = Recorded::default();
    let base = serve(radarr_app(rec.clone())).await;
    let client = RadarrClient::new(base, "radarr-key");

    let mut movie = Movie::new(9, "Heat", 949, vec![1, 4]);
    movie.extra.insert("monitored".into(), json!(true));
    let saved = client.update_movie(&movie).await.unwrap();
    assert_eq!(saved, movie);

    let sent = rec.all();
    assert_eq!(sent[0].0, "update_movie");
    assert_eq!(sent[0].1["tags"], json!([1, 4]));
    assert_eq!(sent[0].1["monitored"], json!(true));
}

#[tokio::test]
async fn radarr_wrong_key_is_status_error() {
    let base = serve(radarr_app(Recorded::default())).await;
    let client = RadarrClient::new(base, "nope");

    let err = client.list_tags().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 401, .. }), "{err}");
}

#[tokio::test]
async fn radarr_unreachable_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RadarrClient::new(format!("http://{addr}"), "radarr-key");
    let err = client.list_movies().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

fn tmdb_app() -> Router {
    Router::new()
        .route(
            "/3/movie/{id}/watch/providers",
            get(
                |Path(id): Path<i64>, Query(q): Query<HashMap<String, String>>| async move {
                    if q.get("api_key").map(String::as_str) != Some("tmdb-key") {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    match id {
                        550 => Ok(Json(json!({
                            "id": 550,
                            "results": {
                                "US": { "flatrate": [
                                    { "provider_name": "Netflix" },
                                    { "provider_name": "Hulu" }
                                ] }
                            }
                        }))),
                        551 => Ok(Json(json!({ "id": 551, "results": {} }))),
                        _ => Err(StatusCode::NOT_FOUND),
                    }
                },
            ),
        )
        .route(
            "/3/watch/providers/regions",
            get(|| async {
                Json(json!({ "results": [
                    { "iso_3166_1": "US", "english_name": "United States" }
                ] }))
            }),
        )
        .route(
            "/3/watch/providers/movie",
            get(|| async { Json(json!({ "status_message": "no results key" })) }),
        )
}

#[tokio::test]
async fn tmdb_watch_providers_for_region() {
    let base = serve(tmdb_app()).await;
    let client = TmdbClient::new(format!("{base}/3"), "tmdb-key");

    let providers = client.watch_providers(550, "US").await.unwrap();
    assert_eq!(providers, vec![Provider::new("Netflix"), Provider::new("Hulu")]);

    assert!(client.watch_providers(550, "GB").await.unwrap().is_empty());
    assert!(client.watch_providers(551, "US").await.unwrap().is_empty());
}

#[tokio::test]
async fn tmdb_unknown_movie_is_not_found() {
    let base = serve(tmdb_app()).await;
    let client = TmdbClient::new(format!("{base}/3"), "tmdb-key");

    let err = client.watch_providers(1, "US").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn tmdb_bad_key_is_status_error() {
    let base = serve(tmdb_app()).await;
    let client = TmdbClient::new(format!("{base}/3"), "wrong");

    let err = client.watch_providers(550, "US").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { service: "TMDB", status: 401 }));
}

#[tokio::test]
async fn tmdb_reference_lists() {
    let base = serve(tmdb_app()).await;
    let client = TmdbClient::new(format!("{base}/3"), "tmdb-key");

    let regions = client.reference_list(ReferenceList::Regions).await.unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0]["iso_3166_1"], "US");

    let providers = client
        .reference_list(ReferenceList::MovieProviders)
        .await
        .unwrap();
    assert!(providers.is_empty());
}
