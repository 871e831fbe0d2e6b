mod common;

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use imgfetch::image::ImageResult;
use imgfetch::search::{GoogleImageSearch, ImageSearch, SearchFailure, MAX_RESULTS};

fn provider_at(url: &str) -> GoogleImageSearch {
    let dir = std::env::temp_dir();
    GoogleImageSearch::new(common::client(), &common::config(url, &dir))
}

#[tokio::test]
async fn returns_links_in_provider_order() {
    let body = common::items_body(&[
        "https://a.test/1.jpg",
        "https://b.test/2.png",
        "https://c.test/3.gif",
    ]);
    let addr = common::fake_provider(StatusCode::OK, &body).await;
    let images = provider_at(&common::search_url(addr)).search("cats").await;
    assert_eq!(
        images,
        vec![
            ImageResult::new("https://a.test/1.jpg"),
            ImageResult::new("https://b.test/2.png"),
            ImageResult::new("https://c.test/3.gif"),
        ]
    );
}

#[tokio::test]
async fn missing_items_is_an_empty_list() {
    let addr = common::fake_provider(
        StatusCode::OK,
        r#"{"kind": "customsearch#search", "searchInformation": {"totalResults": "0"}}"#,
    )
    .await;
    let provider = provider_at(&common::search_url(addr));
    assert!(provider.try_search("nothing").await.unwrap().is_empty());
    assert!(provider.search("nothing").await.is_empty());
}

#[tokio::test]
async fn non_200_responses_are_empty() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::FORBIDDEN,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::ACCEPTED,
    ]
    .iter()
    {
        let body = common::items_body(&["https://a.test/1.jpg"]);
        let addr = common::fake_provider(*status, &body).await;
        let provider = provider_at(&common::search_url(addr));
        assert!(provider.search("cats").await.is_empty(), "{}", status);
        assert!(matches!(
            provider.try_search("cats").await,
            Err(SearchFailure::HttpError(_))
        ));
    }
}

#[tokio::test]
async fn malformed_body_is_empty() {
    let addr = common::fake_provider(StatusCode::OK, "<html>definitely not json</html>").await;
    assert!(provider_at(&common::search_url(addr))
        .search("cats")
        .await
        .is_empty());
}

#[tokio::test]
async fn unreachable_provider_is_empty() {
    let addr = common::closed_addr().await;
    let provider = provider_at(&common::search_url(addr));
    assert!(provider.search("cats").await.is_empty());
}

#[tokio::test]
async fn never_more_than_eight() {
    let links = (0..10)
        .map(|i| format!("https://a.test/{}.jpg", i))
        .collect::<Vec<_>>();
    let body = common::items_body(&links.iter().map(String::as_str).collect::<Vec<_>>());
    let addr = common::fake_provider(StatusCode::OK, &body).await;
    let images = provider_at(&common::search_url(addr)).search("cats").await;
    assert_eq!(images.len(), MAX_RESULTS);
    assert_eq!(images[0].url, "https://a.test/0.jpg");
}

#[tokio::test]
async fn sends_credentials_and_fixed_parameters() {
    // only answers when every expected parameter is present
    let router = Router::new().route(
        common::SEARCH_PATH,
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let expected = [
                ("key", common::API_KEY),
                ("cx", common::ENGINE_ID),
                ("q", "red pandas"),
                ("searchType", "image"),
                ("num", "8"),
            ];
            let all_present = expected
                .iter()
                .all(|(key, value)| params.get(*key).map(String::as_str) == Some(*value));
            if all_present {
                (StatusCode::OK, common::items_body(&["https://a.test/panda.jpg"]))
            } else {
                (StatusCode::FORBIDDEN, String::from("{}"))
            }
        }),
    );
    let addr = common::spawn(router).await;
    let images = provider_at(&common::search_url(addr)).search("red pandas").await;
    assert_eq!(images, vec![ImageResult::new("https://a.test/panda.jpg")]);
}
