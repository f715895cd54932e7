use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flickr_gallery::{params, Client, ClientConfig, Error};

const REST_PATH: &str = "/services/rest/";

fn client(server: &MockServer, options: Value) -> Client {
    let mut options = options;
    options["api_key"] = json!("test-key");
    options["endpoint"] = json!(format!("{}{}", server.uri(), REST_PATH));

    Client::new(ClientConfig::from_value(options).unwrap()).unwrap()
}

fn photo(id: &str, width: u32, height: u32) -> Value {
    json!({
        "id": id,
        "owner": "12@N01",
        "secret": "abc",
        "server": "2",
        "farm": 1,
        "title": format!("Photo {id}"),
        "license": "4",
        "ownername": "Jo",
        "o_width": width.to_string(),
        "o_height": height.to_string(),
    })
}

fn listing(page: u32, photos: Vec<Value>) -> Value {
    json!({
        "photos": { "page": page, "pages": 5, "perpage": 20, "total": "100", "photo": photos },
        "stat": "ok",
    })
}

#[tokio::test]
async fn search_maps_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "flickr.photos.search"))
        .and(query_param("format", "json"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("nojsoncallback", "1"))
        .and(query_param("text", "harbour"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![photo("3", 800, 600), photo("4", 10, 10)])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let gallery = client.search(params! { "text" => "harbour" }).await.unwrap();

    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0].photo_id, "3");
    assert_eq!(gallery[0].thumb_url, "http://farm1.static.flickr.com/2/3_abc_s.jpg");
    assert_eq!(gallery[0].title, "Photo%203");
    assert_eq!(gallery[1].photo_id, "4");
}

#[tokio::test]
async fn listing_requests_mapper_extras() {
    let server = MockServer::start().await;
    Mock::given(query_param("extras", flickr_gallery::flickr::EXTRAS))
        .and(query_param("tags", "cat,dog"))
        .and(query_param("tag_mode", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let gallery = client.tags("cat,dog").await.unwrap();

    assert!(gallery.is_empty());
}

#[tokio::test]
async fn dimension_filter_applies() {
    let server = MockServer::start().await;
    Mock::given(query_param("method", "flickr.groups.pools.getPhotos"))
        .and(query_param("group_id", "34@N00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            1,
            vec![photo("1", 2000, 1500), photo("2", 500, 400), photo("3", 1600, 1200)],
        )))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({ "minWidth": 1024, "minHeight": 768 }));
    let gallery = client.group("34@N00").await.unwrap();

    let ids: Vec<&str> = gallery.iter().map(|item| item.photo_id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[tokio::test]
async fn photoset_owner_fills_links() {
    let server = MockServer::start().await;
    Mock::given(query_param("method", "flickr.photosets.getPhotos"))
        .and(query_param("photoset_id", "721"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photoset": {
                "id": "721",
                "owner": "99@N02",
                "photo": [{ "id": "5", "secret": "s", "server": "7", "farm": 2, "title": "x" }],
            },
            "stat": "ok",
        })))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({ "image_size": "s" }));
    let gallery = client.set("721").await.unwrap();

    assert_eq!(gallery[0].photo_link, "http://flickr.com/photos/99@N02/5");
    assert_eq!(gallery[0].image_url, "http://farm2.static.flickr.com/7/5_s_m.jpg");
}

#[tokio::test]
async fn failed_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(query_param("method", "flickr.people.getPublicPhotos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "fail",
            "code": 1,
            "message": "User not found",
        })))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let err = client.user("nobody").await.unwrap_err();

    match err {
        Error::RemoteApi { code, message } => {
            assert_eq!(code, 1);
            assert_eq!(message, "User not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let err = client.gallery("1-2").await.unwrap_err();

    assert!(matches!(err, Error::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = ClientConfig::from_value(json!({
        "api_key": "test-key",
        "endpoint": format!("http://127.0.0.1:{port}{REST_PATH}"),
    }))
    .unwrap();

    let mut client = Client::new(config).unwrap();
    let err = client.tags("cat").await.unwrap_err();

    assert!(matches!(err, Error::Request));
}

#[tokio::test]
async fn reserved_param_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let err = client.search(params! { "api_key" => "someone-else" }).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn garbage_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let err = client.tags("cat").await.unwrap_err();

    assert!(matches!(err, Error::InvalidResponse));
}

#[tokio::test]
async fn jsonp_body_is_unwrapped() {
    let server = MockServer::start().await;
    let body = format!("jsonFlickrApi({})", listing(1, vec![photo("8", 1, 1)]));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let gallery = client.tags("cat").await.unwrap();

    assert_eq!(gallery[0].photo_id, "8");
}

#[tokio::test]
async fn next_page_without_query_is_noop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));

    assert!(client.next_page().await.unwrap().is_none());
    assert!(client.prev_page().await.unwrap().is_none());
}

#[tokio::test]
async fn next_page_requests_following_page() {
    let server = MockServer::start().await;
    Mock::given(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![photo("1", 1, 1)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(query_param("page", "2"))
        .and(query_param("tags", "cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(2, vec![photo("2", 1, 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    let first = client.search(params! { "tags" => "cat", "page" => 1 }).await.unwrap();
    let second = client.next_page().await.unwrap().unwrap();

    assert_eq!(first[0].photo_id, "1");
    assert_eq!(second[0].photo_id, "2");
    assert_eq!(client.pager().last().unwrap().1.page(), Some(2));
}

#[tokio::test]
async fn prev_page_goes_back_but_not_below_one() {
    let server = MockServer::start().await;
    Mock::given(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(3, vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(2, vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server, json!({}));
    client.search(params! { "page" => 3 }).await.unwrap();

    assert!(client.prev_page().await.unwrap().is_some());
    assert!(client.prev_page().await.unwrap().is_some());
    assert!(client.prev_page().await.unwrap().is_none());
}

#[tokio::test]
async fn photo_info_and_licenses() {
    let server = MockServer::start().await;
    Mock::given(query_param("method", "flickr.photos.getInfo"))
        .and(query_param("photo_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photo": {
                "title": { "_content": "Harbour" },
                "description": { "_content": "" },
                "owner": { "username": "jdoe", "realname": "" },
                "urls": { "url": [{ "type": "photopage", "_content": "https://www.flickr.com/photos/jdoe/3/" }] },
                "tags": { "tag": [] },
            },
            "stat": "ok",
        })))
        .mount(&server)
        .await;
    Mock::given(query_param("method", "flickr.photos.licenses.getInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "licenses": { "license": [{ "id": 4, "name": "Attribution License", "url": "" }] },
            "stat": "ok",
        })))
        .mount(&server)
        .await;

    let client = client(&server, json!({}));
    let info = client.photo_info("3").await.unwrap();
    let licenses = client.licenses().await.unwrap();

    assert_eq!(info.title, "Harbour");
    assert_eq!(info.owner_name, "jdoe");
    assert_eq!(info.url, "https://www.flickr.com/photos/jdoe/3/");
    assert_eq!(licenses[0].id, "4");
}

#[tokio::test]
async fn download_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(path("/2/3_abc.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
        .mount(&server)
        .await;

    let client = client(&server, json!({}));
    let data = client.download(format!("{}/2/3_abc.jpg", server.uri())).await.unwrap();

    assert_eq!(&data[..], [0xff, 0xd8, 0xff]);
}
