use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tower::ServiceExt;

use plainwiki::{router, AppState, PageStore, TemplateComponent};

fn app(temp: &TempDir) -> Router {
    let store = PageStore::new(temp.path().to_path_buf());
    router(AppState::new(store, TemplateComponent::new()))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

fn dir_is_empty(temp: &TempDir) -> bool {
    std::fs::read_dir(temp.path()).expect("read_dir").next().is_none()
}

#[tokio::test]
async fn root_redirects_to_front_page() {
    let temp = TempDir::new().expect("tempdir");
    let response = get(&app(&temp), "/").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/view/FrontPage");
}

#[tokio::test]
async fn viewing_a_missing_page_redirects_to_edit() {
    let temp = TempDir::new().expect("tempdir");
    let response = get(&app(&temp), "/view/My%20Page").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/edit/My%20Page");
}

#[tokio::test]
async fn editing_a_missing_page_shows_an_empty_form() {
    let temp = TempDir::new().expect("tempdir");
    let response = get(&app(&temp), "/edit/NewPage").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Editing NewPage"));
    assert!(html.contains(r#"<form action="/save/NewPage" method="POST">"#));
    assert!(html.contains("></textarea>"));
}

#[tokio::test]
async fn save_then_view_rewrites_links() {
    let temp = TempDir::new().expect("tempdir");
    let app = app(&temp);

    let body = "Visit [[FrontPage]] or [[http://example.com]] or [[example.org]]";
    let form = concat!(
        "body=Visit+%5B%5BFrontPage%5D%5D",
        "+or+%5B%5Bhttp%3A%2F%2Fexample.com%5D%5D",
        "+or+%5B%5Bexample.org%5D%5D",
    );
    let saved = post_form(&app, "/save/Links", form).await;
    assert_eq!(saved.status(), StatusCode::FOUND);
    assert_eq!(location(&saved), "/view/Links");

    let on_disk = std::fs::read_to_string(temp.path().join("Links.txt")).expect("page file");
    assert_eq!(on_disk, body);

    let viewed = get(&app, "/view/Links").await;
    assert_eq!(viewed.status(), StatusCode::OK);
    let html = body_text(viewed).await;
    assert!(html.contains(r#"<a href="/view/FrontPage">FrontPage</a>"#));
    assert!(html.contains(r#"<a href="http://example.com">http://example.com</a>"#));
    assert!(html.contains(r#"<a href="http://example.org">example.org</a>"#));
    assert!(!html.contains("[["));
}

#[tokio::test]
async fn edit_shows_raw_link_tokens() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("Raw.txt"), "see [[Other]]").expect("write page");

    let html = body_text(get(&app(&temp), "/edit/Raw").await).await;
    assert!(html.contains("see [[Other]]</textarea>"));
    assert!(!html.contains(r#"<a href="/view/Other">"#));
}

#[tokio::test]
async fn view_escapes_stored_markup() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("Markup.txt"), "<script>x</script>").expect("write page");

    let html = body_text(get(&app(&temp), "/view/Markup").await).await;
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
}

#[tokio::test]
async fn invalid_titles_are_not_found_for_every_operation() {
    let temp = TempDir::new().expect("tempdir");
    let app = app(&temp);

    let uris = ["/view/a.b", "/edit/a%5Db", "/view/..%2Fetc", "/edit/a%2Fb", "/view/", "/view/%FF"];
    for uri in uris {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn save_with_invalid_title_writes_nothing() {
    let temp = TempDir::new().expect("tempdir");
    let app = app(&temp);

    for uri in ["/save/a.b", "/save/..%2Fescape", "/save/a%5Db"] {
        let response = post_form(&app, uri, "body=pwned").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
    assert!(dir_is_empty(&temp));
    assert!(!temp.path().parent().expect("parent").join("escape.txt").exists());
}

#[tokio::test]
async fn invalid_title_and_missing_route_look_the_same() {
    let temp = TempDir::new().expect("tempdir");
    let app = app(&temp);

    let invalid = get(&app, "/view/a.b").await;
    let missing = get(&app, "/nowhere").await;
    assert_eq!(invalid.status(), missing.status());
    assert_eq!(body_text(invalid).await, body_text(missing).await);
}

#[tokio::test]
async fn save_failure_is_a_server_error_with_detail() {
    let temp = TempDir::new().expect("tempdir");
    let store = PageStore::new(temp.path().join("missing-root"));
    let app = router(AppState::new(store, TemplateComponent::new()));

    let response = post_form(&app, "/save/FrontPage", "body=hello").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_text(response).await.is_empty());
}

#[tokio::test]
async fn save_without_body_field_stores_an_empty_page() {
    let temp = TempDir::new().expect("tempdir");
    let response = post_form(&app(&temp), "/save/Blank", "").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(std::fs::read(temp.path().join("Blank.txt")).expect("page file"), Vec::<u8>::new());
}

#[tokio::test]
async fn save_keeps_non_utf8_body_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let response = post_form(&app(&temp), "/save/Bin", "body=%FFab").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(std::fs::read(temp.path().join("Bin.txt")).expect("page file"), b"\xffab");
}

#[tokio::test]
async fn save_without_a_form_stores_an_empty_page() {
    let temp = TempDir::new().expect("tempdir");
    let app = app(&temp);

    let bare = app
        .clone()
        .oneshot(Request::post("/save/Bare").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(bare.status(), StatusCode::FOUND);
    assert_eq!(location(&bare), "/view/Bare");

    let json = app
        .oneshot(
            Request::post("/save/Json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"body":"ignored"}"#))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(json.status(), StatusCode::FOUND);

    assert_eq!(std::fs::read(temp.path().join("Bare.txt")).expect("page file"), Vec::<u8>::new());
    assert_eq!(std::fs::read(temp.path().join("Json.txt")).expect("page file"), Vec::<u8>::new());
}

#[tokio::test]
async fn view_render_failure_is_a_server_error() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("FrontPage.txt"), "hello").expect("write page");
    let store = PageStore::new(temp.path().to_path_buf());
    let templates = TemplateComponent::from_sources([("edit", "{{BODY}}")]);
    let app = router(AppState::new(store, templates));

    let response = get(&app, "/view/FrontPage").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.starts_with("Template error"));

    let edit = get(&app, "/edit/FrontPage").await;
    assert_eq!(edit.status(), StatusCode::OK);
    assert_eq!(body_text(edit).await, "hello");
}
