//! Post endpoints.
//!
//! Bodies are taken raw and decoded only after the caller has been cleared
//! for the operation, so permission and lookup failures win over bad input.

use std::collections::HashMap;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::StatusCode, web};
use serde_json::{Map, Value};

use postboard_core::domain::Post;
use postboard_shared::PostResponse;

use crate::middleware::auth::CurrentCaller;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// A request body as buffered under the configured payload limit.
pub type RawBody = Result<web::Bytes, actix_web::Error>;

/// Decode a JSON object or an urlencoded form into loose fields. A blank
/// body decodes to no fields.
fn decode_fields(req: &HttpRequest, body: RawBody) -> AppResult<Map<String, Value>> {
    let body = body.map_err(|err| {
        let detail = err.to_string();
        if err.error_response().status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(detail)
        } else {
            AppError::BadRequest(detail)
        }
    })?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let content_type = req.content_type();
    if content_type.eq_ignore_ascii_case("application/json") || content_type.ends_with("+json") {
        match serde_json::from_slice(&body) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(AppError::BadRequest("Expected a JSON object.".to_string())),
            Err(err) => Err(AppError::BadRequest(format!("JSON parse error - {err}"))),
        }
    } else if content_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        let text = std::str::from_utf8(&body)
            .map_err(|_| AppError::BadRequest("Form body is not valid UTF-8.".to_string()))?;
        let form = web::Query::<HashMap<String, String>>::from_query(text)
            .map_err(|err| AppError::BadRequest(format!("Form parse error - {err}")))?;
        Ok(form
            .into_inner()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect())
    } else {
        Err(AppError::BadRequest(format!(
            "Unsupported media type \"{content_type}\" in request."
        )))
    }
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        name: post.name,
        text: post.text,
        created: post.created,
        is_published: post.is_published,
        author: post.author.username,
    }
}

/// List published posts.
///
/// GET /posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.post_service.list_published().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// Create a post owned by the caller.
///
/// POST /posts/
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    caller: CurrentCaller,
    body: RawBody,
) -> AppResult<HttpResponse> {
    let caller = caller.into_inner();
    state.post_service.authorize_create(&caller)?;

    let fields = decode_fields(&req, body)?;
    let post = state.post_service.create(&caller, &fields).await?;

    tracing::info!(post_id = post.id, author = %post.author.username, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// Fetch a single post, published or not.
///
/// GET /posts/{id}/
pub async fn retrieve_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.post_service.retrieve(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// Partially update a post. PUT and PATCH behave the same.
///
/// PUT /posts/{id}/, PATCH /posts/{id}/
pub async fn update_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    caller: CurrentCaller,
    path: web::Path<i64>,
    body: RawBody,
) -> AppResult<HttpResponse> {
    let (caller, id) = (caller.into_inner(), path.into_inner());
    let current = state.post_service.find_modifiable(&caller, id).await?;

    let fields = decode_fields(&req, body)?;
    let post = state.post_service.apply_update(current, &fields).await?;

    tracing::info!(post_id = id, caller = ?caller.identity().map(|c| c.user_id), "Post updated");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// Delete a post.
///
/// DELETE /posts/{id}/
pub async fn delete_post(
    state: web::Data<AppState>,
    caller: CurrentCaller,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let (caller, id) = (caller.into_inner(), path.into_inner());
    state.post_service.delete(&caller, id).await?;

    tracing::info!(post_id = id, caller = ?caller.identity().map(|c| c.user_id), "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use base64::{Engine, engine::general_purpose};
    use serde_json::json;

    use postboard_core::domain::{NewPost, NewUser, User};
    use postboard_core::ports::{BaseRepository, PasswordService, PostRepository, UserRepository};
    use postboard_core::validation::PostLimits;
    use postboard_infra::{Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository};
    use postboard_shared::PostRequest;

    use super::*;
    use crate::config::DEFAULT_BODY_LIMIT;
    use crate::handlers::configure_routes;

    const PASSWORD: &str = "1234567";

    struct Fixture {
        state: AppState,
        posts: Arc<InMemoryPostRepository>,
        user1: User,
        user2: User,
    }

    impl Fixture {
        async fn new() -> Self {
            let posts = Arc::new(InMemoryPostRepository::new());
            let users = Arc::new(InMemoryUserRepository::new());
            let passwords = Arc::new(Argon2PasswordService::new());

            let mut created = Vec::new();
            let accounts = [("TestUser1", false), ("TestUser2", false), ("admin", true)];
            for (username, is_superuser) in accounts {
                let hash = passwords.hash(PASSWORD).unwrap();
                let user = users
                    .insert(NewUser::new(username.to_string(), hash, is_superuser))
                    .await
                    .unwrap();
                created.push(user);
            }
            let user2 = created.remove(1);
            let user1 = created.remove(0);

            let state = AppState::from_parts(
                posts.clone(),
                users,
                passwords,
                PostLimits::default(),
            );

            Self {
                state,
                posts,
                user1,
                user2,
            }
        }

        async fn seed(&self, author: &User, name: &str, is_published: bool) -> Post {
            self.posts
                .insert(NewPost::new(
                    author.as_author(),
                    name.to_string(),
                    format!("{name} text"),
                    is_published,
                ))
                .await
                .unwrap()
        }

        async fn stored(&self, id: i64) -> Option<Post> {
            self.posts.find_by_id(id).await.unwrap()
        }
    }

    fn basic(username: &str) -> (&'static str, String) {
        let encoded = general_purpose::STANDARD.encode(format!("{username}:{PASSWORD}"));
        ("Authorization", format!("Basic {encoded}"))
    }

    macro_rules! app {
        ($fixture:expr) => {
            app!($fixture, DEFAULT_BODY_LIMIT)
        };
        ($fixture:expr, $body_limit:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($fixture.state.clone()))
                    .configure(configure_routes($body_limit)),
            )
            .await
        };
    }

    fn full_update() -> PostRequest {
        PostRequest {
            name: Some("Changed name".to_string()),
            text: Some("Changed text".to_string()),
            is_published: Some(true),
        }
    }

    #[actix_rt::test]
    async fn list_hides_unpublished_but_retrieve_shows_them() {
        let fx = Fixture::new().await;
        let published = fx.seed(&fx.user1, "Post 1", true).await;
        let draft = fx.seed(&fx.user1, "Post 2", false).await;
        let app = app!(fx);

        let req = test::TestRequest::get().uri("/posts/").to_request();
        let listed: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, published.id);
        assert_eq!(listed[0].author, "TestUser1");

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}/", draft.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: PostResponse = test::read_body_json(resp).await;
        assert!(!body.is_published);
    }

    #[actix_rt::test]
    async fn list_is_newest_first() {
        let fx = Fixture::new().await;
        let older = fx.seed(&fx.user1, "Older", true).await;
        let newer = fx.seed(&fx.user2, "Newer", true).await;
        let app = app!(fx);

        let req = test::TestRequest::get().uri("/posts/").to_request();
        let listed: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, [newer.id, older.id]);
    }

    #[actix_rt::test]
    async fn create_without_name_or_text_is_rejected() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        for payload in [json!({ "name": "Post 4" }), json!({ "text": "Text only" })] {
            let req = test::TestRequest::post()
                .uri("/posts/")
                .insert_header(basic("TestUser1"))
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["title"], "Validation Failed");
        }

        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn create_assigns_caller_and_defaults_to_unpublished() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .set_json(json!({ "name": "Post 3", "text": "Body", "author": "TestUser2" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.name, "Post 3");
        assert_eq!(body.author, "TestUser1");
        assert!(!body.is_published);
        assert_eq!(fx.posts.count().await, 1);
        let stored = fx.stored(body.id).await.unwrap();
        assert_eq!(stored.author.id, fx.user1.id);
    }

    #[actix_rt::test]
    async fn create_accepts_form_bodies() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser2"))
            .set_form([("name", "Form post"), ("text", "Form text"), ("is_published", "true")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: PostResponse = test::read_body_json(resp).await;
        assert!(body.is_published);
        assert_eq!(body.author, "TestUser2");
    }

    #[actix_rt::test]
    async fn anonymous_create_is_forbidden() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({ "name": "Post 3", "text": "Body" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn wrong_password_is_forbidden() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let encoded = general_purpose::STANDARD.encode("TestUser1:wrong");
        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(("Authorization", format!("Basic {encoded}")))
            .set_json(json!({ "name": "Post 3", "text": "Body" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Invalid username/password.");
        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn same_name_twice_for_one_author_is_rejected() {
        let fx = Fixture::new().await;
        let app = app!(fx);
        let payload = json!({ "name": "Twice", "text": "Body" });

        let first = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

        let second = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, second).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["errors"]["non_field_errors"][0],
            "The author already has a post with this name."
        );
        assert_eq!(fx.posts.count().await, 1);

        let other_author = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser2"))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, other_author).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_rt::test]
    async fn updating_someone_elses_post_is_forbidden() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        for req in [test::TestRequest::put(), test::TestRequest::patch()] {
            let req = req
                .uri(&format!("/posts/{}/", post.id))
                .insert_header(basic("TestUser2"))
                .set_json(full_update())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }

        let stored = fx.stored(post.id).await.unwrap();
        assert_eq!(stored.name, post.name);
        assert_eq!(stored.text, post.text);
        assert!(!stored.is_published);
    }

    #[actix_rt::test]
    async fn anonymous_update_is_forbidden() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .set_json(full_update())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(fx.stored(post.id).await.unwrap().name, post.name);
    }

    #[actix_rt::test]
    async fn owner_update_persists_all_fields() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::put()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser1"))
            .set_json(full_update())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.name, "Changed name");

        let stored = fx.stored(post.id).await.unwrap();
        assert_eq!(stored.name, "Changed name");
        assert_eq!(stored.text, "Changed text");
        assert!(stored.is_published);
        assert_eq!(stored.author.id, fx.user1.id);
        assert_eq!(stored.created, post.created);
    }

    #[actix_rt::test]
    async fn patch_keeps_omitted_fields() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser1"))
            .set_json(PostRequest {
                is_published: Some(true),
                ..Default::default()
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let stored = fx.stored(post.id).await.unwrap();
        assert_eq!(stored.name, post.name);
        assert_eq!(stored.text, post.text);
        assert!(stored.is_published);
    }

    #[actix_rt::test]
    async fn update_with_blank_name_is_rejected() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser1"))
            .set_json(json!({ "name": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["name"][0], "This field may not be blank.");
        assert_eq!(fx.stored(post.id).await.unwrap().name, post.name);
    }

    #[actix_rt::test]
    async fn superuser_can_update_and_delete_any_post() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user2, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("admin"))
            .set_json(full_update())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.author, "TestUser2");

        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(fx.stored(post.id).await.is_none());
    }

    #[actix_rt::test]
    async fn owner_can_delete_own_post() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", true).await;
        let app = app!(fx);

        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn deleting_someone_elses_post_is_forbidden() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", true).await;
        let app = app!(fx);

        let as_other = test::TestRequest::delete()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser2"))
            .to_request();
        assert_eq!(test::call_service(&app, as_other).await.status(), StatusCode::FORBIDDEN);

        let anonymous = test::TestRequest::delete()
            .uri(&format!("/posts/{}/", post.id))
            .to_request();
        assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::FORBIDDEN);

        assert!(fx.stored(post.id).await.is_some());
    }

    #[actix_rt::test]
    async fn unknown_or_malformed_ids_are_not_found() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::get().uri("/posts/999/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Post with id 999 does not exist.");

        let req = test::TestRequest::get().uri("/posts/abc/").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/posts/999/")
            .insert_header(basic("TestUser1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn malformed_json_is_a_bad_request() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn anonymous_create_is_forbidden_whatever_the_body() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let no_body = test::TestRequest::post().uri("/posts/").to_request();
        assert_eq!(test::call_service(&app, no_body).await.status(), StatusCode::FORBIDDEN);

        let broken = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        assert_eq!(test::call_service(&app, broken).await.status(), StatusCode::FORBIDDEN);

        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn non_owner_patch_without_body_is_forbidden() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser2"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn put_to_unknown_id_without_body_is_not_found() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::put()
            .uri("/posts/999/")
            .insert_header(basic("TestUser1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn owner_patch_without_body_changes_nothing() {
        let fx = Fixture::new().await;
        let post = fx.seed(&fx.user1, "Post 1", false).await;
        let app = app!(fx);

        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/", post.id))
            .insert_header(basic("TestUser1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(fx.stored(post.id).await.unwrap(), post);
    }

    #[actix_rt::test]
    async fn unsupported_media_type_is_a_bad_request() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .insert_header(("Content-Type", "text/plain"))
            .set_payload("name=Post")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(fx.posts.count().await, 0);
    }

    #[actix_rt::test]
    async fn long_text_is_accepted() {
        let fx = Fixture::new().await;
        let app = app!(fx);
        let text = "x".repeat(300 * 1024);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .set_json(json!({ "name": "Long read", "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.text.len(), 300 * 1024);
    }

    #[actix_rt::test]
    async fn body_over_the_limit_is_a_problem_response() {
        let fx = Fixture::new().await;
        let app = app!(fx, 1024);

        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(basic("TestUser1"))
            .set_json(json!({ "name": "Too long", "text": "x".repeat(2048) }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 413);
        assert_eq!(body["title"], "Payload Too Large");
        assert_eq!(fx.posts.count().await, 0);
    }
}
