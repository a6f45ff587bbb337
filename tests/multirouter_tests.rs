use http::Method;
use restroute::dispatcher::{Dispatch, HandlerRequest, HandlerResponse, ResponseBody};
use restroute::middleware::cors::headers;
use restroute::middleware::{CorsConfig, CorsConfigBuilder};
use restroute::router::{MultiRouter, Router, RouterError};
use serde_json::json;

fn tagged(base: &str, path: &str, tag: &'static str) -> Router {
    let mut router = Router::new(base);
    router.handle_func(Method::GET, path, move |_req, res, _ctx| {
        res.set_json(200, json!({ "type": tag }));
    });
    router
}

fn tag(res: &HandlerResponse) -> Option<String> {
    match &res.body {
        ResponseBody::Json(v) => v["type"].as_str().map(str::to_string),
        _ => None,
    }
}

fn options(multi: &MultiRouter, path: &str, origin: &str) -> HandlerResponse {
    multi.dispatch(&HandlerRequest::new(Method::OPTIONS, path).with_header("Origin", origin))
}

#[test]
fn test_constructor_rejects_empty_and_root() {
    for base in ["", "/"] {
        match MultiRouter::new(base, vec![tagged("/a", "/", "a")]) {
            Err(RouterError::InvalidBasePath { base_path }) => assert_eq!(base_path, base),
            Ok(_) => panic!("base path {:?} should be rejected", base),
        }
    }
}

#[test]
fn test_dispatches_to_owning_member() {
    let multi = MultiRouter::new(
        "/api",
        vec![tagged("/users", "/:id", "users"), tagged("/posts", "/:id", "posts")],
    )
    .unwrap();
    let res = multi.dispatch(&HandlerRequest::new(Method::GET, "/api/posts/9"));
    assert_eq!(res.status, 200);
    assert_eq!(tag(&res).as_deref(), Some("posts"));
    let res = multi.dispatch(&HandlerRequest::new(Method::GET, "/api/users/9"));
    assert_eq!(tag(&res).as_deref(), Some("users"));
}

#[test]
fn test_ownership_is_exclusive() {
    let mut users = tagged("/users", "/:id", "users");
    users.handle_func(Method::POST, "/", |_req, res, _ctx| res.status = 201);
    // A second member with the same base never sees requests for it.
    let mut shadow = Router::new("/users");
    shadow.handle_func(Method::DELETE, "/:id", |_req, res, _ctx| res.status = 204);
    let multi = MultiRouter::new("/api", vec![users, shadow]).unwrap();

    let res = multi.dispatch(&HandlerRequest::new(Method::DELETE, "/api/users/1"));
    assert_eq!(res.status, 404);
}

#[test]
fn test_unowned_paths_are_404() {
    let multi = MultiRouter::new("/api", vec![tagged("/users", "/:id", "users")]).unwrap();
    for path in ["/api/orders/1", "/other/users/1", "/apiusers/1", "/"] {
        let res = multi.dispatch(&HandlerRequest::new(Method::GET, path));
        assert_eq!(res.status, 404, "path {}", path);
    }
}

#[test]
fn test_list_routes_includes_prefix() {
    let multi = MultiRouter::new(
        "/api/v1",
        vec![tagged("/public", "/data", "public"), tagged("/admin", "/users", "admin")],
    )
    .unwrap();
    assert_eq!(
        multi.list_routes(),
        vec!["GET /api/v1/public/data", "GET /api/v1/admin/users"]
    );
}

fn per_router_setup() -> MultiRouter {
    let mut public = tagged("/public", "/data", "public");
    public.set_cors_config(CorsConfig {
        allowed_origins: vec!["*".into()],
        allowed_methods: vec!["GET".into(), "POST".into()],
        ..CorsConfig::default()
    });
    let mut private = tagged("/private", "/data", "private");
    private.set_cors_config(
        CorsConfigBuilder::new()
            .allowed_origins(&["https://internal-app.com"])
            .allowed_methods(&[Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_credentials(true)
            .max_age(7200)
            .build()
            .unwrap(),
    );
    let mut admin = tagged("/admin", "/users", "admin");
    admin.set_cors_config(
        CorsConfigBuilder::new()
            .allowed_origins(&["https://admin.internal.com"])
            .allow_credentials(true)
            .max_age(3600)
            .build()
            .unwrap(),
    );
    MultiRouter::new("/api/v1", vec![public, private, admin]).unwrap()
}

#[test]
fn test_member_policies_apply_without_aggregate_policy() {
    let multi = per_router_setup();

    let res = options(&multi, "/api/v1/public/data", "https://random-website.com");
    assert_eq!(res.status, 200);
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), Some("*"));
    assert_eq!(res.get_header(headers::ALLOW_CREDENTIALS), Some("false"));

    let res = options(&multi, "/api/v1/private/data", "https://internal-app.com");
    assert_eq!(res.status, 200);
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), Some("https://internal-app.com"));
    assert_eq!(res.get_header(headers::ALLOW_CREDENTIALS), Some("true"));
    assert_eq!(res.get_header(headers::MAX_AGE), Some("7200"));

    let res = options(&multi, "/api/v1/private/data", "https://malicious-site.com");
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), None);

    let res = options(&multi, "/api/v1/admin/users", "https://admin.internal.com");
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), Some("https://admin.internal.com"));
    assert_eq!(res.get_header(headers::MAX_AGE), Some("3600"));
}

#[test]
fn test_aggregate_policy_overrides_members() {
    let mut member = tagged("/data", "/", "data");
    member.set_cors_config(CorsConfig {
        allowed_origins: vec!["https://member-only.com".into()],
        ..CorsConfig::default()
    });
    let multi = MultiRouter::with_cors(
        "/api",
        vec![member],
        CorsConfig {
            allowed_origins: vec!["https://multirouter-cors.com".into()],
            ..CorsConfig::default()
        },
    )
    .unwrap();
    assert!(multi.routers()[0].cors_config().is_none());

    let req = HandlerRequest::new(Method::GET, "/api/data")
        .with_header("Origin", "https://multirouter-cors.com");
    let res = multi.dispatch(&req);
    assert_eq!(res.status, 200);
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), Some("https://multirouter-cors.com"));
    assert_eq!(tag(&res).as_deref(), Some("data"));

    let req = HandlerRequest::new(Method::GET, "/api/data")
        .with_header("Origin", "https://member-only.com");
    let res = multi.dispatch(&req);
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), None);
}

#[test]
fn test_member_default_policy_applies() {
    let multi = MultiRouter::new("/api", vec![tagged("/users", "/:id", "users")]).unwrap();
    let req = HandlerRequest::new(Method::GET, "/api/users/1").with_header("Origin", "https://x.com");
    let res = multi.dispatch(&req);
    assert_eq!(res.get_header(headers::ALLOW_ORIGIN), Some("*"));
    assert_eq!(res.get_header(headers::ALLOW_CREDENTIALS), Some("false"));
}

#[test]
fn test_options_on_owned_path_skips_handlers() {
    let multi = MultiRouter::new("/api", vec![tagged("/users", "/:id", "users")]).unwrap();
    let res = options(&multi, "/api/users/anything/else", "https://x.com");
    assert_eq!(res.status, 200);
    assert!(res.body.is_empty());
}

#[test]
fn test_member_without_leading_slash_is_reachable() {
    let multi = MultiRouter::new("/api", vec![tagged("orders", "/:id", "order")]).unwrap();
    assert_eq!(multi.list_routes(), vec!["GET /api/orders/:id"]);
    let res = multi.dispatch(&HandlerRequest::new(Method::GET, "/api/orders/1"));
    assert_eq!(res.status, 200);
    assert_eq!(tag(&res).as_deref(), Some("order"));
}

#[test]
fn test_base_without_leading_slash_is_normalized() {
    let multi = MultiRouter::new("api", vec![tagged("/orders", "/:id", "order")]).unwrap();
    assert_eq!(multi.base_path(), "/api");
    let res = multi.dispatch(&HandlerRequest::new(Method::GET, "/api/orders/1"));
    assert_eq!(tag(&res).as_deref(), Some("order"));
}

#[test]
fn test_root_route_of_empty_base_member_serves_the_base() {
    let multi = MultiRouter::new("/api", vec![tagged("", "/", "index")]).unwrap();
    assert_eq!(multi.list_routes(), vec!["GET /api"]);
    let res = multi.dispatch(&HandlerRequest::new(Method::GET, "/api"));
    assert_eq!(res.status, 200);
    assert_eq!(tag(&res).as_deref(), Some("index"));
    let trailing = multi.dispatch(&HandlerRequest::new(Method::GET, "/api/"));
    assert_eq!(trailing.status, 404);
}
