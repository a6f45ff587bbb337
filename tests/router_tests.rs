use http::Method;
use restroute::dispatcher::{Dispatch, HandlerRequest, HandlerResponse, ResponseBody};
use restroute::router::Router;
use restroute::RouteContext;
use serde_json::json;

fn user_router() -> Router {
    let mut router = Router::new("/users");
    router.handle_func(Method::GET, "/", |_req, res, _ctx| {
        res.set_json(200, json!({ "users": [] }));
    });
    router.handle_func(Method::GET, "/:id", |_req, res, ctx| {
        let id = ctx.params().get("id").unwrap_or_default();
        res.set_json(200, json!({ "id": id }));
    });
    router.handle_func(
        Method::GET,
        "/:id/posts/:post_id",
        |_req, res, ctx: &mut RouteContext| {
            let user = ctx.params().require("id").unwrap_or_default().to_string();
            let post = ctx.params().require("post_id").unwrap_or_default().to_string();
            res.set_json(200, json!({ "user": user, "post": post }));
        },
    );
    router
}

fn body(res: &HandlerResponse) -> serde_json::Value {
    match &res.body {
        ResponseBody::Json(v) => v.clone(),
        other => panic!("expected json body, got {:?}", other),
    }
}

#[test]
fn test_get_user_by_id() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/users/42"));
    assert_eq!(res.status, 200);
    assert_eq!(body(&res)["id"], "42");
}

#[test]
fn test_unregistered_method_is_404() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::DELETE, "/users/42"));
    assert_eq!(res.status, 404);
    assert_eq!(body(&res)["error"], "Not Found");
}

#[test]
fn test_root_route_matches_base_path() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/users"));
    assert_eq!(res.status, 200);
    assert_eq!(body(&res), json!({ "users": [] }));
}

#[test]
fn test_nested_params() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/users/7/posts/abc"));
    assert_eq!(res.status, 200);
    assert_eq!(body(&res), json!({ "user": "7", "post": "abc" }));
}

#[test]
fn test_query_string_is_not_part_of_the_path() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/users/42?expand=true"));
    assert_eq!(res.status, 200);
    assert_eq!(body(&res)["id"], "42");
}

#[test]
fn test_unknown_path_is_404() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/accounts/1"));
    assert_eq!(res.status, 404);
}

#[test]
fn test_registration_order_decides_overlap() {
    let mut router = Router::new("/items");
    router.handle_func(Method::GET, "/special", |_req, res, _ctx| {
        res.set_json(200, json!("special"));
    });
    router.handle_func(Method::GET, "/:id", |_req, res, _ctx| {
        res.set_json(200, json!("by-id"));
    });
    let res = router.dispatch(&HandlerRequest::new(Method::GET, "/items/special"));
    assert_eq!(body(&res), json!("special"));
    let res = router.dispatch(&HandlerRequest::new(Method::GET, "/items/other"));
    assert_eq!(body(&res), json!("by-id"));
}

#[test]
fn test_request_body_round_trip_through_handler() {
    let mut router = Router::new("/echo");
    router.handle_func(Method::POST, "/", |req, res, _ctx| {
        match req.read_json::<serde_json::Value>() {
            Ok(v) => res.set_json(201, v),
            Err(e) => res.set_error(400, &e.to_string()),
        }
    });
    let ok = router.dispatch(
        &HandlerRequest::new(Method::POST, "/echo").with_body(r#"{"a":1}"#),
    );
    assert_eq!(ok.status, 201);
    assert_eq!(body(&ok)["a"], 1);

    let bad = router.dispatch(&HandlerRequest::new(Method::POST, "/echo").with_body("{"));
    assert_eq!(bad.status, 400);
}

#[test]
fn test_custom_data_is_fresh_per_request() {
    let mut router = Router::new("");
    router.handle_func(Method::GET, "/count", |_req, res, ctx| {
        let seen = ctx.custom_data().contains("seen");
        ctx.custom_data_mut().set("seen", true);
        res.set_json(200, json!({ "seen_before": seen }));
    });
    for _ in 0..2 {
        let res = router.dispatch(&HandlerRequest::new(Method::GET, "/count"));
        assert_eq!(body(&res)["seen_before"], false);
    }
}

#[test]
fn test_into_http_response() {
    let res = user_router().dispatch(&HandlerRequest::new(Method::GET, "/users/42"));
    let http_res = res.into_http().unwrap();
    assert_eq!(http_res.status(), 200);
    assert_eq!(
        http_res.headers().get("content-type").unwrap(),
        "application/json"
    );
    let decoded: serde_json::Value = serde_json::from_slice(http_res.body()).unwrap();
    assert_eq!(decoded["id"], "42");
}
