use super::{PatternRoute, RequestContext, Route, RouteData, RouteError, RouteValues, RouteTable};
use crate::server::{Response, RouteRequest};
use http::Method;
use std::sync::Arc;

fn ctx() -> RequestContext {
    RequestContext::new(RouteRequest::get("/").unwrap(), RouteData::default())
}

fn values(pairs: &[(&str, &str)]) -> RouteValues {
    pairs.iter().copied().collect()
}

fn matched(pattern: &str, target: &str) -> Option<RouteValues> {
    let route = Arc::new(PatternRoute::new(pattern).unwrap());
    route
        .match_request(&RouteRequest::get(target).unwrap())
        .map(|data| data.values)
}

#[test]
fn test_root_path() {
    assert_eq!(matched("/", "/"), Some(RouteValues::new()));
    assert!(matched("/", "/x").is_none());
}

#[test]
fn test_parameterized_path() {
    assert_eq!(matched("/items/{id}", "/items/123"), Some(values(&[("id", "123")])));
    assert_eq!(matched("/items/{id}", "/items/123/"), Some(values(&[("id", "123")])));
    assert!(matched("/items/{id}", "/items").is_none());
    assert!(matched("/items/{id}", "/items/1/2").is_none());
}

#[test]
fn test_nested_path() {
    assert_eq!(matched("/a/{b}/c", "/a/1/c"), Some(values(&[("b", "1")])));
    assert!(matched("/a/{b}/c", "/a/1/d").is_none());
}

#[test]
fn test_literal_segments_are_escaped() {
    assert!(matched("/v1.0/items", "/v1.0/items").is_some());
    assert!(matched("/v1.0/items", "/v1x0/items").is_none());
}

#[test]
fn test_malformed_patterns_are_rejected() {
    for pattern in ["/items/{}", "/items/pre{id}", "/items/{a}{b}"] {
        let err = PatternRoute::new(pattern).unwrap_err();
        assert!(
            matches!(err, RouteError::InvalidPattern { .. }),
            "expected InvalidPattern for {pattern}"
        );
    }
}

#[test]
fn test_match_captures_and_decodes_values() {
    let route = Arc::new(PatternRoute::new("/users/{name}").unwrap());
    let req = RouteRequest::get("/users/j%C3%BCrgen").unwrap();
    let data = route.match_request(&req).unwrap();
    assert_eq!(data.values, values(&[("name", "jürgen")]));
    assert!(data.handler.is_none());
}

#[test]
fn test_match_respects_method() {
    let route = Arc::new(PatternRoute::new("/items").unwrap().with_method(Method::POST));
    assert!(Arc::clone(&route)
        .match_request(&RouteRequest::get("/items").unwrap())
        .is_none());
    assert!(route
        .match_request(&RouteRequest::new(Method::POST, "/items").unwrap())
        .is_some());
}

#[test]
fn test_match_seeds_defaults() {
    let route = Arc::new(
        PatternRoute::new("/docs/{page}")
            .unwrap()
            .with_defaults([("lang", "en"), ("page", "index")]),
    );
    let data = route
        .match_request(&RouteRequest::get("/docs/intro").unwrap())
        .unwrap();
    assert_eq!(data.values, values(&[("lang", "en"), ("page", "intro")]));
}

#[test]
fn test_virtual_path_substitutes_values() {
    let route = PatternRoute::new("/{locale}/items/{id}").unwrap();
    let vp = route
        .virtual_path(&ctx(), &values(&[("locale", "en"), ("id", "7")]))
        .unwrap();
    assert_eq!(vp.as_str(), "en/items/7");
}

#[test]
fn test_virtual_path_missing_or_empty_value() {
    let route = PatternRoute::new("/{category}/items").unwrap();
    assert!(route.virtual_path(&ctx(), &RouteValues::new()).is_none());
    assert!(route
        .virtual_path(&ctx(), &values(&[("category", "")]))
        .is_none());
}

#[test]
fn test_virtual_path_uses_defaults_and_encodes() {
    let route = PatternRoute::new("/search/{q}/{page}")
        .unwrap()
        .with_defaults([("page", "1")]);
    let vp = route
        .virtual_path(&ctx(), &values(&[("q", "a b/c")]))
        .unwrap();
    assert_eq!(vp.as_str(), "search/a%20b%2Fc/1");
}

#[test]
fn test_empty_value_falls_back_to_default() {
    let route = PatternRoute::new("/{locale}/items/{id}")
        .unwrap()
        .with_defaults([("locale", "en")]);
    let vp = route
        .virtual_path(&ctx(), &values(&[("locale", ""), ("id", "7")]))
        .unwrap();
    assert_eq!(vp.as_str(), "en/items/7");

    let empty_default = PatternRoute::new("/{locale}/items")
        .unwrap()
        .with_defaults([("locale", "")]);
    assert!(empty_default.virtual_path(&ctx(), &RouteValues::new()).is_none());
}

#[test]
fn test_root_virtual_path_is_empty() {
    let route = PatternRoute::new("/").unwrap();
    assert_eq!(route.virtual_path(&ctx(), &RouteValues::new()).unwrap().as_str(), "");
}

#[test]
fn test_table_first_match_wins() {
    let mut table = RouteTable::new();
    table.map_route("specific", Arc::new(PatternRoute::new("/items/new").unwrap()));
    table.map_route(
        "generic",
        Arc::new(
            PatternRoute::new("/items/{id}")
                .unwrap()
                .with_defaults([("kind", "generic")]),
        ),
    );
    let data = table
        .match_request(&RouteRequest::get("/items/new").unwrap())
        .unwrap();
    assert!(data.values.is_empty());

    let data = table
        .match_request(&RouteRequest::get("/items/5").unwrap())
        .unwrap();
    assert_eq!(data.values.get("kind"), Some("generic"));
    assert_eq!(table.len(), 2);
    assert!(table.route("generic").is_some());
    assert!(table.route("missing").is_none());
}

#[test]
fn test_dispatch_runs_handler_action() {
    let handler = Arc::new(|ctx: &RequestContext| {
        let id = ctx.route_data.values.get("id").unwrap_or("").to_string();
        Box::new(move |_: &RequestContext, res: &mut Response| {
            res.set_status(200);
            res.body = Some(format!("item {id}"));
        }) as Box<dyn super::Action>
    });
    let mut table = RouteTable::new();
    table.add(Arc::new(
        PatternRoute::new("/items/{id}").unwrap().with_handler(handler),
    ));

    let res = table.dispatch(RouteRequest::get("/items/9").unwrap());
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_deref(), Some("item 9"));
}

#[test]
fn test_dispatch_without_match_or_handler_is_404() {
    let mut table = RouteTable::new();
    table.add(Arc::new(PatternRoute::new("/items/{id}").unwrap()));

    let res = table.dispatch(RouteRequest::get("/nothing").unwrap());
    assert_eq!(res.status, 404);

    let res = table.dispatch(RouteRequest::get("/items/1").unwrap());
    assert_eq!(res.status, 404);
    assert!(res.location().is_none());
}
