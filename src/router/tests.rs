//! Tests for the routing core.

#[cfg(test)]
mod router_tests {
    use std::str::FromStr;

    use serde_json::json;

    use crate::router::validator;
    use crate::router::{
        Action, Controller, Error, Method, Route, Router, SharedRouter, ValidationError,
    };
    use crate::template::{Error as TemplateError, PathArgs, PathTemplate};

    fn items_controller() -> Controller {
        Controller::new("items")
            .action(Action::new("index"))
            .action(Action::new("show").required("id"))
    }

    fn mounted_items() -> Router {
        let mut router = Router::new();
        router
            .mount(&items_controller(), Some("/items"), |_| Ok(()))
            .unwrap();
        router
    }

    #[test]
    fn test_rest_defaults() {
        let router = mounted_items();

        let found = router.find_route(Method::GET, "/items").unwrap();
        assert_eq!(found.route, Route::new("items", "index"));
        assert!(found.arguments.is_empty());

        let found = router.find_route(Method::GET, "/items/42").unwrap();
        assert_eq!(found.route, Route::new("items", "show"));
        assert_eq!(found.arguments["id"].as_deref(), Some("42"));
    }

    #[test]
    fn test_method_mismatch_reports_allowed_methods() {
        let router = mounted_items();

        assert!(router.find_route(Method::POST, "/items/42").is_none());
        assert_eq!(
            router.allowed_methods("/items/42").unwrap(),
            vec![Method::GET, Method::OPTIONS]
        );
        assert_eq!(router.allow_header("/items/42").unwrap(), "GET, OPTIONS");
    }

    #[test]
    fn test_unmatched_path_has_no_allowed_methods() {
        let router = mounted_items();
        assert!(router.find_route(Method::GET, "/nope").is_none());
        assert!(router.allowed_methods("/nope").is_none());
        assert!(router.allow_header("/nope").is_none());
    }

    #[test]
    fn test_full_rest_conventions() {
        let articles = Controller::new("articles")
            .action(Action::new("index"))
            .action(Action::new("create"))
            .action(Action::new("show").required("id"))
            .action(Action::new("update").required("id"))
            .action(Action::new("delete").required("id"));
        let mut router = Router::new();
        router.mount(&articles, None, |_| Ok(())).unwrap();

        for (method, path, action) in [
            (Method::GET, "/articles", "index"),
            (Method::POST, "/articles", "create"),
            (Method::GET, "/articles/9", "show"),
            (Method::PUT, "/articles/9", "update"),
            (Method::DELETE, "/articles/9", "delete"),
        ] {
            let found = router.find_route(method, path).unwrap();
            assert_eq!(found.route, Route::new("articles", action));
        }

        assert_eq!(
            router.allow_header("/articles/9").unwrap(),
            "GET, PUT, DELETE, OPTIONS"
        );
    }

    #[test]
    fn test_non_rest_action_defaults_to_get_with_action_path() {
        let site = Controller::new("site").action(Action::new("about"));
        let mut router = Router::new();
        router.mount(&site, None, |_| Ok(())).unwrap();

        let found = router.find_route(Method::GET, "/site/about").unwrap();
        assert_eq!(found.route, Route::new("site", "about"));
    }

    #[test]
    fn test_static_beats_argument_regardless_of_registration_order() {
        let users = Controller::new("users")
            .action(Action::new("show").required("id"))
            .action(Action::new("new"));

        // Argument route registered before the static one.
        let mut first = Router::new();
        first
            .mount(&users, None, |scope| {
                scope.get("/:id", "show")?;
                scope.get("/new", "new")
            })
            .unwrap();

        // Static route registered before the argument one.
        let mut second = Router::new();
        second
            .mount(&users, None, |scope| {
                scope.get("/new", "new")?;
                scope.get("/:id", "show")
            })
            .unwrap();

        for router in [&first, &second] {
            let found = router.find_route(Method::GET, "/users/new").unwrap();
            assert_eq!(found.route, Route::new("users", "new"));
            let found = router.find_route(Method::GET, "/users/7").unwrap();
            assert_eq!(found.route, Route::new("users", "show"));
        }
    }

    #[test]
    fn test_first_registered_argument_sibling_wins() {
        // Two required-argument children under the same node, from
        // separate mounts: registration order decides which one matches,
        // and the winner binds its own argument name.
        let alpha = Controller::new("alpha").action(Action::new("show").required("aid"));
        let beta = Controller::new("beta").action(Action::new("show").required("bid"));

        let mut router = Router::new();
        router
            .mount(&alpha, Some("/x"), |scope| scope.get("/:aid", "show"))
            .unwrap();
        router
            .mount(&beta, Some("/x"), |scope| scope.get("/:bid", "show"))
            .unwrap();

        let found = router.find_route(Method::GET, "/x/7").unwrap();
        assert_eq!(found.route, Route::new("alpha", "show"));
        assert_eq!(found.arguments["aid"].as_deref(), Some("7"));
        assert!(!found.arguments.contains_key("bid"));

        // Reversed registration flips the winner.
        let mut reversed = Router::new();
        reversed
            .mount(&beta, Some("/x"), |scope| scope.get("/:bid", "show"))
            .unwrap();
        reversed
            .mount(&alpha, Some("/x"), |scope| scope.get("/:aid", "show"))
            .unwrap();

        let found = reversed.find_route(Method::GET, "/x/7").unwrap();
        assert_eq!(found.route, Route::new("beta", "show"));
        assert_eq!(found.arguments["bid"].as_deref(), Some("7"));
    }

    #[test]
    fn test_optional_argument_skipping() {
        let docs = Controller::new("docs")
            .action(Action::new("page").optional("lang").optional("page"));
        let mut router = Router::new();
        router
            .mount(&docs, Some("/"), |scope| {
                scope.get("/:?lang/docs/:?page", "page")
            })
            .unwrap();

        let found = router.find_route(Method::GET, "/docs").unwrap();
        assert_eq!(found.arguments["lang"], None);
        assert_eq!(found.arguments["page"], None);

        let found = router.find_route(Method::GET, "/en/docs").unwrap();
        assert_eq!(found.arguments["lang"].as_deref(), Some("en"));
        assert_eq!(found.arguments["page"], None);

        let found = router.find_route(Method::GET, "/docs/3").unwrap();
        assert_eq!(found.arguments["lang"], None);
        assert_eq!(found.arguments["page"].as_deref(), Some("3"));

        let found = router.find_route(Method::GET, "/en/docs/3").unwrap();
        assert_eq!(found.arguments["lang"].as_deref(), Some("en"));
        assert_eq!(found.arguments["page"].as_deref(), Some("3"));
    }

    #[test]
    fn test_argument_names_matter_not_positions() {
        let test = Controller::new("test").action(
            Action::new("foo")
                .required("first")
                .required("second")
                .optional("third")
                .optional("fourth"),
        );
        let mut router = Router::new();
        router
            .mount(&test, None, |scope| {
                scope.get("/bar/:second/:first/:?third/:?fourth", "foo")
            })
            .unwrap();

        let found = router.find_route(Method::GET, "/test/bar/b/a/t").unwrap();
        assert_eq!(found.arguments["second"].as_deref(), Some("b"));
        assert_eq!(found.arguments["first"].as_deref(), Some("a"));
        assert_eq!(found.arguments["third"].as_deref(), Some("t"));
        assert_eq!(found.arguments["fourth"], None);
    }

    #[test]
    fn test_required_slot_for_declared_optional_parameter_fails() {
        let test = Controller::new("test").action(
            Action::new("foo")
                .required("first")
                .required("second")
                .optional("third"),
        );
        let mut router = Router::new();
        let result = router.mount(&test, None, |scope| {
            scope.get("/foo/:first/:second/:third", "foo")
        });

        assert!(matches!(
            result,
            Err(Error::InvalidRoute {
                source: ValidationError::ExtraRequired { ref names },
                ..
            }) if names == &["third".to_string()]
        ));
    }

    #[test]
    fn test_missing_required_parameter_fails_validation() {
        // `adapt` appends missing parameters, so this can only be hit by
        // validating a hand-built template.
        let action = Action::new("foo").required("first").required("second");
        let template = PathTemplate::parse("/foo/:first");
        let result = validator::validate(&template, &action);

        assert!(matches!(
            result,
            Err(ValidationError::MissingRequired { ref names })
                if names == &["second".to_string()]
        ));
    }

    #[test]
    fn test_extra_optional_argument_fails() {
        let test = Controller::new("test").action(Action::new("foo"));
        let mut router = Router::new();
        let result = router.mount(&test, None, |scope| scope.get("/foo/:?extra", "foo"));

        assert!(matches!(
            result,
            Err(Error::InvalidRoute {
                source: ValidationError::ExtraOptional { ref names },
                ..
            }) if names == &["extra".to_string()]
        ));
    }

    #[test]
    fn test_misordered_optionals_fail_at_mount() {
        let test = Controller::new("test")
            .action(Action::new("foo").optional("third").optional("fourth"));
        let mut router = Router::new();
        let result = router.mount(&test, None, |scope| {
            scope.get("/foo/:?fourth/:?third", "foo")
        });

        assert!(matches!(
            result,
            Err(Error::Template(TemplateError::ArgumentsOrder { .. }))
        ));
    }

    #[test]
    fn test_unknown_action_fails_at_mount() {
        let mut router = Router::new();
        let result = router.mount(&items_controller(), None, |scope| {
            scope.get("/missing", "missing")
        });

        assert!(matches!(
            result,
            Err(Error::UnknownAction { ref controller, ref action })
                if controller == "items" && action == "missing"
        ));
    }

    #[test]
    fn test_reregistration_overwrites_instead_of_duplicating() {
        let pages = Controller::new("pages").action(Action::new("show").required("id"));
        let mut router = Router::new();
        router
            .mount(&pages, None, |scope| scope.get("/view/:id", "show"))
            .unwrap();
        router
            .mount(&pages, None, |scope| scope.get("/p/:id", "show"))
            .unwrap();

        assert!(router.find_route(Method::GET, "/pages/view/9").is_none());
        let found = router.find_route(Method::GET, "/pages/p/9").unwrap();
        assert_eq!(found.route, Route::new("pages", "show"));

        let entries = router.routes();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/pages/p/:id");
        assert_eq!(router.path_of("pages", "show").unwrap().to_string(), "/pages/p/:id");
    }

    #[test]
    fn test_mounting_twice_is_idempotent() {
        let mut router = mounted_items();
        router
            .mount(&items_controller(), Some("/items"), |_| Ok(()))
            .unwrap();

        assert_eq!(router.routes().len(), 2);
        let found = router.find_route(Method::GET, "/items/42").unwrap();
        assert_eq!(found.route, Route::new("items", "show"));
    }

    #[test]
    fn test_nested_mounts_inherit_the_outer_prefix() {
        let comments = Controller::new("comments")
            .action(Action::new("index"))
            .action(Action::new("show").required("id"));
        let articles = Controller::new("articles").action(Action::new("index"));

        let mut router = Router::new();
        router
            .mount(&articles, Some("/articles"), |scope| {
                scope.mount(&comments, None, |_| Ok(()))
            })
            .unwrap();

        let found = router
            .find_route(Method::GET, "/articles/comments/3")
            .unwrap();
        assert_eq!(found.route, Route::new("comments", "show"));
        assert_eq!(found.arguments["id"].as_deref(), Some("3"));

        assert_eq!(
            router.path_of("comments", "index").unwrap().to_string(),
            "/articles/comments"
        );
    }

    #[test]
    fn test_sibling_mounts_deep_merge_under_a_shared_prefix() {
        let users = Controller::new("users").action(Action::new("show").required("id"));
        let posts = Controller::new("posts").action(Action::new("show").required("id"));

        let mut router = Router::new();
        router.mount(&users, Some("/api/users"), |_| Ok(())).unwrap();
        router.mount(&posts, Some("/api/posts"), |_| Ok(())).unwrap();

        let found = router.find_route(Method::GET, "/api/users/1").unwrap();
        assert_eq!(found.route, Route::new("users", "show"));
        let found = router.find_route(Method::GET, "/api/posts/2").unwrap();
        assert_eq!(found.route, Route::new("posts", "show"));
    }

    #[test]
    fn test_find_nearest_route() {
        let router = mounted_items();

        let nearest = router.find_nearest_route("/items/42/comments/9").unwrap();
        assert_eq!(*nearest, Route::new("items", "show"));

        let nearest = router.find_nearest_route("/items/oops/extra").unwrap();
        assert_eq!(*nearest, Route::new("items", "show"));

        assert!(Router::new().find_nearest_route("/anything").is_none());
    }

    #[test]
    fn test_path_to_and_reverse_errors() {
        let router = mounted_items();

        let mut args = PathArgs::new();
        args.insert("id".to_string(), Some("42".to_string()));
        assert_eq!(router.path_to("items", "show", &args).unwrap(), "/items/42");

        let result = router.path_to("items", "show", &PathArgs::new());
        assert!(matches!(
            result,
            Err(Error::Template(TemplateError::ArgumentNotAssigned { ref argument, .. }))
                if argument == "id"
        ));

        let result = router.path_to("items", "missing", &PathArgs::new());
        assert!(matches!(result, Err(Error::NoRoute { .. })));
    }

    #[test]
    fn test_arguments_are_percent_decoded() {
        let router = mounted_items();
        let found = router
            .find_route(Method::GET, "/items/hello+world%21")
            .unwrap();
        assert_eq!(found.arguments["id"].as_deref(), Some("hello world!"));
    }

    #[test]
    fn test_query_string_is_ignored_for_matching() {
        let router = mounted_items();
        let found = router.find_route(Method::GET, "/items/42?tab=history").unwrap();
        assert_eq!(found.arguments["id"].as_deref(), Some("42"));
    }

    #[test]
    fn test_route_listing_is_sorted_and_serializable() {
        let router = mounted_items();
        let entries = router.routes();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "/items");
        assert_eq!(entries[0].method, Method::GET);
        assert_eq!(entries[1].path, "/items/:id");

        assert_eq!(
            serde_json::to_value(&entries).unwrap(),
            json!([
                {
                    "method": "GET",
                    "path": "/items",
                    "controller": "items",
                    "action": "index"
                },
                {
                    "method": "GET",
                    "path": "/items/:id",
                    "controller": "items",
                    "action": "show"
                }
            ])
        );
    }

    #[test]
    fn test_shared_router_swaps_atomically() {
        let shared = SharedRouter::new(mounted_items());
        assert!(shared.load().find_route(Method::GET, "/items").is_some());

        shared.replace(Router::new());
        assert!(shared.load().find_route(Method::GET, "/items").is_none());
    }

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        assert_eq!(Method::from_str("get").unwrap(), Method::GET);
        assert_eq!(Method::from_str("Post").unwrap(), Method::POST);
        assert_eq!(Method::from_str("DELETE").unwrap(), Method::DELETE);
        assert!(matches!(
            Method::from_str("BREW"),
            Err(Error::InvalidMethod(ref m)) if m == "BREW"
        ));
    }

    #[test]
    fn test_method_display_and_ordering() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::OPTIONS.to_string(), "OPTIONS");
        assert!(Method::GET < Method::POST);
        assert!(Method::DELETE < Method::OPTIONS);
    }

    #[test]
    fn test_route_equality_is_structural() {
        assert_eq!(Route::new("items", "show"), Route::new("items", "show"));
        assert_ne!(Route::new("items", "show"), Route::new("items", "index"));
        assert_eq!(Route::new("items", "show").to_string(), "items#show");
    }
}
