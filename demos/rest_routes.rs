//! Mounts a small controller tree and walks through forward and reverse
//! lookups.
//!
//! Run with `RUST_LOG=debug cargo run --example rest_routes` to see the
//! registration log.

use routrie::{Action, Controller, Method, PathArgs, Router, RouterError};

fn main() -> Result<(), RouterError> {
    env_logger::init();

    let comments = Controller::new("comments")
        .action(Action::new("index"))
        .action(Action::new("show").required("id"));

    let articles = Controller::new("articles")
        .action(Action::new("index"))
        .action(Action::new("create"))
        .action(Action::new("show").required("id").optional("format"));

    let mut router = Router::new();
    router.mount(&articles, Some("/articles"), |scope| {
        scope.mount(&comments, None, |_| Ok(()))
    })?;

    println!("route table:");
    println!(
        "{}",
        serde_json::to_string_pretty(&router.routes()).expect("route listing serializes")
    );

    let requests = [
        (Method::GET, "/articles"),
        (Method::GET, "/articles/17/pdf"),
        (Method::GET, "/articles/comments/3"),
        (Method::PUT, "/articles/17"),
        (Method::GET, "/nowhere"),
    ];
    for (method, path) in requests {
        match router.find_route(method, path) {
            Some(found) => println!("{method} {path} -> {} {:?}", found.route, found.arguments),
            None => match router.allow_header(path) {
                Some(allow) => println!("{method} {path} -> 405, Allow: {allow}"),
                None => println!("{method} {path} -> 404"),
            },
        }
    }

    let mut args = PathArgs::new();
    args.insert("id".to_string(), Some("17".to_string()));
    println!(
        "path to articles#show: {}",
        router.path_to("articles", "show", &args)?
    );

    Ok(())
}
