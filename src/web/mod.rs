//! Embedded browser UI.
//!
//! The page is a single static file compiled into the binary, so the server
//! ships as one artifact with no asset directory to deploy next to it.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
