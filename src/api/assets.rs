use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "localpulse-ui/dist"]
struct Asset;

fn serve(path: &str, content: rust_embed::EmbeddedFile) -> axum::response::Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [(header::CONTENT_TYPE, mime.as_ref())],
        Body::from(content.data),
    )
        .into_response()
}

pub async fn serve_asset(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').trim_end_matches('/').to_string();

    if path.is_empty() {
        path = "index.html".to_string();
    }

    if let Some(content) = Asset::get(&path) {
        return serve(&path, content);
    }

    // Extensionless paths are pages: /dashboard -> dashboard/index.html
    if !path.contains('.') {
        let index = format!("{path}/index.html");
        if let Some(content) = Asset::get(&index) {
            return serve(&index, content);
        }

        if let Some(content) = Asset::get("index.html") {
            return serve("index.html", content);
        }
    }

    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}
