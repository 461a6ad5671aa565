pub mod home;
pub mod members;

pub use home::*;
pub use members::*;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::graph::Distance;

fn render<T: Template>(template: T) -> Result<Response, StatusCode> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn number_label(distance: Option<Distance>) -> String {
    match distance {
        Some(Distance::Finite(n)) => n.to_string(),
        _ => "∞".to_string(),
    }
}
