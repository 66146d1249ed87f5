use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::models::NewsPostInput;

/// Post fields from either an HTML form or a JSON body
#[derive(Debug)]
pub struct PostPayload(pub NewsPostInput);

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| {
            content_type
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        })
}

impl<S> FromRequest<S> for PostPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(input) = Json::<NewsPostInput>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(PostPayload(input))
        } else {
            let Form(input) = Form::<NewsPostInput>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(PostPayload(input))
        }
    }
}
