use log::info;
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Catcher, Request, Route, State,
};

use crate::{
    config::Config,
    error::{ErrorBody, Result},
    model::api::auth::{AuthToken, SessionFailure, SessionRequest, AUTH_TOKEN_COOKIE},
};

pub fn routes() -> Vec<Route> {
    routes![open_session, close_session]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![unauthenticated]
}

/// Session guard failures never reach a handler, so report them here in the
/// same shape as every other error.
#[catch(401)]
fn unauthenticated(req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "Unauthenticated".to_string(),
        message: SessionFailure::of(req)
            .unwrap_or_else(|| "Unauthenticated: no session".to_string()),
    })
}

#[post("/auth/session", data = "<request>", format = "json")]
pub async fn open_session(
    cookies: &CookieJar<'_>,
    request: Json<SessionRequest>,
    config: &State<Config>,
) -> Result<()> {
    let identity = request.0.authenticate(config)?;
    info!("Opened session for {identity}");

    let token = AuthToken::new(identity);
    cookies.add(token.into_cookie(config)?);

    Ok(())
}

#[delete("/auth")]
pub fn close_session(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}

#[cfg(test)]
mod tests {
    use rocket::{http::ContentType, local::asynchronous::Client, serde::json::serde_json::json};

    use super::*;

    #[backend_test]
    async fn admin_session_valid(client: Client) {
        let response = client
            .post(uri!(open_session))
            .header(ContentType::JSON)
            .body(json!(SessionRequest::example_admin()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let cookie = client.cookies().get(AUTH_TOKEN_COOKIE).cloned().unwrap();
        let config = client.rocket().state::<Config>().unwrap();
        assert_eq!(
            AuthToken::from_cookie(&cookie, config).unwrap(),
            AuthToken::example_admin()
        );
    }

    #[backend_test]
    async fn admin_session_invalid(client: Client) {
        // Missing password.
        let response = client
            .post(uri!(open_session))
            .header(ContentType::JSON)
            .body(json!(SessionRequest::example_admin_without_password()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
        let body = response.into_json::<ErrorBody>().await.unwrap();
        assert_eq!(body.error, "Unauthenticated");

        // Wrong password.
        let response = client
            .post(uri!(open_session))
            .header(ContentType::JSON)
            .body(json!(SessionRequest::example_admin_wrong_password()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
    }

    #[backend_test]
    async fn voter_session(client: Client) {
        let response = client
            .post(uri!(open_session))
            .header(ContentType::JSON)
            .body(json!(SessionRequest::example_voter()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());
    }

    #[backend_test(admin)]
    async fn admin_attribute_opens_admin_session(client: Client) {
        let cookie = client.cookies().get(AUTH_TOKEN_COOKIE).cloned().unwrap();
        let config = client.rocket().state::<Config>().unwrap();
        assert_eq!(
            AuthToken::from_cookie(&cookie, config).unwrap(),
            AuthToken::example_admin()
        );
    }

    #[backend_test]
    async fn forged_session_rejected_as_json(client: Client) {
        let response = client
            .post("/courses")
            .header(ContentType::JSON)
            .cookie(Cookie::new(AUTH_TOKEN_COOKIE, "not.a.token"))
            .body(json!({ "course_code": "CSE101", "session": "Fall", "year": 2023 }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(Some(ContentType::JSON), response.content_type());
        let body = response.into_json::<ErrorBody>().await.unwrap();
        assert_eq!(body.error, "Unauthenticated");
    }

    #[backend_test(voter)]
    async fn close(client: Client) {
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());

        let response = client.delete(uri!(close_session)).dispatch().await;

        assert_eq!(Status::Ok, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
    }
}
