//! Mock server for the Kstar portal API
use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use reqwest::Url;
use serde_json::{Value, json};
use std::time::Duration;

/// `Basic base64("kstar:kstarSecret")`
pub const CLIENT_BASIC_AUTH: &str = "Basic a3N0YXI6a3N0YXJTZWNyZXQ=";

pub struct KstarMockServer {
    pub server: MockServer,
}

#[allow(dead_code)]
impl KstarMockServer {
    /// Create and start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start_async().await;
        Self { server }
    }

    /// Get url
    pub fn url(&self) -> Url {
        let url = self.server.base_url();
        Url::parse(&url).expect("cannot parse url")
    }

    /// Get station id
    pub fn station_id(&self) -> String {
        String::from("1746580391")
    }

    /// Sample station detail payload
    pub fn station_data() -> Value {
        json!({
            "stationId": "1746580391",
            "stationName": "Home Roof",
            "realPower": "1234.5",
            "dayGeneration": "8.6",
            "monthGeneration": "212.4",
            "yearGeneration": "1830.2",
            "totalGeneration": "5120.9",
            "dayEarn": "3.44",
            "totalEarn": "2048.36",
            "co2": 2041.7,
            "coal": 2048.4,
            "forest": "111.6"
        })
    }

    /// Mock token refresh success
    pub async fn mock_token_refresh_ok<'a>(
        &'a self,
        refresh_token: &str,
        access_token: &str,
        rotated_refresh_token: Option<&str>,
    ) -> Mock<'a> {
        let mut body = json!({
            "value": access_token,
            "tokenType": "bearer",
            "expiresIn": 43199,
            "scope": "server"
        });
        if let Some(rotated) = rotated_refresh_token {
            body["refreshToken"] = json!({ "value": rotated, "expiration": "2099-01-01 00:00:00" });
        }
        self.server
            .mock_async(move |when, then| {
                when.method(POST)
                    .path("/prod-api/oauth/token")
                    .header("authorization", CLIENT_BASIC_AUTH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(format!(
                        "grant_type=refresh_token&refresh_token={refresh_token}"
                    ));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
            .await
    }

    /// Mock token refresh answered without an access token
    pub async fn mock_token_refresh_rejected<'a>(&'a self, refresh_token: &str) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(POST)
                    .path("/prod-api/oauth/token")
                    .body(format!(
                        "grant_type=refresh_token&refresh_token={refresh_token}"
                    ));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "error": "invalid_grant",
                        "error_description": format!("Invalid refresh token: {refresh_token}")
                    }));
            })
            .await
    }

    /// Mock token refresh with a 401 status
    pub async fn mock_token_refresh_unauthorized<'a>(&'a self) -> Mock<'a> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path("/prod-api/oauth/token");
                then.status(401)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "error": "invalid_token",
                        "error_description": "Refresh token expired"
                    }));
            })
            .await
    }

    /// Mock login success
    pub async fn mock_login_ok<'a>(
        &'a self,
        username: &str,
        password: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(POST)
                    .path("/prod-api/oauth/login")
                    .header("authorization", CLIENT_BASIC_AUTH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(format!("username={username}&password={password}"));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "code": 200,
                        "msg": "success",
                        "token": {
                            "access_token": access_token,
                            "refresh_token": refresh_token,
                            "token_type": "bearer",
                            "expires_in": 43199
                        }
                    }));
            })
            .await
    }

    /// Mock login with wrong credentials
    pub async fn mock_login_rejected<'a>(&'a self) -> Mock<'a> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path("/prod-api/oauth/login");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "code": 500, "msg": "Bad credentials" }));
            })
            .await
    }

    /// Mock station detail success for a bearer token
    pub async fn mock_station_ok<'a>(&'a self, access_token: &str) -> Mock<'a> {
        let station_id = self.station_id();
        self.server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/prod-api/station/detail/earn")
                    .query_param("stationId", station_id)
                    .header("authorization", format!("bearer {access_token}"));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "code": 200,
                        "message": "success",
                        "data": Self::station_data()
                    }));
            })
            .await
    }

    /// Mock station detail rejecting a bearer token
    pub async fn mock_station_unauthorized<'a>(&'a self, access_token: &str) -> Mock<'a> {
        let station_id = self.station_id();
        self.server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/prod-api/station/detail/earn")
                    .query_param("stationId", station_id)
                    .header("authorization", format!("bearer {access_token}"));
                then.status(401)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "error": "invalid_token",
                        "error_description": format!("Invalid access token: {access_token}")
                    }));
            })
            .await
    }

    /// Mock station detail with a body-level error code
    pub async fn mock_station_api_error<'a>(
        &'a self,
        code: i64,
        message: &str,
    ) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(GET).path("/prod-api/station/detail/earn");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "code": code, "message": message }));
            })
            .await
    }

    /// Mock station detail with a body-level error code and a malformed `data` field
    pub async fn mock_station_api_error_with_data<'a>(
        &'a self,
        code: i64,
        message: &str,
        data: Value,
    ) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(GET).path("/prod-api/station/detail/earn");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "code": code, "message": message, "data": data }));
            })
            .await
    }

    /// Mock station detail forbidding a bearer token
    pub async fn mock_station_forbidden<'a>(&'a self, access_token: &str) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/prod-api/station/detail/earn")
                    .header("authorization", format!("bearer {access_token}"));
                then.status(403).body("Forbidden");
            })
            .await
    }

    /// Mock station detail not found
    pub async fn mock_station_not_found<'a>(&'a self) -> Mock<'a> {
        self.server
            .mock_async(|when, then| {
                when.method(GET).path("/prod-api/station/detail/earn");
                then.status(404).body("Not Found");
            })
            .await
    }

    /// Mock station detail with a server error
    pub async fn mock_station_server_error<'a>(&'a self) -> Mock<'a> {
        self.server
            .mock_async(|when, then| {
                when.method(GET).path("/prod-api/station/detail/earn");
                then.status(500)
                    .header("content-type", "text/html")
                    .body("Internal Server Error");
            })
            .await
    }

    /// Mock station detail answering after `delay`
    pub async fn mock_station_slow<'a>(&'a self, delay: Duration) -> Mock<'a> {
        self.server
            .mock_async(move |when, then| {
                when.method(GET).path("/prod-api/station/detail/earn");
                then.status(200)
                    .delay(delay)
                    .header("content-type", "application/json")
                    .json_body(json!({ "code": 200, "data": Self::station_data() }));
            })
            .await
    }
}
