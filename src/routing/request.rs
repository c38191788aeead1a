//! Request and response shapes
//!
//! Requests arrive already parsed: a method, a path, query parameters and,
//! for POST, form data. Fronts may add `extras` before dispatch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// HTTP method of an inbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(format!("unsupported method '{other}'")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A parsed inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub method: Method,
    pub path: String,
    #[serde(default)]
    pub request_params: HashMap<String, String>,
    #[serde(default)]
    pub data: Option<HashMap<String, String>>,
    /// Values added by fronts
    #[serde(default)]
    pub extras: HashMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            data: Some(HashMap::new()),
            ..Self::default()
        }
    }

    /// Adds a query parameter
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.request_params.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a form field, creating the form if needed
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.request_params.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key).map(String::as_str)
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    /// Status line, for example `"200 OK"`
    pub fn line(self) -> &'static str {
        match self {
            Status::Ok => "200 OK",
            Status::BadRequest => "400 Bad Request",
            Status::NotFound => "404 Not Found",
            Status::InternalServerError => "500 Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.line())
    }
}

/// Status plus body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn new(status: Status, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Status::Ok, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert_eq!(Status::Ok.line(), "200 OK");
        assert_eq!(Status::NotFound.to_string(), "404 Not Found");
        assert_eq!(Status::InternalServerError.code(), 500);
    }

    #[test]
    fn test_request_builders() {
        let request = Request::post("/create-clinic/")
            .with_param("id", "3")
            .with_data("name", "City");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.param("id"), Some("3"));
        assert_eq!(request.field("name"), Some("City"));
        assert_eq!(request.field("missing"), None);
        assert_eq!(Request::get("/").field("name"), None);
    }

    #[test]
    fn test_request_from_json_line() {
        let request: Request =
            serde_json::from_str(r#"{"method":"POST","path":"/create-location/","data":{"name":"North"}}"#)
                .unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.field("name"), Some("North"));
        assert!(request.request_params.is_empty());

        let request: Request = serde_json::from_str(r#"{"path":"/about/"}"#).unwrap();
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert!("DELETE".parse::<Method>().is_err());
    }
}
