//! `request` command: one request from flags

use super::{parse_key_value, resolve_config, EXIT_CONFIG, EXIT_CONNECTION, EXIT_OK, EXIT_REQUEST_FAILED};
use crate::core::site::Site;
use crate::routing::{Method, Request, Response, Status};
use clap::Args;
use std::path::Path;

/// Arguments for the request command
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET or POST)
    #[arg(short, long, default_value = "GET")]
    pub method: Method,

    /// Route path, for example /clinics-list/
    #[arg(short, long)]
    pub path: String,

    /// Query parameter as KEY=VALUE; repeatable
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Form field as KEY=VALUE; repeatable
    #[arg(long = "data", value_parser = parse_key_value)]
    pub data: Vec<(String, String)>,
}

impl RequestArgs {
    /// The request described by the flags
    pub fn to_request(&self) -> Request {
        let mut request = match self.method {
            Method::Get => Request::get(self.path.as_str()),
            Method::Post => Request::post(self.path.as_str()),
        };
        for (key, value) in &self.params {
            request = request.with_param(key, value);
        }
        for (key, value) in &self.data {
            request = request.with_data(key, value);
        }
        request
    }

    /// Execute the request command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let site = match Site::from_config(&config).await {
            Ok(site) => site,
            Err(e) => {
                println!("Failed to start the site");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        let request = self.to_request();
        tracing::info!(method = %request.method, path = %request.path, "Dispatching request");
        let response = site.handle(request).await;
        print_response(&response);

        Ok(if response.status == Status::Ok {
            EXIT_OK
        } else {
            EXIT_REQUEST_FAILED
        })
    }
}

/// Prints the status line, then the body
pub fn print_response(response: &Response) {
    println!("{}", response.status.line());
    println!("{}", response.body);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(method: Method, path: &str) -> RequestArgs {
        RequestArgs {
            method,
            path: path.to_string(),
            params: Vec::new(),
            data: Vec::new(),
        }
    }

    #[test]
    fn test_get_request_has_no_form() {
        let mut args = args(Method::Get, "/clinics-list/");
        args.params.push(("id".to_string(), "2".to_string()));
        let request = args.to_request();
        assert_eq!(request.param("id"), Some("2"));
        assert!(request.data.is_none());
    }

    #[test]
    fn test_post_request_always_has_form() {
        let request = args(Method::Post, "/create-patient/").to_request();
        assert_eq!(request.method, Method::Post);
        assert!(request.data.is_some());
    }

    #[tokio::test]
    async fn test_execute_with_missing_config() {
        let code = args(Method::Get, "/")
            .execute(Some(Path::new("/no/such/polyclinic.toml")))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
