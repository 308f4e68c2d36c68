//! One blocking PrusaLink request over libcurl.
//!
//! Runs in the current thread; `PrinterClient` calls it from `spawn_blocking`.

use std::time::Duration;

use crate::retry::{CancelToken, RequestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Path part, used to label failures.
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Aborts the transfer from curl's progress callback once cancelled.
    pub cancel: Option<CancelToken>,
}

/// Perform the request and return the response body. Non-2xx statuses become
/// `RequestError::Http`; anything that prevents a response, including a
/// cancelled transfer, becomes `RequestError::Transport`.
pub fn perform(req: &Request) -> Result<Vec<u8>, RequestError> {
    let transport = |source: curl::Error| RequestError::Transport {
        endpoint: req.endpoint.clone(),
        source,
    };

    let mut body = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url).map_err(transport)?;
    match req.method {
        Method::Get => easy.get(true).map_err(transport)?,
        Method::Put | Method::Delete => easy
            .custom_request(req.method.as_str())
            .map_err(transport)?,
    }
    if req.cancel.is_some() {
        easy.progress(true).map_err(transport)?;
    }
    easy.connect_timeout(req.timeout.min(Duration::from_secs(15)))
        .map_err(transport)?;
    easy.timeout(req.timeout).map_err(transport)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("X-Api-Key: {}", req.api_key.trim()))
        .map_err(transport)?;
    list.append("Accept: application/json").map_err(transport)?;
    easy.http_headers(list).map_err(transport)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        if let Some(token) = &req.cancel {
            transfer
                .progress_function(|_, _, _, _| !token.is_cancelled())
                .map_err(transport)?;
        }
        transfer.perform().map_err(transport)?;
    }

    let status = easy.response_code().map_err(transport)?;
    tracing::debug!(
        method = req.method.as_str(),
        endpoint = %req.endpoint,
        status,
        "printer response"
    );
    if !(200..300).contains(&status) {
        return Err(RequestError::Http {
            status,
            endpoint: req.endpoint.clone(),
        });
    }
    Ok(body)
}
