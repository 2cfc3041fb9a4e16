use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, TRANSFER_ENCODING};
use reqwest::tls::TlsInfo;
use reqwest::{Client, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::http::response::{ObservedResponse, TlsSession, protocol_parts};
use crate::testing::{CaseDefinition, ResultRecord};

/// Build the client used for every case of a run.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .no_gzip()
        .tls_info(true)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Client)
}

/// Issue `case` against `base_url` and capture the response.
///
/// Any failure leaves nothing behind: no record is produced and the error
/// is returned to the caller.
pub async fn execute(client: &Client, base_url: &str, case: &CaseDefinition) -> Result<ResultRecord> {
    let raw_url = format!("{base_url}{}", case.target());
    let url = Url::parse(&raw_url).map_err(|e| Error::InvalidUrl {
        url: raw_url.clone(),
        reason: e.to_string(),
    })?;

    let mut req_builder = client.request(case.method.into(), url);
    req_builder = apply_headers(req_builder, case)?;

    if let Some(body) = &case.body {
        if !case.method.sends_body() {
            debug!(id = %case.id, method = %case.method, "attaching a body to a method that usually has none");
        }
        req_builder = req_builder.body(serde_json::to_vec(body)?);
    }

    debug!(id = %case.id, method = %case.method, url = %raw_url, "executing case");

    let started = Instant::now();
    let response = req_builder.send().await.map_err(|source| {
        warn!(id = %case.id, url = %raw_url, error = %source, "request failed");
        Error::Transport {
            url: raw_url.clone(),
            source,
        }
    })?;
    let elapsed = started.elapsed();

    let observed = observe(response)
        .await
        .map_err(|source| Error::ReadResponse { url: raw_url, source })?;

    debug!(
        id = %case.id,
        status = observed.status_code,
        elapsed_ms = elapsed.as_millis() as u64,
        "case completed"
    );

    Ok(ResultRecord::new(case.clone(), observed, elapsed))
}

fn apply_headers(mut req_builder: RequestBuilder, case: &CaseDefinition) -> Result<RequestBuilder> {
    let mut headers = HeaderMap::new();

    if !case.body_type.is_empty() {
        let value = HeaderValue::from_str(&case.body_type).map_err(|e| Error::InvalidHeader {
            name: CONTENT_TYPE.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(CONTENT_TYPE, value);
    }

    for (key, value) in &case.headers {
        if key.trim().is_empty() {
            return Err(Error::InvalidHeader {
                name: key.clone(),
                reason: "header key is empty".to_string(),
            });
        }

        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    req_builder = req_builder.headers(headers);
    Ok(req_builder)
}

async fn observe(response: Response) -> std::result::Result<ObservedResponse, reqwest::Error> {
    let status = response.status();
    let (protocol, protocol_major, protocol_minor) = protocol_parts(response.version());
    let content_length = response.content_length();
    let transfer_encoding = transfer_encodings(response.headers());
    let tls = response.extensions().get::<TlsInfo>().map(|info| TlsSession {
        peer_certificate: info.peer_certificate().map(<[u8]>::to_vec),
    });

    let bytes = response.bytes().await?;

    Ok(ObservedResponse {
        body: String::from_utf8_lossy(&bytes).into_owned(),
        status: format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
        status_code: status.as_u16(),
        protocol: protocol.to_string(),
        protocol_major,
        protocol_minor,
        content_length,
        transfer_encoding,
        // Compression is never negotiated by the client.
        uncompressed: false,
        tls,
    })
}

fn transfer_encodings(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(TRANSFER_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|coding| coding.trim().to_string())
        .filter(|coding| !coding.is_empty())
        .collect()
}
