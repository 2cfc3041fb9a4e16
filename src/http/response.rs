/// TLS details of an exchange that ran over HTTPS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSession {
    /// DER-encoded leaf certificate presented by the server.
    pub peer_certificate: Option<Vec<u8>>,
}

/// Everything observed about one HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedResponse {
    pub body: String,
    /// `"<code> <reason>"`, e.g. `200 OK`.
    pub status: String,
    pub status_code: u16,
    pub protocol: String,
    pub protocol_major: u8,
    pub protocol_minor: u8,
    /// `None` when the length is not known up front.
    pub content_length: Option<u64>,
    pub transfer_encoding: Vec<String>,
    /// The client decoded a compressed body on its own.
    pub uncompressed: bool,
    pub tls: Option<TlsSession>,
}

impl ObservedResponse {
    /// True when every field holds its zero value.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Protocol string plus major/minor version numbers.
pub fn protocol_parts(version: reqwest::Version) -> (&'static str, u8, u8) {
    match version {
        reqwest::Version::HTTP_09 => ("HTTP/0.9", 0, 9),
        reqwest::Version::HTTP_10 => ("HTTP/1.0", 1, 0),
        reqwest::Version::HTTP_2 => ("HTTP/2.0", 2, 0),
        reqwest::Version::HTTP_3 => ("HTTP/3.0", 3, 0),
        _ => ("HTTP/1.1", 1, 1),
    }
}
