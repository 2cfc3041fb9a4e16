//! HTTP plumbing: methods, query strings, the client that executes cases and
//! the response shape it records.

pub mod client;
pub mod method;
pub mod query;
pub mod response;
