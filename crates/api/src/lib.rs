//! Transport-facing service contracts.
//!
//! Requests and responses carry only primitive fields so that any transport
//! (gRPC, HTTP/JSON, CLI) can map onto them. Entity audit timestamps are
//! exposed as `chrono` values; an absent deletion timestamp is omitted from
//! serialized output.

pub mod v1;
