#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;
pub mod store;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

/// Tracing target for token issuance and verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "surveyor_server::authentication";

/// Tracing target for authorization decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "surveyor_server::authorization";
