//! # Worker Module
//!
//! Off-thread execution of the report pipeline behind a request/reply
//! channel keyed by [`RequestId`].

pub mod host;
pub mod messages;

pub use host::{run_job, AsyncComputeHost, CancelToken};
pub use messages::{RequestId, WorkerRequest, WorkerResponse};
