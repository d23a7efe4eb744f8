#![forbid(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # outcomes
//!
//! Fallible computations as values. An [`Outcome`] is either a `Success` or a
//! `Failure`; failures travel through combinators as data instead of
//! unwinding the stack.
//!
//! ## Features
//!
//! - **One algebra, two shapes**: every combinator works on immediate
//!   outcomes and on [`Deferred`] ones. The result is deferred only when
//!   something in the chain actually is.
//! - **Combinators** `map`, `map_error`, `and_then`, `and_through`, `or_else`,
//!   `or_through`, `inspect`, `inspect_error`, `bind`
//! - **Aggregation** over `Vec`, `BTreeMap` and `HashMap`: fail-fast
//!   [`sequence`] or exhaustive [`collect`]
//! - **Boundary adapters** for code that returns `Result` ([`attempt`]),
//!   tower services ([`service::AttemptLayer`]) and validators ([`parse()`])
//! - **JSON Schema** validation behind the default `json` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use outcomes::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! enum ConfigError {
//!     BadPort(String),
//!     Privileged(u16),
//! }
//!
//! let read_port = attempt(|raw: &str| raw.parse::<u16>())
//!     .catch(|e: std::num::ParseIntError| ConfigError::BadPort(e.to_string()))
//!     .into_fn();
//!
//! let port = read_port("8080").and_through(|port| {
//!     if *port < 1024 { fail(ConfigError::Privileged(*port)) } else { succeed(()) }
//! });
//! assert_eq!(port, succeed(8080));
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! // A deferred stage makes the rest of the chain deferred.
//! let later = read_port("80")
//!     .and_then(|port| Deferred::new(async move { succeed(port) }))
//!     .and_through(|port| {
//!         if *port < 1024 { fail(ConfigError::Privileged(*port)) } else { succeed(()) }
//!     });
//! assert_eq!(later.await, fail(ConfigError::Privileged(80)));
//! # });
//! ```

pub mod aggregate;
pub mod boundary;
pub mod combinators;
pub mod completion;
pub mod deferred;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod outcome;
pub mod parse;
pub mod pipe;
pub mod prelude;
pub mod record;
pub mod service;
pub mod unwrap;

// Re-exports
pub use aggregate::{collect, collect_with, combine, sequence, sequence_with, Container};
pub use boundary::{attempt, Attempt};
pub use completion::{Completion, Effect, Step};
pub use deferred::Deferred;
pub use error::{ContractViolation, SchemaError};
#[cfg(feature = "json")]
pub use json::{is_result, JsonSchema};
pub use outcome::{begin, fail, is_failure, is_success, succeed, Outcome};
pub use parse::{parse, parser, Issue, Schema, Validation};
pub use pipe::Pipe;
pub use record::Record;
pub use unwrap::{
    assert_failure, assert_success, unwrap, unwrap_error, unwrap_error_or, unwrap_or,
    unwrap_or_else,
};
