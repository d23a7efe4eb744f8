//! Convenient re-exports for everyday use.
pub use crate::{
    aggregate::{collect, collect_with, combine, sequence, sequence_with},
    boundary::attempt,
    completion::{Completion, Effect},
    deferred::Deferred,
    outcome::{begin, fail, is_failure, is_success, succeed, Outcome},
    parse::{parse, parser, Issue, Schema},
    pipe,
    pipe::Pipe,
    unwrap::{
        assert_failure, assert_success, unwrap, unwrap_error, unwrap_error_or, unwrap_or,
        unwrap_or_else,
    },
};
