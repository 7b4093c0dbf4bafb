/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use std::error::Error;

use reloop_common::ReloopError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AstError {
    #[error("{0}")]
    ParserError(String),
}

impl AstError {
    ///Wraps any parser error, keeping its span and labels.
    pub fn from_parser_error<E: Error>(err: ReloopError<E>) -> ReloopError<AstError> {
        ReloopError {
            error: AstError::ParserError(err.error.to_string()),
            source_span: err.source_span,
            labels: err.labels,
            backtrace: err.backtrace,
        }
    }
}
