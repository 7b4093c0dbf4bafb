/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use reloop_ast::AstError;
use reloop_common::{
    thiserror::{self, Error},
    ReloopError,
};

///Everything that stops a single source from being processed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
    #[error("Parsing {source_name} failed with {} errors", .errors.len())]
    ParserErrors {
        source_name: String,
        errors: Vec<ReloopError<AstError>>,
    },
}

impl PipelineError {
    ///Prints the error to stderr. Parser errors are reported with their source annotations.
    pub fn report(&self) {
        log::error!("{self}");
        if let PipelineError::ParserErrors { errors, .. } = self {
            for err in errors {
                err.report();
            }
        }
    }
}
