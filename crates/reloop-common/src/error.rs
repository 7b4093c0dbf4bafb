/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use std::{
    error::Error,
    fmt::{Debug, Display},
};

use ariadne::{Label, Report, ReportBuilder};
use backtrace::Backtrace;
use smallvec::{smallvec, SmallVec};

use crate::{report, Span};

///Starts an error report at `span`. Offsets are byte based, matching [Span::byte_start].
pub fn error_reporter<'a>(err: impl ToString, span: Span) -> ReportBuilder<'a, Span> {
    Report::build(
        ariadne::ReportKind::Error,
        std::path::Path::new(span.file.as_str()),
        span.byte_start,
    )
    .with_config(ariadne::Config::default().with_index_type(ariadne::IndexType::Byte))
    .with_message(err)
}

///Common error type for reloop crates. Allows you to build a base error from any
/// type `E: Error`. Once build, the error can be augmented with additional context that will be
/// printed when using [ReloopError::report].
///
/// You are encouraged to use [thiserror] to derive your `E` type, and use [ReloopError] only to embedded your error.
///
/// Set `RELOOP_BACKTRACE` to capture where the error was created.
pub struct ReloopError<E: Error> {
    pub error: E,
    pub source_span: Option<Span>,
    ///All labels that might be attached to the error.
    pub labels: SmallVec<[Label<Span>; 4]>,
    pub backtrace: Option<Backtrace>,
}

fn capture_backtrace() -> Option<Backtrace> {
    if std::env::var("RELOOP_BACKTRACE").is_ok() {
        Some(Backtrace::new())
    } else {
        None
    }
}

impl<E: Error> ReloopError<E> {
    pub fn new(error: E) -> Self {
        ReloopError {
            error,
            source_span: None,
            labels: SmallVec::new(),
            backtrace: capture_backtrace(),
        }
    }

    ///Creates an error that reports `message` at the given `span`.
    pub fn error_here(error: E, span: Span, message: impl ToString) -> Self {
        Self {
            error,
            source_span: Some(span.clone()),
            labels: smallvec![Label::new(span).with_message(message)],
            backtrace: capture_backtrace(),
        }
    }

    ///Reports the full error to stderr.
    pub fn report(&self) {
        let span = self.source_span.clone().unwrap_or_else(Span::empty);
        let has_source = span.get_file().is_some();
        let mut reporter = error_reporter(self.error.to_string(), span);
        //Without a file there is nothing to annotate, ariadne would only complain about the missing source.
        if has_source {
            reporter = reporter.with_labels(self.labels.clone());
        }
        report(reporter.finish());

        if let Some(bt) = &self.backtrace {
            eprintln!("Backtrace:\n{:?}", bt);
        }
    }
}

impl<E: Error> Debug for ReloopError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(src_span) = &self.source_span {
            if let Some(file) = src_span.get_file() {
                write!(
                    f,
                    "{} [{}:{}..{}:{}]: {}",
                    file,
                    src_span.from.0,
                    src_span.from.1,
                    src_span.to.0,
                    src_span.to.1,
                    self.error
                )
            } else {
                write!(
                    f,
                    "[{}:{}..{}:{}]: {}",
                    src_span.from.0, src_span.from.1, src_span.to.0, src_span.to.1, self.error
                )
            }
        } else {
            write!(f, "{}", self.error)
        }
    }
}

impl<E: Error> Display for ReloopError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl<E: Error> Error for ReloopError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use crate::{ReloopError, Span};

    #[derive(Debug, Error)]
    enum InnerError {
        #[error("inner failed")]
        Failed,
    }

    #[test]
    fn located_error_prints_its_position() {
        let mut span = Span::empty();
        span.from = (1, 2);
        span.to = (1, 5);
        let err = ReloopError::error_here(InnerError::Failed, span, "here");
        assert_eq!(err.labels.len(), 1);
        assert_eq!(format!("{err:?}"), "[1:2..1:5]: inner failed");
    }

    #[test]
    fn spanless_error_prints_message_only() {
        let err = ReloopError::new(InnerError::Failed);
        assert_eq!(err.to_string(), "inner failed");
    }
}
