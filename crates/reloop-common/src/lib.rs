/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Common diagnosis helper. This is mostly Span of nodes, as well their reporting.

use std::path::Path;

use ariadne::{Cache, FileCache, Report};
use serde::{Deserialize, Serialize};
use smallstr::SmallString;

pub use ariadne;
pub use thiserror;

pub mod error;
pub use error::{error_reporter, ReloopError};

///Inline string for source file names. Most paths fit without allocating.
pub type FileString = SmallString<[u8; 32]>;

///Source-Code span information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub file: FileString,
    ///(row, column) of the first character, zero based.
    pub from: (usize, usize),
    ///(row, column) one past the last character, zero based.
    pub to: (usize, usize),
    pub byte_start: usize,
    pub byte_end: usize,
}

impl Span {
    pub fn empty() -> Self {
        Span {
            file: FileString::new(),
            from: (0, 0),
            to: (0, 0),
            byte_start: 0,
            byte_end: 0,
        }
    }

    pub fn with_file(mut self, file: &FileString) -> Self {
        self.file = file.clone();
        self
    }

    pub fn get_file(&self) -> Option<&str> {
        if self.file.is_empty() {
            None
        } else {
            Some(self.file.as_str())
        }
    }

    ///True for spans of synthesized nodes, that have no source location.
    pub fn is_empty(&self) -> bool {
        self.byte_start == self.byte_end && self.from == self.to
    }
}

impl<'a> From<&tree_sitter::Node<'a>> for Span {
    fn from(value: &tree_sitter::Node) -> Self {
        Span {
            file: FileString::new(),
            from: (value.start_position().row, value.start_position().column),
            to: (value.end_position().row, value.end_position().column),
            byte_start: value.start_byte(),
            byte_end: value.end_byte(),
        }
    }
}

impl ariadne::Span for Span {
    type SourceId = Path;
    fn source(&self) -> &Self::SourceId {
        Path::new(self.file.as_str())
    }
    fn start(&self) -> usize {
        self.byte_start
    }
    fn end(&self) -> usize {
        self.byte_end
    }
}

///Prints `report` to stderr. Sources are loaded from disk, based on the span's file.
pub fn report(report: Report<'_, Span>) {
    report_with_cache(report, FileCache::default())
}

///Prints `report` to stderr, using `cache` to resolve the source text.
pub fn report_with_cache(report: Report<'_, Span>, cache: impl Cache<Path>) {
    if let Err(e) = report.eprint(cache) {
        log::error!("Failed to print error report: {e}");
    }
}

#[cfg(test)]
mod tests {
    use crate::{FileString, Span};

    #[test]
    fn empty_span_has_no_file() {
        let span = Span::empty();
        assert!(span.is_empty());
        assert!(span.get_file().is_none());

        let with_file = span.with_file(&FileString::from("main.js"));
        assert_eq!(with_file.get_file(), Some("main.js"));
    }
}
