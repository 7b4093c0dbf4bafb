/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use thiserror::Error;

///Everything the renderer can't print. The offending subtree is rendered as an empty string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown node kind {kind}")]
    UnknownNodeKind { kind: String },
    #[error("Unknown member access kind {kind}")]
    UnknownAccessKind { kind: String },
    #[error("Unknown literal kind {kind}")]
    UnknownLiteralKind { kind: String },
}
