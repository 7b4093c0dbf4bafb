/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # Reloopc
//!
//! Ties together the parts of reloop into a single source-to-source pipeline.
//! Can either be used as a library, or via the CLI using the `reloop` binary.

use std::path::{Path, PathBuf};

use reloop_ast::{AstError, JsParser, Program};
use reloop_common::FileString;
use reloop_fmt::Rendered;
use reloop_opt::{Config, Optimizer};
use reloop_tree_sitter_parser::TreeSitterParser;

mod error;
pub use error::PipelineError;

pub use reloop_ast;
pub use reloop_fmt;
pub use reloop_opt;
pub use reloop_tree_sitter_parser;

///The result of running the pipeline on a single source.
#[derive(Debug)]
pub struct Output {
    ///The source file, if the input was read from disk.
    pub file: Option<PathBuf>,
    ///The program after all passes ran.
    pub program: Program,
    pub rendered: Rendered,
}

impl Output {
    pub fn text(&self) -> &str {
        &self.rendered.text
    }

    ///Reports every node that could not be rendered.
    pub fn report_diagnostics(&self) {
        for err in &self.rendered.errors {
            err.report();
        }
    }
}

///An executable source-to-source pipeline.
/// There are always three steps:
/// 1. parse the source into a [Program],
/// 2. (optional) rewrite forEach calls into indexed loops,
/// 3. render the program back to source.
///
/// The pipeline owns a single [Optimizer], so fresh loop variables are unique over all sources
/// it processes, unless [Config::counter_scope] says otherwise.
pub struct Pipeline {
    ///If false, the program is rendered as parsed.
    pub optimize: bool,
    ///Optimizer configuration. Read when the first source is optimized.
    pub opt_config: Config,
    optimizer: Option<Optimizer>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            optimize: true,
            opt_config: Config::default(),
            optimizer: None,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Pipeline {
            opt_config: config,
            ..Default::default()
        }
    }

    ///The optimizer all sources share. Created on first use.
    pub fn optimizer(&mut self) -> &mut Optimizer {
        let config = &self.opt_config;
        self.optimizer
            .get_or_insert_with(|| Optimizer::new(config.clone()))
    }

    ///Runs the passes on an already parsed program.
    pub fn execute_on_program(&mut self, mut program: Program, file: Option<PathBuf>) -> Output {
        if self.optimize {
            self.optimizer().optimize_program(&mut program);
        }

        let rendered = reloop_fmt::render(&program);
        if !rendered.is_complete() {
            log::warn!(
                "{} nodes could not be rendered{}",
                rendered.errors.len(),
                file.as_ref()
                    .map(|f| format!(" in {f:?}"))
                    .unwrap_or_default()
            );
        }

        Output {
            file,
            program,
            rendered,
        }
    }

    fn parse(&self, bytes: &[u8], source_name: Option<FileString>) -> Result<Program, PipelineError> {
        let display_name = source_name
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "<string>".to_owned());
        TreeSitterParser
            .parse_from_bytes(source_name, bytes)
            .map_err(|errors| {
                log::error!("There were {} errors while parsing {display_name}", errors.len());
                PipelineError::ParserErrors {
                    source_name: display_name,
                    errors: errors.into_iter().map(AstError::from_parser_error).collect(),
                }
            })
    }

    ///Parses `source`, and runs all passes.
    pub fn execute_on_string(&mut self, source: &str) -> Result<Output, PipelineError> {
        let program = self.parse(source.as_bytes(), None)?;
        Ok(self.execute_on_program(program, None))
    }

    ///Reads and parses `file`, then runs all passes.
    pub fn execute_on_file(&mut self, file: &dyn AsRef<Path>) -> Result<Output, PipelineError> {
        let file = file.as_ref();
        log::info!("processing {file:?}");
        let bytes = std::fs::read(file)?;
        let file_name: FileString = file.to_str().unwrap_or("NonUnicodeFilename").into();
        let program = self.parse(&bytes, Some(file_name))?;
        Ok(self.execute_on_program(program, Some(file.to_path_buf())))
    }

    ///Processes all `files` in order. A file that fails does not stop the batch.
    pub fn execute_on_files<P: AsRef<Path>>(
        &mut self,
        files: &[P],
    ) -> Vec<Result<Output, PipelineError>> {
        files
            .iter()
            .map(|file| self.execute_on_file(file))
            .collect()
    }
}
