/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! # Reloop-Opt
//!
//! The reloop optimizer.
//!
//! Currently knows a single rewrite: every `array.forEach(function(x){...})` in statement position is
//! replaced by an indexed `for` loop over `array`. The callback body becomes the loop body and is rewritten as
//! well, so nested calls are converted in the same pass.
//!
//! Loop variables are named `$i<n>` and `$len<n>`. The counter `n` lives in the [Optimizer], see
//! [Config] for its scope.

use reloop_ast::{
    expr::Expr,
    stmt::Stmt,
    util::AstTransformer,
    Program,
};

mod config;
pub mod foreach;
mod fresh;

pub use config::{Config, CounterScope};
pub use fresh::FreshNames;

///The optimizer. Keep a single instance around for a batch of files, so the fresh names stay unique.
#[derive(Debug, Default)]
pub struct Optimizer {
    config: Config,
    names: FreshNames,
    ///forEach calls converted so far.
    converted: usize,
}

impl Optimizer {
    pub fn new(config: Config) -> Self {
        Optimizer {
            config,
            names: FreshNames::new(),
            converted: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    ///Number of converted forEach calls, over all programs.
    pub fn converted(&self) -> usize {
        self.converted
    }

    pub fn optimize(&mut self, mut program: Program) -> Program {
        self.optimize_program(&mut program);
        program
    }

    pub fn optimize_program(&mut self, program: &mut Program) {
        if self.config.counter_scope == CounterScope::PerFile {
            self.names.reset_counter();
        }
        if self.config.reserve_user_names {
            self.names.reserve_program(program);
        }

        let before = self.converted;
        program.traverse_trans(self);
        log::info!("converted {} forEach calls", self.converted - before);
    }

    ///Rewrites a statement list without touching the counter scope or reserved names.
    pub fn optimize_stmts(&mut self, stmts: &mut [Stmt]) {
        for stmt in stmts.iter_mut() {
            stmt.traverse_trans(self);
        }
    }

    ///Replaces `stmt` with an indexed loop, if it is a forEach call.
    fn convert_stmt(&mut self, stmt: &mut Stmt) {
        let Stmt::Expression(expr_stmt) = stmt else {
            return;
        };
        let Expr::Call(call) = &mut expr_stmt.expression else {
            return;
        };
        let Some(parts) = foreach::take_for_each(call) else {
            return;
        };

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "converting forEach over {}",
                reloop_fmt::render_expr(&parts.receiver)
            );
        }

        let index = self.names.draw(&self.config.index_prefix);
        let length = self.names.draw(&self.config.length_prefix);
        self.converted += 1;
        *stmt = Stmt::For(foreach::build_indexed_loop(parts, &index, &length));
    }
}

impl AstTransformer for Optimizer {
    fn stmt(&mut self, stmt: &mut Stmt) {
        self.convert_stmt(stmt);
    }
}
