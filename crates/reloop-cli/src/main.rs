/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # Reloop-cli
//!
//! CLI interface to `reloopc`

use clap::Parser;
use reloopc::{reloop_opt::CounterScope, Output, Pipeline};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(name = "reloop")]
#[command(
    version,
    about,
    long_about = "Rewrites `array.forEach(function(x){...})` into indexed for loops and prints the result."
)]
struct Args {
    ///only parses and re-renders the files, without rewriting forEach calls
    #[arg(long, default_value_t = false)]
    no_opt: bool,

    ///Restarts the loop variable numbering for every file.
    #[arg(long, default_value_t = false)]
    per_file_names: bool,

    ///Prints the (optimized) AST as an s-expression instead of source code.
    #[arg(long, default_value_t = false)]
    dump_ast: bool,

    ///The source files. Processed in order, output goes to stdout.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn emit(output: &Output, dump_ast: bool) -> bool {
    if dump_ast {
        match serde_lexpr::to_string(&output.program) {
            Ok(sexpr) => println!("{sexpr}"),
            Err(e) => {
                log::error!("Could not serialize AST: {e}");
                return false;
            }
        }
    } else {
        println!("{}", output.rendered);
    }
    output.report_diagnostics();
    true
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    //configure reloopc based on the args
    let mut pipeline = Pipeline::new();
    pipeline.optimize = !args.no_opt;
    if args.per_file_names {
        pipeline.opt_config.counter_scope = CounterScope::PerFile;
    }

    let mut all_ok = true;
    for file in &args.files {
        match pipeline.execute_on_file(file) {
            Ok(output) => all_ok &= emit(&output, args.dump_ast),
            Err(error) => {
                eprintln!("Could not process {file:?}");
                error.report();
                all_ok = false;
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
