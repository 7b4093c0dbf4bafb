/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Config options for the optimizer

///How long the fresh-name counter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterScope {
    ///One counter for everything an [Optimizer](crate::Optimizer) sees.
    #[default]
    Batch,
    ///The counter restarts for every program.
    PerFile,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub counter_scope: CounterScope,
    ///Prefix of the loop index, `i` yields `$i1`.
    pub index_prefix: String,
    ///Prefix of the cached array length, `len` yields `$len2`.
    pub length_prefix: String,
    ///If true, `$`-identifiers already used by the program are never generated.
    pub reserve_user_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            counter_scope: CounterScope::default(),
            index_prefix: "i".to_owned(),
            length_prefix: "len".to_owned(),
            reserve_user_names: true,
        }
    }
}
