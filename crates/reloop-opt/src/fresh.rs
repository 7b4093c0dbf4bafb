/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashSet;
use reloop_ast::{expr::Identifier, util::AstVisitor, Program};

///Generates `$<prefix><n>` names. Every draw increments the shared counter, so
/// `draw("i")` followed by `draw("len")` yields `$i1` and `$len2`.
#[derive(Debug, Default, Clone)]
pub struct FreshNames {
    counter: usize,
    reserved: AHashSet<String>,
}

///Collects every `$`-identifier of a program.
struct DollarNames<'a> {
    names: &'a mut AHashSet<String>,
}

impl AstVisitor for DollarNames<'_> {
    fn identifier(&mut self, ident: &Identifier) {
        if ident.name.starts_with('$') {
            self.names.insert(ident.name.clone());
        }
    }
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    ///Number of names drawn since the last reset.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    ///Makes sure `name` is never generated.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    ///Replaces all reserved names with the `$`-identifiers used in `program`.
    pub fn reserve_program(&mut self, program: &Program) {
        self.reserved.clear();
        program.traverse_visit(&mut DollarNames {
            names: &mut self.reserved,
        });
        if !self.reserved.is_empty() {
            log::debug!("reserved {} user names", self.reserved.len());
        }
    }

    pub fn draw(&mut self, prefix: &str) -> String {
        loop {
            self.counter += 1;
            let name = format!("${prefix}{}", self.counter);
            if !self.reserved.contains(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FreshNames;

    #[test]
    fn every_draw_counts() {
        let mut names = FreshNames::new();
        assert_eq!(names.draw("i"), "$i1");
        assert_eq!(names.draw("len"), "$len2");
        assert_eq!(names.draw("i"), "$i3");
        assert_eq!(names.counter(), 3);
    }

    #[test]
    fn reserved_names_are_skipped() {
        let mut names = FreshNames::new();
        names.reserve("$i1");
        assert_eq!(names.draw("i"), "$i2");
        assert_eq!(names.draw("len"), "$len3");
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut names = FreshNames::new();
        names.draw("i");
        names.reset_counter();
        assert_eq!(names.draw("i"), "$i1");
    }
}
