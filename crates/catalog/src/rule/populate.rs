//! Rule metadata population operations.

use super::RuleCatalog;
use crate::atom::{AtomArgumentSignature, AtomSignature};
use model::{Literal, Term};

/// Internal API for populating all metadata fields given a validated rule.
impl RuleCatalog {
    pub(crate) fn populate_all_metadata(&mut self) {
        // 1. Signature fingerprints per side, for the predicate prefilter
        self.populate_fingerprints();

        // 2. Every position of every variable, body before head
        self.populate_variable_occurrences();
    }

    fn populate_fingerprints(&mut self) {
        fn fingerprints(literals: &[Literal]) -> Vec<u64> {
            literals
                .iter()
                .map(|l| l.signature().fingerprint())
                .collect()
        }

        self.body_fingerprints = fingerprints(self.rule.body());
        self.head_fingerprints = fingerprints(self.rule.head());
        self.body_fingerprint_set = self.body_fingerprints.iter().copied().collect();
        self.head_fingerprint_set = self.head_fingerprints.iter().copied().collect();
    }

    fn populate_variable_occurrences(&mut self) {
        let sides = [(false, self.rule.body()), (true, self.rule.head())];
        for (in_head, literals) in sides {
            for (index, literal) in literals.iter().enumerate() {
                let atom = if in_head {
                    AtomSignature::head(index)
                } else {
                    AtomSignature::body(index)
                };
                for (argument_id, term) in literal.arguments().iter().enumerate() {
                    if let Term::Variable(var) = term {
                        self.variable_occurrences
                            .entry(var.clone())
                            .or_default()
                            .push(AtomArgumentSignature::new(atom, argument_id));
                    }
                }
            }
        }
    }
}
