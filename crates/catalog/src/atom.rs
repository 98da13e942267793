//! Positions of literals and arguments within a rule.

use std::fmt;

/// Identifies one literal of a rule: which side it is on and its index there.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct AtomSignature {
    in_head: bool,
    index: usize,
}

impl AtomSignature {
    #[inline]
    pub fn head(index: usize) -> Self {
        Self {
            in_head: true,
            index,
        }
    }

    #[inline]
    pub fn body(index: usize) -> Self {
        Self {
            in_head: false,
            index,
        }
    }

    #[inline]
    pub fn in_head(&self) -> bool {
        self.in_head
    }

    /// Index within the head or the body.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for AtomSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // e.g. h0, b2
        write!(f, "{}{}", if self.in_head { "h" } else { "b" }, self.index)
    }
}

impl fmt::Debug for AtomSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A specific argument position within a literal.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct AtomArgumentSignature {
    atom_signature: AtomSignature,
    argument_id: usize,
}

impl AtomArgumentSignature {
    #[inline]
    pub fn new(atom_signature: AtomSignature, argument_id: usize) -> Self {
        Self {
            atom_signature,
            argument_id,
        }
    }

    #[inline]
    pub fn atom_signature(&self) -> &AtomSignature {
        &self.atom_signature
    }

    /// Index of the argument within the literal (zero-based).
    #[inline]
    pub fn argument_id(&self) -> usize {
        self.argument_id
    }
}

impl fmt::Display for AtomArgumentSignature {
    // e.g. b1.0
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.atom_signature, self.argument_id)
    }
}

impl fmt::Debug for AtomArgumentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
