use std::fmt;

use crate::charset::Charset;

/// A single member of a character class: either a literal character or an
/// inclusive range `lo..=hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMember {
    Literal(char),
    Range(char, char),
}

impl ClassMember {
    fn contains(self, c: char) -> bool {
        match self {
            ClassMember::Literal(l) => l == c,
            ClassMember::Range(lo, hi) => lo <= c && c <= hi,
        }
    }
}

impl fmt::Display for ClassMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassMember::Literal(c) => write!(f, "{}", c),
            ClassMember::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

/// The regex AST: a tagged union over the node kinds spec.md §3 names.
/// Equality is syntactic/structural — it is what `simplify`'s
/// syntactic-equality rewrites (`x ∪ x ⇒ x`) compare against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    Epsilon,
    EmptySet,
    Literal(char),
    CharClass {
        charset: Charset,
        negated: bool,
        members: Vec<ClassMember>,
    },
    AnyChar(Charset),
    Union(Box<Regex>, Box<Regex>),
    Concat(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    pub fn epsilon() -> Regex {
        Regex::Epsilon
    }

    pub fn empty_set() -> Regex {
        Regex::EmptySet
    }

    pub fn literal(c: char) -> Regex {
        Regex::Literal(c)
    }

    pub fn any_char(charset: Charset) -> Regex {
        Regex::AnyChar(charset)
    }

    pub fn char_class(charset: Charset, negated: bool, members: Vec<ClassMember>) -> Regex {
        Regex::CharClass {
            charset,
            negated,
            members,
        }
    }

    pub fn union(l: Regex, r: Regex) -> Regex {
        Regex::Union(Box::new(l), Box::new(r))
    }

    pub fn concat(l: Regex, r: Regex) -> Regex {
        Regex::Concat(Box::new(l), Box::new(r))
    }

    pub fn star(inner: Regex) -> Regex {
        Regex::Star(Box::new(inner))
    }

    pub fn plus(inner: Regex) -> Regex {
        Regex::concat(inner.clone(), Regex::star(inner))
    }

    pub fn optional(inner: Regex) -> Regex {
        Regex::union(inner, Regex::Epsilon)
    }

    /// `contains-epsilon`: a pure function of structure, per spec.md §3.
    pub fn nullable(&self) -> bool {
        match self {
            Regex::Epsilon => true,
            Regex::EmptySet => false,
            Regex::Literal(_) => false,
            Regex::CharClass { .. } => false,
            Regex::AnyChar(_) => false,
            Regex::Union(l, r) => l.nullable() || r.nullable(),
            Regex::Concat(l, r) => l.nullable() && r.nullable(),
            Regex::Star(_) => true,
        }
    }

    fn class_matches(charset: Charset, negated: bool, members: &[ClassMember], c: char) -> bool {
        if !charset.contains(c) {
            return false;
        }
        let in_members = members.iter().any(|m| m.contains(c));
        in_members != negated
    }

    /// The Brzozowski derivative `δ_c(self)`, per spec.md §4.A. The result is
    /// always run through `simplify` before being handed back, matching the
    /// engine's stated contract ("after each derive the engine applies
    /// simplify").
    pub fn derive(&self, c: char) -> Regex {
        self.derive_raw(c).simplify()
    }

    fn derive_raw(&self, c: char) -> Regex {
        match self {
            Regex::Epsilon => Regex::EmptySet,
            Regex::EmptySet => Regex::EmptySet,
            Regex::Literal(a) => {
                if *a == c {
                    Regex::Epsilon
                } else {
                    Regex::EmptySet
                }
            }
            Regex::CharClass {
                charset,
                negated,
                members,
            } => {
                if Regex::class_matches(*charset, *negated, members, c) {
                    Regex::Epsilon
                } else {
                    Regex::EmptySet
                }
            }
            Regex::AnyChar(charset) => {
                if charset.contains(c) {
                    Regex::Epsilon
                } else {
                    Regex::EmptySet
                }
            }
            Regex::Union(l, r) => Regex::union(l.derive_raw(c), r.derive_raw(c)),
            Regex::Concat(l, r) => {
                let d_l = l.derive_raw(c);
                if !l.nullable() {
                    Regex::concat(d_l, (**r).clone())
                } else {
                    Regex::union(Regex::concat(d_l, (**r).clone()), r.derive_raw(c))
                }
            }
            Regex::Star(inner) => {
                let d_inner = inner.derive_raw(c);
                if d_inner == Regex::EmptySet {
                    Regex::EmptySet
                } else {
                    Regex::concat(d_inner, Regex::Star(inner.clone()))
                }
            }
        }
    }

    /// Idempotent rewrite that preserves the language of `self`. Deliberately
    /// does *not* collapse an epsilon branch into a nullable sibling
    /// (`a | a b*` must keep both alternatives) — see spec.md §4.A.
    pub fn simplify(&self) -> Regex {
        match self {
            Regex::Union(l, r) => {
                let l = l.simplify();
                let r = r.simplify();
                match (&l, &r) {
                    (Regex::EmptySet, _) => r,
                    (_, Regex::EmptySet) => l,
                    _ if l == r => l,
                    _ => Regex::union(l, r),
                }
            }
            Regex::Concat(l, r) => {
                let l = l.simplify();
                let r = r.simplify();
                match (&l, &r) {
                    (Regex::EmptySet, _) | (_, Regex::EmptySet) => Regex::EmptySet,
                    (Regex::Epsilon, _) => r,
                    (_, Regex::Epsilon) => l,
                    _ => Regex::concat(l, r),
                }
            }
            Regex::Star(inner) => {
                let inner = inner.simplify();
                match &inner {
                    Regex::EmptySet => Regex::Epsilon,
                    Regex::Epsilon => Regex::Epsilon,
                    Regex::Star(grand_child) => Regex::Star(grand_child.clone()),
                    _ => Regex::Star(Box::new(inner)),
                }
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "ε"),
            Regex::EmptySet => write!(f, "∅"),
            Regex::Literal(c) => write!(f, "{}", c),
            Regex::CharClass {
                negated, members, ..
            } => {
                write!(f, "[{}", if *negated { "^" } else { "" })?;
                for m in members {
                    write!(f, "{}", m)?;
                }
                write!(f, "]")
            }
            Regex::AnyChar(_) => write!(f, "."),
            Regex::Union(l, r) => write!(f, "({}|{})", l, r),
            Regex::Concat(l, r) => write!(f, "({}{})", l, r),
            Regex::Star(inner) => write!(f, "({})*", inner),
        }
    }
}
