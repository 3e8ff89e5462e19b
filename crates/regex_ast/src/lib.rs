//! Regex AST with Brzozowski derivatives and simplification (component A).

mod ast;
mod charset;
mod error;
mod parse;
mod trace;

pub use ast::{ClassMember, Regex};
pub use charset::Charset;
pub use error::RegexParseError;
pub use parse::parse_pattern;
pub use trace::{DerivationStep, DerivationTrace};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn matches(re: &Regex, w: &str) -> bool {
        let mut cur = re.clone();
        for c in w.chars() {
            cur = cur.derive(c);
        }
        cur.nullable()
    }

    #[test]
    fn derivative_soundness_examples() {
        let re = parse_pattern("(a|ab*)c", Charset::Ascii, &HashMap::new()).unwrap();
        for w in ["ac", "abc", "abbbc", "c", "a"] {
            let direct = matches(&re, w);
            let mut chars = w.chars();
            let first = chars.next();
            let rest: String = chars.collect();
            let via_derivative = if let Some(c) = first {
                matches(&re.derive(c), &rest)
            } else {
                re.nullable()
            };
            assert_eq!(direct, via_derivative, "mismatch for {:?}", w);
        }
    }

    #[test]
    fn simplify_preserves_language() {
        let re = Regex::union(Regex::literal('a'), Regex::concat(Regex::literal('a'), Regex::star(Regex::literal('b'))));
        let simplified = re.simplify();
        for w in ["a", "ab", "abb", "b"] {
            assert_eq!(matches(&re, w), matches(&simplified, w), "mismatch for {:?}", w);
        }
        // The union must NOT collapse to just `a` — `ab` must still match.
        assert!(matches(&simplified, "ab"));
    }

    #[test]
    fn empty_set_and_epsilon_identities() {
        assert_eq!(Regex::union(Regex::EmptySet, Regex::literal('a')).simplify(), Regex::literal('a'));
        assert_eq!(Regex::concat(Regex::EmptySet, Regex::literal('a')).simplify(), Regex::EmptySet);
        assert_eq!(Regex::concat(Regex::Epsilon, Regex::literal('a')).simplify(), Regex::literal('a'));
        assert_eq!(Regex::star(Regex::EmptySet).simplify(), Regex::Epsilon);
        assert_eq!(Regex::star(Regex::Epsilon).simplify(), Regex::Epsilon);
        let star_a = Regex::star(Regex::literal('a'));
        assert_eq!(Regex::star(star_a.clone()).simplify(), star_a);
    }

    #[test]
    fn nullable_matches_structure() {
        assert!(Regex::Epsilon.nullable());
        assert!(!Regex::EmptySet.nullable());
        assert!(!Regex::literal('x').nullable());
        assert!(Regex::star(Regex::literal('x')).nullable());
        assert!(Regex::union(Regex::literal('x'), Regex::Epsilon).nullable());
        assert!(!Regex::concat(Regex::literal('x'), Regex::Epsilon).nullable());
    }
}
