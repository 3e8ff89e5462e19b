use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use regex_ast::{Charset, ClassMember, DerivationTrace, Regex};

use crate::error::{ConfigError, DfaBuildError};
use crate::lexeme::Lexeme;

/// DFA state identifiers are bounded by spec.md §4.B's 32,767 state cap.
pub type StateId = u16;

const MAX_STATES: usize = 32_767;

/// How the builder handles two lexemes that reduce to epsilon
/// simultaneously in the same state. `DeclarationOrder` (the default) lets
/// the earlier-declared lexeme win silently; `Strict` turns the same
/// situation into `DfaBuildError::AmbiguousLexeme`, per the "user's option"
/// clause in spec.md §4.B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    #[default]
    DeclarationOrder,
    Strict,
}

fn chars_in_charset(charset: Charset) -> impl Iterator<Item = char> {
    (0..=charset.max_code_point()).filter_map(char::from_u32)
}

fn collect_class_chars(charset: Charset, negated: bool, members: &[ClassMember], out: &mut HashSet<char>) {
    let mut member_chars: HashSet<char> = HashSet::new();
    for m in members {
        match *m {
            ClassMember::Literal(c) => {
                member_chars.insert(c);
            }
            ClassMember::Range(lo, hi) => {
                for cp in (lo as u32)..=(hi as u32) {
                    if let Some(c) = char::from_u32(cp) {
                        member_chars.insert(c);
                    }
                }
            }
        }
    }
    if negated {
        for c in chars_in_charset(charset) {
            if !member_chars.contains(&c) {
                out.insert(c);
            }
        }
    } else {
        out.extend(member_chars);
    }
}

fn collect_pattern_chars(pattern: &Regex, out: &mut HashSet<char>) {
    match pattern {
        Regex::Epsilon | Regex::EmptySet => {}
        Regex::Literal(c) => {
            out.insert(*c);
        }
        Regex::CharClass {
            charset,
            negated,
            members,
        } => collect_class_chars(*charset, *negated, members, out),
        Regex::AnyChar(charset) => out.extend(chars_in_charset(*charset)),
        Regex::Union(l, r) | Regex::Concat(l, r) => {
            collect_pattern_chars(l, out);
            collect_pattern_chars(r, out);
        }
        Regex::Star(inner) => collect_pattern_chars(inner, out),
    }
}

/// The input alphabet Σ: "the union of characters mentioned by any pattern
/// plus the ignored characters", per spec.md §4.B.
fn compute_alphabet(lexemes: &[Lexeme], ignored_chars: &HashSet<char>) -> BTreeSet<char> {
    let mut chars = HashSet::new();
    for lexeme in lexemes {
        collect_pattern_chars(lexeme.pattern(), &mut chars);
    }
    chars.extend(ignored_chars.iter().copied());
    chars.into_iter().collect()
}

/// A DFA state: the ordered tuple of `(lexeme index, derivative)` pairs
/// survivng from the initial state, per spec.md §3. Declaration order is
/// preserved by always walking `lexemes` in index order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DfaStateKey(Vec<(u32, Regex)>);

pub struct DfaBuilder {
    lexemes: Vec<Lexeme>,
    ignored_chars: HashSet<char>,
    ambiguity_policy: AmbiguityPolicy,
    debug: bool,
}

impl DfaBuilder {
    pub fn new(lexemes: Vec<Lexeme>, ignored_chars: HashSet<char>) -> Result<Self, ConfigError> {
        if lexemes.is_empty() {
            return Err(ConfigError::EmptyLexemeList);
        }
        let mut seen = HashSet::new();
        for lexeme in &lexemes {
            if !seen.insert(lexeme.name().to_string()) {
                return Err(ConfigError::DuplicateLexemeName(lexeme.name().to_string()));
            }
        }
        Ok(Self {
            lexemes,
            ignored_chars,
            ambiguity_policy: AmbiguityPolicy::default(),
            debug: false,
        })
    }

    pub fn with_ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity_policy = policy;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn initial_key(&self) -> DfaStateKey {
        DfaStateKey(
            self.lexemes
                .iter()
                .enumerate()
                .map(|(i, lexeme)| (i as u32, lexeme.pattern().clone()))
                .collect(),
        )
    }

    fn step_key(&self, key: &DfaStateKey, c: char, trace: Option<&mut DerivationTrace>) -> DfaStateKey {
        let mut next = Vec::with_capacity(key.0.len());
        let mut trace = trace;
        for (index, derivative) in &key.0 {
            let stepped = derivative.derive(c);
            if let Some(trace) = trace.as_deref_mut() {
                trace.record(derivative, c, &stepped);
            }
            if stepped != Regex::EmptySet {
                next.push((*index, stepped));
            }
        }
        DfaStateKey(next)
    }

    /// Returns the accepting lexeme index for `key`, if exactly one survivor
    /// derivative is epsilon, breaking ties by declaration order (the
    /// earliest-declared lexeme whose derivative is epsilon wins), per
    /// spec.md §4.B.
    fn accepting_lexeme(&self, key: &DfaStateKey) -> Result<Option<u32>, DfaBuildError> {
        let epsilon_indices: Vec<u32> = key
            .0
            .iter()
            .filter(|(_, d)| *d == Regex::Epsilon)
            .map(|(i, _)| *i)
            .collect();
        match epsilon_indices.len() {
            0 => Ok(None),
            1 => Ok(Some(epsilon_indices[0])),
            _ => {
                if self.ambiguity_policy == AmbiguityPolicy::Strict {
                    let names = epsilon_indices
                        .iter()
                        .map(|i| self.lexemes[*i as usize].name().to_string())
                        .collect();
                    Err(DfaBuildError::AmbiguousLexeme {
                        state_description: format!("{:?}", epsilon_indices),
                        lexemes: names,
                    })
                } else {
                    Ok(epsilon_indices.into_iter().min())
                }
            }
        }
    }

    pub fn build(self) -> Result<Dfa, DfaBuildError> {
        let alphabet = compute_alphabet(&self.lexemes, &self.ignored_chars);
        let initial_key = self.initial_key();

        let mut state_ids: HashMap<DfaStateKey, StateId> = HashMap::new();
        let mut queue: VecDeque<DfaStateKey> = VecDeque::new();
        state_ids.insert(initial_key.clone(), 0);
        queue.push_back(initial_key.clone());

        let mut transitions: HashMap<(StateId, char), StateId> = HashMap::new();
        let mut accepting: HashMap<StateId, String> = HashMap::new();
        let mut trace = if self.debug { Some(DerivationTrace::new()) } else { None };

        while let Some(key) = queue.pop_front() {
            let state_id = state_ids[&key];
            if let Some(lexeme_index) = self.accepting_lexeme(&key)? {
                accepting.insert(state_id, self.lexemes[lexeme_index as usize].name().to_string());
            }

            if state_id == 0 {
                for &c in &self.ignored_chars {
                    transitions.insert((0, c), 0);
                }
            }

            for &c in &alphabet {
                if state_id == 0 && self.ignored_chars.contains(&c) {
                    continue;
                }
                let next_key = self.step_key(&key, c, trace.as_mut());
                if next_key.0.is_empty() {
                    continue;
                }
                let next_id = if let Some(&id) = state_ids.get(&next_key) {
                    id
                } else {
                    let new_id = state_ids.len();
                    if new_id >= MAX_STATES {
                        return Err(DfaBuildError::TooManyStates(new_id + 1));
                    }
                    let new_id = new_id as StateId;
                    state_ids.insert(next_key.clone(), new_id);
                    queue.push_back(next_key.clone());
                    new_id
                };
                transitions.insert((state_id, c), next_id);
            }
        }

        Ok(Dfa {
            transitions,
            accepting,
            state_count: state_ids.len(),
            trace,
        })
    }
}

/// The frozen, read-only output of `DfaBuilder::build`: a transition table
/// keyed by `(state, character)`, plus per-state accept labels.
#[derive(Debug, Clone)]
pub struct Dfa {
    transitions: HashMap<(StateId, char), StateId>,
    accepting: HashMap<StateId, String>,
    state_count: usize,
    trace: Option<DerivationTrace>,
}

impl Dfa {
    pub const INITIAL: StateId = 0;

    pub fn transition(&self, state: StateId, c: char) -> Option<StateId> {
        self.transitions.get(&(state, c)).copied()
    }

    pub fn is_accepting(&self, state: StateId) -> Option<&str> {
        self.accepting.get(&state).map(|s| s.as_str())
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn trace(&self) -> Option<&DerivationTrace> {
        self.trace.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_ast::parse_pattern;
    use std::collections::HashMap as Map;

    fn lexeme(name: &str, pattern: &str) -> Lexeme {
        Lexeme::from_pattern_str(name, pattern, Charset::Ascii, &Map::new()).unwrap()
    }

    #[test]
    fn priority_tie_break() {
        let dfa = DfaBuilder::new(
            vec![lexeme("lex", "lexeme"), lexeme("id", "[a-zA-Z_]+")],
            HashSet::new(),
        )
        .unwrap()
        .build()
        .unwrap();

        let mut state = Dfa::INITIAL;
        for c in "lexeme".chars() {
            state = dfa.transition(state, c).unwrap();
        }
        assert_eq!(dfa.is_accepting(state), Some("lex"));
    }

    #[test]
    fn empty_lexeme_list_rejected() {
        assert_eq!(
            DfaBuilder::new(vec![], HashSet::new()).unwrap_err(),
            ConfigError::EmptyLexemeList
        );
    }

    #[test]
    fn ambiguous_lexeme_detected_in_strict_mode() {
        let result = DfaBuilder::new(vec![lexeme("a", "x"), lexeme("b", "x")], HashSet::new())
            .unwrap()
            .with_ambiguity_policy(AmbiguityPolicy::Strict)
            .build();
        assert!(matches!(result, Err(DfaBuildError::AmbiguousLexeme { .. })));
    }

    #[test]
    fn ignored_characters_self_loop_on_initial_state() {
        let mut ignored = HashSet::new();
        ignored.insert(' ');
        let dfa = DfaBuilder::new(vec![lexeme("id", "[a-z]+")], ignored)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(dfa.transition(Dfa::INITIAL, ' '), Some(Dfa::INITIAL));
    }

    #[test]
    fn parse_pattern_reexport_smoke() {
        assert!(parse_pattern("a", Charset::Ascii, &Map::new()).is_ok());
    }
}
