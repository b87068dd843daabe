pub use self::{
    error::{LexResult, LexicalError},
    position::Position,
    stream::TokenStream,
    token::Token,
};

use crate::{Automaton, Terminal};

use std::{collections::HashSet, io::Read, rc::Rc, sync::Arc};

use tracing::trace;

mod error;
mod position;
mod stream;
mod token;

/// Hook called for every token the lexer produces. It may rewrite the token
/// or drop it by returning `None`.
pub type TokenListener = dyn Fn(Token) -> Option<Token>;

/// Longest-match lexer over a set of [`Terminal`]s.
///
/// The automatons of all terminals run in lock-step from the current
/// position. The terminal matching the most characters wins; when several
/// match the same amount, the one with the highest priority wins and after
/// that the one registered first.
#[derive(Clone)]
pub struct Lexer {
    entries: Vec<Entry>,
    filtered: HashSet<Terminal>,
    listener: Option<Rc<TokenListener>>,
}

#[derive(Clone)]
struct Entry {
    terminal: Terminal,
    automaton: Arc<Automaton>,
    priority: i32,
}

impl Entry {
    fn new(terminal: Terminal) -> Self {
        Self {
            automaton: Arc::new(terminal.automaton()),
            priority: terminal.default_priority(),
            terminal,
        }
    }
}

impl Lexer {
    /// Creates a lexer recognizing `terminals`. Duplicates are ignored.
    pub fn new(terminals: impl IntoIterator<Item = Terminal>) -> Self {
        let mut lexer = Self {
            entries: Vec::new(),
            filtered: HashSet::new(),
            listener: None,
        };

        terminals.into_iter().for_each(|terminal| {
            lexer.entry_mut(terminal);
        });

        lexer
    }

    fn entry_mut(&mut self, terminal: Terminal) -> &mut Entry {
        let index = match self.entries.iter().position(|e| e.terminal == terminal) {
            Some(index) => index,
            None => {
                self.entries.push(Entry::new(terminal));
                self.entries.len() - 1
            }
        };

        &mut self.entries[index]
    }

    /// Terminals in registration order.
    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> + '_ {
        self.entries.iter().map(|e| &e.terminal)
    }

    /// Consumes `terminal` without emitting it. The terminal is registered
    /// if it is not known yet.
    pub fn filter_out(&mut self, terminal: Terminal) -> &mut Self {
        self.entry_mut(terminal.clone());
        self.filtered.insert(terminal);
        self
    }

    pub fn is_filtered(&self, terminal: &Terminal) -> bool {
        self.filtered.contains(terminal)
    }

    /// Overrides the priority of `terminal`, registering it if needed. The
    /// higher value wins ties on the match length.
    pub fn set_priority(&mut self, terminal: Terminal, priority: i32) -> &mut Self {
        self.entry_mut(terminal).priority = priority;
        self
    }

    pub fn priority(&self, terminal: &Terminal) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| &e.terminal == terminal)
            .map(|e| e.priority)
    }

    pub fn set_token_listener(
        &mut self,
        listener: impl Fn(Token) -> Option<Token> + 'static,
    ) -> &mut Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub(crate) fn notify(&self, token: Token) -> Option<Token> {
        match &self.listener {
            Some(listener) => listener(token),
            None => Some(token),
        }
    }

    /// Tokenizes the whole input. The last token is the EOF token.
    pub fn tokenize(&self, input: &str) -> LexResult<Vec<Token>> {
        self.iter(input).collect()
    }

    pub fn iter(&self, input: &str) -> TokenStream<'_> {
        TokenStream::new(self, input.chars().collect())
    }

    /// Reads `reader` to the end and returns a stream over its tokens.
    pub fn iter_reader(&self, mut reader: impl Read) -> std::io::Result<TokenStream<'_>> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(self.iter(&input))
    }

    /// Finds the terminal with the longest match at the start of `input`.
    /// A match always consumes at least one character.
    pub(crate) fn longest_match(&self, input: &[char]) -> Option<(&Terminal, usize)> {
        let mut candidates = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (index, entry.automaton.simulator()))
            .collect::<Vec<_>>();
        let mut best: Option<(usize, usize)> = None;

        for (offset, ch) in input.iter().enumerate() {
            candidates.retain_mut(|(index, sim)| {
                if !sim.feed(*ch) {
                    trace!(terminal = %self.entries[*index].terminal, offset, "candidate died");
                    return false;
                }

                if sim.is_accepting() && self.beats(*index, offset + 1, best) {
                    best = Some((*index, offset + 1));
                }

                true
            });

            if candidates.is_empty() {
                break;
            }
        }

        best.map(|(index, len)| (&self.entries[index].terminal, len))
    }

    fn beats(&self, candidate: usize, len: usize, best: Option<(usize, usize)>) -> bool {
        match best {
            None => true,
            Some((current, best_len)) => {
                len > best_len
                    || (len == best_len
                        && self.entries[candidate].priority > self.entries[current].priority)
            }
        }
    }
}

impl std::fmt::Debug for Lexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field(
                "terminals",
                &self
                    .entries
                    .iter()
                    .map(|e| (&e.terminal, e.priority))
                    .collect::<Vec<_>>(),
            )
            .field("filtered", &self.filtered)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
