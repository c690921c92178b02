use common_framework::Result;
use lexer_framework::LexRule;
use parser_framework::{Parselet, Production};
use pipeline_core::{CombinatorSpec, Parser};
use tracing::debug;

/// Grammar text plus the ignorable patterns the compiled parser should use.
#[derive(Debug, Clone, Default)]
pub struct TextSpec {
    pub text: String,
    pub ignore: Vec<LexRule>,
}

impl TextSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore: Vec::new(),
        }
    }

    pub fn ignore(mut self, rule: impl Into<LexRule>) -> Self {
        self.ignore.push(rule.into());
        self
    }

    pub fn ignore_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.ignore(LexRule::pattern(pattern)?))
    }
}

impl From<&str> for TextSpec {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextSpec {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A grammar notation: a parser for the notation itself and a visitor that
/// folds its parse trees into parselets.
pub trait Notation {
    /// Name used in diagnostics.
    const NAME: &'static str;
    /// Meta-grammar production that parses a whole grammar.
    const GRAMMAR: &'static str;
    /// Meta-grammar production that parses a single expression.
    const FRAGMENT: &'static str;

    fn meta_parser() -> Result<Parser>;

    /// Folds the tree of a whole grammar into production rules.
    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec>;

    /// Folds the tree of a single expression into one parselet.
    fn fold_fragment(tree: &Production) -> Result<Parselet>;
}

/// Compiles grammar text written in notation `N` into a parser.
pub fn compile<N: Notation>(spec: TextSpec) -> Result<Parser> {
    let tree = N::meta_parser()?.parse_all(N::GRAMMAR, &spec.text)?;
    let compiled = N::fold_grammar(&tree)?;
    debug!(
        notation = N::NAME,
        productions = ?compiled.production_names().collect::<Vec<_>>(),
        "compiled grammar"
    );
    compiled.ignore_all(spec.ignore).build()
}

/// Compiles one expression written in notation `N` into a standalone parselet.
pub fn compile_fragment<N: Notation>(text: &str) -> Result<Parselet> {
    let tree = N::meta_parser()?.parse_all(N::FRAGMENT, text)?;
    N::fold_fragment(&tree)
}
