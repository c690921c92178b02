use std::sync::Arc;

use common_framework::{Error, Result};
use lexer_framework::Cursor;

use crate::ast::{NamedProduction, Production};
use crate::environment::Environment;
use crate::result::{Match, ParseResult, Reject};
use crate::traits::{ParsingRule, Parselet};

struct ProductionRef {
    name: Arc<str>,
}

impl ParsingRule for ProductionRef {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let Some(result) = env.apply(&self.name, cursor) else {
            return Err(Reject::new(
                cursor.clone(),
                format!("production `{}` does not exist", self.name),
            ));
        };
        let found = result?;
        let node = NamedProduction::new(self.name.clone(), found.node);
        Ok(Match::new(found.cursor, Production::Named(node)))
    }

    fn describe(&self) -> String {
        format!("<{}>", self.name)
    }
}

/// A reference to the production called `name`, resolved when the rule is
/// applied. Results are memoized per parse.
///
/// Referencing a name the grammar never defines is not an error here; such a
/// reference rejects when it is reached.
pub fn production(name: &str) -> Result<Parselet> {
    if name.is_empty() {
        return Err(Error::construction("production name must not be empty"));
    }
    Ok(Parselet::new(ProductionRef {
        name: Arc::from(name),
    }))
}
