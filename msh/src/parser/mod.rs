use msh_types::{MshError, MshResult};
use tracing::debug;

/// Split a line on space and newline characters, dropping empty fields.
/// Pure and restartable; metacharacters are recognized downstream and only
/// when they stand alone as a token.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split([' ', '\n']).filter(|t| !t.is_empty())
}

/// The resolved form of one input line, built fresh per prompt cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandPlan {
    pub argv: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

impl CommandPlan {
    /// Consume the token stream positionally. `>` and `<` take the next
    /// token as a path; `&` marks the command background and ends plan
    /// construction, discarding anything after it.
    pub fn parse(line: &str) -> MshResult<CommandPlan> {
        let mut plan = CommandPlan::default();
        let mut tokens = tokenize(line);

        while let Some(token) = tokens.next() {
            match token {
                ">" => {
                    let path = tokens
                        .next()
                        .ok_or(MshError::MissingRedirectTarget('>'))?;
                    plan.output = Some(path.to_string());
                }
                "<" => {
                    let path = tokens
                        .next()
                        .ok_or(MshError::MissingRedirectTarget('<'))?;
                    plan.input = Some(path.to_string());
                }
                "&" => {
                    plan.background = true;
                    break;
                }
                _ => plan.argv.push(token.to_string()),
            }
        }

        debug!("parsed plan: {:?}", plan);
        Ok(plan)
    }

    /// A blank line or a `#`-led first token produces no action.
    pub fn is_noop(&self) -> bool {
        match self.argv.first() {
            None => true,
            Some(first) => first.starts_with('#'),
        }
    }
}
