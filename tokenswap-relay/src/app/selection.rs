use crate::domain::token::{Token, DEFAULT_SOURCE_TOKEN, DEFAULT_TARGET_TOKEN, TOKENS};

/// Currently selected source/target token symbols. Each side's availability
/// list excludes the symbol chosen on the other side; the setters themselves
/// stay permissive (selection is a soft UI constraint, not a data invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSelection {
    source: String,
    target: String,
}

impl Default for TokenSelection {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_TOKEN.to_string(),
            target: DEFAULT_TARGET_TOKEN.to_string(),
        }
    }
}

impl TokenSelection {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_source(&mut self, symbol: impl Into<String>) {
        self.source = symbol.into();
    }

    pub fn set_target(&mut self, symbol: impl Into<String>) {
        self.target = symbol.into();
    }

    pub fn available_source_tokens(&self) -> Vec<&'static Token> {
        TOKENS.iter().filter(|t| t.symbol != self.target).collect()
    }

    pub fn available_target_tokens(&self) -> Vec<&'static Token> {
        TOKENS.iter().filter(|t| t.symbol != self.source).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = TokenSelection::default();
        assert_eq!(selection.source(), "USDC");
        assert_eq!(selection.target(), "ETH");
    }

    #[test]
    fn test_source_list_excludes_target() {
        let mut selection = TokenSelection::default();
        selection.set_target("WBTC");
        assert!(selection
            .available_source_tokens()
            .iter()
            .all(|t| t.symbol != "WBTC"));
    }

    #[test]
    fn test_target_list_excludes_source() {
        let mut selection = TokenSelection::default();
        selection.set_source("USDT");
        assert!(selection
            .available_target_tokens()
            .iter()
            .all(|t| t.symbol != "USDT"));
    }

    #[test]
    fn test_lists_keep_everything_else() {
        let selection = TokenSelection::default();
        assert_eq!(selection.available_source_tokens().len(), TOKENS.len() - 1);
        assert_eq!(selection.available_target_tokens().len(), TOKENS.len() - 1);
    }
}
