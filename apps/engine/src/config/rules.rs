use crate::config::{opt_var, parse_var};
use crate::domain::dealing::DeckVariant;
use crate::domain::rules::MATCH_TARGET;
use crate::domain::scoring::ScoringTable;
use crate::error::AppError;

/// Rule knobs that vary between table revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesConfig {
    pub deck: DeckVariant,
    pub scoring: ScoringTable,
    pub match_target: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            deck: DeckVariant::Full,
            scoring: ScoringTable::STANDARD,
            match_target: MATCH_TARGET,
        }
    }
}

impl RulesConfig {
    /// Defaults overridden by `RACE_DECK_VARIANT`, `RACE_SCORING_TABLE` and
    /// `RACE_MATCH_TARGET`.
    pub fn from_env() -> Result<Self, AppError> {
        let mut cfg = Self::default();

        if let Some(raw) = opt_var("RACE_DECK_VARIANT") {
            cfg.deck = match raw.trim().to_ascii_lowercase().as_str() {
                "full" => DeckVariant::Full,
                "compact" => DeckVariant::Compact,
                _ => {
                    return Err(AppError::config(format!(
                        "RACE_DECK_VARIANT must be 'full' or 'compact', got '{raw}'"
                    )))
                }
            };
        }

        if let Some(raw) = opt_var("RACE_SCORING_TABLE") {
            cfg.scoring = ScoringTable::by_name(&raw).ok_or_else(|| {
                AppError::config(format!(
                    "RACE_SCORING_TABLE must be 'standard' or 'extended', got '{raw}'"
                ))
            })?;
        }

        if let Some(target) = parse_var::<u32>("RACE_MATCH_TARGET")? {
            if target == 0 {
                return Err(AppError::config("RACE_MATCH_TARGET must be positive"));
            }
            cfg.match_target = target;
        }

        Ok(cfg)
    }
}
