use crate::core::errors::CircuitError;
use crate::core::types::{ModuleKind, ModuleName, BROADCASTER, CONJUNCTION_MARKER, FLIP_FLOP_MARKER};

/// Separator between a module and its destinations
pub const ARROW: &str = "->";

/// One parsed `<prefixed-name> -> <dest>, <dest>, ...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// 1-based line number the declaration came from
    pub line: usize,
    /// Canonical name with the type prefix stripped
    pub name: ModuleName,
    pub kind: ModuleKind,
    /// Destination names in declaration order, taken verbatim
    pub destinations: Vec<ModuleName>,
}

impl Declaration {
    /// Parse a single declaration line
    pub fn parse(text: &str, line: usize) -> Result<Self, CircuitError> {
        let (source, targets) = text
            .split_once(ARROW)
            .ok_or(CircuitError::MissingArrow { line })?;

        let (kind, name) = Self::classify(source.trim(), line)?;

        let targets = targets.trim();
        if targets.is_empty() {
            return Err(CircuitError::EmptyDestinations { line });
        }

        let destinations = targets
            .split(',')
            .map(str::trim)
            .map(|dest| {
                if dest.is_empty() {
                    Err(CircuitError::EmptyDestination { line })
                } else {
                    Ok(dest.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            line,
            name,
            kind,
            destinations,
        })
    }

    /// Split a source token into its kind and canonical name
    fn classify(source: &str, line: usize) -> Result<(ModuleKind, ModuleName), CircuitError> {
        if source.is_empty() {
            return Err(CircuitError::EmptyName { line });
        }
        if source == BROADCASTER {
            return Ok((ModuleKind::Broadcaster, source.to_string()));
        }

        let (kind, name) = if let Some(name) = source.strip_prefix(FLIP_FLOP_MARKER) {
            (ModuleKind::FlipFlop, name)
        } else if let Some(name) = source.strip_prefix(CONJUNCTION_MARKER) {
            (ModuleKind::Conjunction, name)
        } else {
            return Err(CircuitError::UnknownModuleType {
                line,
                name: source.to_string(),
            });
        };

        if name.is_empty() {
            return Err(CircuitError::EmptyName { line });
        }
        Ok((kind, name.to_string()))
    }
}
