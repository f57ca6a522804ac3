use serde::{Deserialize, Serialize};

/// Canonical module name as it appears in the declaration list
pub type ModuleName = String;

/// Name of the root module that receives every button press
pub const BROADCASTER: &str = "broadcaster";

/// Virtual source of the pulse injected on each press
pub const BUTTON: &str = "button";

/// Prefix marking a flip-flop declaration
pub const FLIP_FLOP_MARKER: char = '%';

/// Prefix marking a conjunction declaration
pub const CONJUNCTION_MARKER: char = '&';

/// Signal level carried by a pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pulse {
    Low,
    High,
}

impl Pulse {
    pub fn is_high(self) -> bool {
        self == Pulse::High
    }
}

impl std::fmt::Display for Pulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pulse::Low => write!(f, "low"),
            Pulse::High => write!(f, "high"),
        }
    }
}

/// Behaviour of a module when it receives a pulse
///
/// The set is closed: every declared module is one of the first three,
/// every undeclared destination is a `Sink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    /// Forwards every pulse unchanged
    Broadcaster,
    /// Toggles on low pulses, ignores high pulses
    FlipFlop,
    /// Remembers the last pulse from each input, emits low when all are high
    Conjunction,
    /// Output terminal with no behaviour
    Sink,
}

impl ModuleKind {
    /// Get the declaration prefix for this kind, if it has one
    pub fn marker(&self) -> Option<char> {
        match self {
            ModuleKind::FlipFlop => Some(FLIP_FLOP_MARKER),
            ModuleKind::Conjunction => Some(CONJUNCTION_MARKER),
            ModuleKind::Broadcaster | ModuleKind::Sink => None,
        }
    }
}

/// A pulse in flight from one module to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseEvent {
    pub source: ModuleName,
    pub pulse: Pulse,
    pub target: ModuleName,
}

impl PulseEvent {
    pub fn new(source: impl Into<ModuleName>, pulse: Pulse, target: impl Into<ModuleName>) -> Self {
        Self {
            source: source.into(),
            pulse,
            target: target.into(),
        }
    }

    /// The low pulse a button press sends to the broadcaster
    pub fn button_press() -> Self {
        Self::new(BUTTON, Pulse::Low, BROADCASTER)
    }
}

impl std::fmt::Display for PulseEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.pulse, self.target)
    }
}
