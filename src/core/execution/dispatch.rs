use crate::core::state::CircuitState;
use crate::core::types::{ModuleKind, Pulse, PulseEvent};

/// Deliver one pulse to its target and return the pulse the target emits
///
/// The emitted pulse goes to every destination of the target. `None`
/// means the target stays silent: a flip-flop hit by a high pulse, a sink,
/// or a name with no state table entry.
pub fn dispatch(kind: ModuleKind, state: &mut CircuitState, event: &PulseEvent) -> Option<Pulse> {
    match kind {
        ModuleKind::Broadcaster => Some(event.pulse),
        ModuleKind::FlipFlop => match event.pulse {
            Pulse::High => None,
            Pulse::Low => state
                .toggle(&event.target)
                .map(|on| if on { Pulse::High } else { Pulse::Low }),
        },
        ModuleKind::Conjunction => {
            let memory = state.remember(&event.target, &event.source, event.pulse)?;
            if memory.values().all(|pulse| pulse.is_high()) {
                Some(Pulse::Low)
            } else {
                Some(Pulse::High)
            }
        }
        ModuleKind::Sink => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::circuit::Circuit;

    fn state() -> CircuitState {
        let circuit: Circuit = "broadcaster -> a, b\n%a -> con\n%b -> con\n&con -> rx"
            .parse()
            .unwrap();
        circuit.initial_state()
    }

    #[test]
    fn test_broadcaster_forwards_unchanged() {
        let mut state = state();
        for pulse in [Pulse::Low, Pulse::High] {
            let event = PulseEvent::new("button", pulse, "broadcaster");
            assert_eq!(dispatch(ModuleKind::Broadcaster, &mut state, &event), Some(pulse));
        }
        assert!(state.is_initial());
    }

    #[test]
    fn test_flip_flop_ignores_high() {
        let mut state = state();
        let event = PulseEvent::new("broadcaster", Pulse::High, "a");
        assert_eq!(dispatch(ModuleKind::FlipFlop, &mut state, &event), None);
        assert_eq!(state.is_on("a"), Some(false));
    }

    #[test]
    fn test_flip_flop_toggle_is_involutive() {
        let mut state = state();
        let event = PulseEvent::new("broadcaster", Pulse::Low, "a");

        assert_eq!(dispatch(ModuleKind::FlipFlop, &mut state, &event), Some(Pulse::High));
        assert_eq!(state.is_on("a"), Some(true));
        assert_eq!(dispatch(ModuleKind::FlipFlop, &mut state, &event), Some(Pulse::Low));
        assert_eq!(state.is_on("a"), Some(false));
    }

    #[test]
    fn test_conjunction_needs_every_input_high() {
        let mut state = state();

        let from_a = PulseEvent::new("a", Pulse::High, "con");
        assert_eq!(dispatch(ModuleKind::Conjunction, &mut state, &from_a), Some(Pulse::High));

        let from_b = PulseEvent::new("b", Pulse::High, "con");
        assert_eq!(dispatch(ModuleKind::Conjunction, &mut state, &from_b), Some(Pulse::Low));

        let a_drops = PulseEvent::new("a", Pulse::Low, "con");
        assert_eq!(dispatch(ModuleKind::Conjunction, &mut state, &a_drops), Some(Pulse::High));
    }

    #[test]
    fn test_sink_is_silent() {
        let mut state = state();
        let event = PulseEvent::new("con", Pulse::Low, "rx");
        assert_eq!(dispatch(ModuleKind::Sink, &mut state, &event), None);
    }
}
