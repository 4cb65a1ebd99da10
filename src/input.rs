/// Mouse buttons and modifier keys held during an interaction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    pub lmb: bool,
    pub mmb: bool,
    pub rmb: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Navigation style. Examine orbits around the interest point; Fly and Walk
/// turn the camera in place and move the interest point along.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Examine,
    Fly,
    Walk,
}

/// What a mouse drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Orbit,
    Dolly,
    Pan,
    LookAround,
}

/// Maps a button/modifier chord to a camera action. The left button is
/// consulted first, so chords that include it win over the other buttons.
pub fn classify(inputs: Inputs, mode: Mode) -> Option<Action> {
    if inputs.lmb {
        let action = if (inputs.ctrl && inputs.shift) || inputs.alt {
            match mode {
                Mode::Examine => Action::LookAround,
                _ => Action::Orbit,
            }
        } else if inputs.shift {
            Action::Dolly
        } else if inputs.ctrl {
            Action::Pan
        } else {
            match mode {
                Mode::Examine => Action::Orbit,
                _ => Action::LookAround,
            }
        };
        Some(action)
    } else if inputs.mmb {
        Some(Action::Pan)
    } else if inputs.rmb {
        Some(Action::Dolly)
    } else {
        None
    }
}
