//! Per-unit reader workflow states driven by the host API.

/// Reader workflow state. Discriminants are the raw values exchanged with
/// the game.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkflowState {
    #[default]
    Step = 0,
    Sleep = 1,
    Start = 2,
    Init = 3,
    Ready = 4,
    GetUserId = 5,
    Active = 6,
    Eject = 7,
    EjectCheck = 8,
    End = 9,
    CloseEject = 10,
    CloseEjectCheck = 11,
    CloseEnd = 12,
    ErrGetUid = -2,
}

/// Outcome of a workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: WorkflowState,
    /// The request ejects any held card.
    pub release_card: bool,
}

impl WorkflowState {
    pub fn as_raw(self) -> i8 {
        self as i8
    }

    pub fn from_raw(raw: i8) -> Option<Self> {
        use WorkflowState::*;
        Some(match raw {
            0 => Step,
            1 => Sleep,
            2 => Start,
            3 => Init,
            4 => Ready,
            5 => GetUserId,
            6 => Active,
            7 => Eject,
            8 => EjectCheck,
            9 => End,
            10 => CloseEject,
            11 => CloseEjectCheck,
            12 => CloseEnd,
            -2 => ErrGetUid,
            _ => return None,
        })
    }

    /// State reached when the host requests `request` while in `self`.
    ///
    /// `card_in` tells whether the unit currently holds a card and
    /// `step_sleeps` selects readers that go straight to sleep on STEP.
    /// Requests without a rule leave the state unchanged.
    pub fn request(self, request: WorkflowState, card_in: bool, step_sleeps: bool) -> Transition {
        use WorkflowState::*;
        let mut release_card = false;
        let state = match request {
            Step if step_sleeps => Sleep,
            Step => Step,
            Sleep => Sleep,
            Init => Ready,
            Start if card_in => Active,
            Start => Ready,
            Eject => {
                release_card = true;
                self
            }
            CloseEject if card_in => EjectCheck,
            CloseEject => Sleep,
            CloseEnd => Sleep,
            GetUserId => GetUserId,
            _ => self,
        };
        Transition {
            state,
            release_card,
        }
    }
}
