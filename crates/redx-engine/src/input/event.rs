/// Event record yielded by an event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user or the environment asked the program to quit.
    Quit,

    /// Any other platform event. Carried only for diagnostics.
    Other { kind: &'static str },
}

impl Event {
    #[inline]
    pub const fn other(kind: &'static str) -> Self {
        Event::Other { kind }
    }
}
