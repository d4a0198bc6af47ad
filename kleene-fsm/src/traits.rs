use crate::Symbol;

/// Finite-state machine that can hand out a stepwise [`Simulate`]r.
pub trait Simulatable {
    type Simulator<'a>: Simulate
    where
        Self: 'a;

    /// Creates a simulator positioned at the start configuration of the machine.
    fn to_simulator(&self) -> Self::Simulator<'_>;

    /// Runs the machine over the whole `input` and returns whether it accepts.
    fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.to_simulator().run(input)
    }
}

pub trait Simulate {
    /// Returns whether the finite-state machine accepts in its current configuration.
    fn is_accepting(&self) -> bool;

    /// Feeds a single symbol to the finite-state machine and returns whether it has reached an
    /// accepting configuration.
    fn feed(&mut self, input: Symbol) -> bool;

    /// Simulates the finite-state machine over the entire input and returns whether it accepts.
    ///
    /// Every symbol is consumed, even after the machine can no longer accept.
    fn run<I>(mut self, input: I) -> bool
    where
        Self: Sized,
        I: IntoIterator<Item = Symbol>,
    {
        let accept = self.is_accepting();
        input.into_iter().map(|c| self.feed(c)).last().unwrap_or(accept)
    }
}
