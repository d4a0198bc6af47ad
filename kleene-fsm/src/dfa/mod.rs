pub use self::{
    complete::DEAD_STATE,
    equivalence::equivalent,
    model::{Dfa, DfaBuilder},
    sim::DfaSimulator,
    text::DfaDescription,
};

mod complete;
mod equivalence;
mod minimize;
mod model;
mod sim;
mod text;
