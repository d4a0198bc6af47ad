pub use self::{
    model::{Input, Nfa, NfaBuilder},
    sim::NfaSimulator,
};

mod model;
mod sim;
