// Draft bookkeeping: positions, roster fill counters, and the session.

pub mod position;
pub mod roster;
pub mod state;
