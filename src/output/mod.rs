// Terminal rendering for pipeline artifacts.

pub mod terminal;
