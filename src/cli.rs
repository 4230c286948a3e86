mod runner;
mod types;

#[cfg(test)]
mod tests;

pub use runner::run;
pub use types::Cli;
