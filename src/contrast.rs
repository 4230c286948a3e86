mod histogram;

#[cfg(test)]
mod tests;

pub use histogram::{ContrastSettings, HistogramStats};
