#[cfg(feature = "capital_stack")]
pub mod capital_stack;

#[cfg(feature = "waterfall")]
pub mod waterfall;
