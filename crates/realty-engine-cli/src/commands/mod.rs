pub mod capital_stack;
pub mod deal;
pub mod underwriting;
pub mod waterfall;
