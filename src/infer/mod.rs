pub mod deal;
pub mod dispatch;
pub mod exact;
pub mod marginals;
pub mod sample;
