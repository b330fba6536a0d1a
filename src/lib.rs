pub use error::Error;
pub use mono_deque::MonoDeque;
pub use profit::{best_profits, max_bounded_profit, profits_from_json, Profit};
pub use ring_deque::{End, Iter, RingDeque};

mod error;
pub mod index;
mod mono_deque;
mod profit;
pub mod replay;
mod ring_deque;
