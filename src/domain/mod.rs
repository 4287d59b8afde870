mod friend;
mod ledger;
mod money;
mod sort;
mod split;

pub use friend::*;
pub use ledger::*;
pub use money::*;
pub use sort::*;
pub use split::*;
