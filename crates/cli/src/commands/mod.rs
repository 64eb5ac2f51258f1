pub mod analyze;
pub mod chain;
pub mod formats;
pub mod inspect;
pub mod util;

pub use analyze::*;
pub use chain::*;
pub use formats::*;
pub use inspect::*;
pub use util::*;
