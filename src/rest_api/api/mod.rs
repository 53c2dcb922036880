mod predict;
pub use predict::*;

mod predictions;
pub use predictions::*;

mod session;
pub use session::*;

mod upload;
pub use upload::*;
