pub mod codec;
pub mod conversion;
pub mod raw;

pub use codec::*;
pub use conversion::*;
pub use raw::RawResponse;
