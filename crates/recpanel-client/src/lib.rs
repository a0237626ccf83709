pub mod decode;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod transport;

pub use dispatch::{dispatch, execute, BackgroundDispatcher};
pub use error::{ClientError, Result};
pub use http::{HttpTransport, TransportOptions};
pub use transport::{RawResponse, Transport};
