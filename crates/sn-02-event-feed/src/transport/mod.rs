//! Push transport to a backend feed.

mod uplink;

pub use uplink::UplinkClient;
