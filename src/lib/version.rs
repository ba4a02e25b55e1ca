pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nRothermel (1972) / Albini (1976) surface spread",
    "\nNFDRS 1978 moisture and fire danger indices (Cohen & Deeming, 1985)"
);
