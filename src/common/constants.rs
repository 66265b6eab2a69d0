// gas used by the batch mint transaction regardless of the batch size
pub const TX_GAS_BASE: u64 = 506_061;
// additional gas for each photo in the batch
pub const TX_GAS_PER_PHOTO: u64 = 25_687;

pub const DEFAULT_QUANTITY: u64 = 100;

// fractional digits shown for the ether amount
pub const DISPLAY_DECIMALS: u8 = 5;

// shown in place of a number while the gas price is unknown
pub const PLACEHOLDER: &str = "…";

pub const DEFAULT_RPC_ADDR: &str = "127.0.0.1:8545";
