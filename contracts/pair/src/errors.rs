use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InsufficientLiquidity = 102,
    InsufficientInputAmount = 103,
    InsufficientOutputAmount = 104,
    InvalidK = 105,
    Locked = 106,
    Overflow = 107,
    InsufficientLiquidityMinted = 108,
    InsufficientLiquidityBurned = 109,
    InvalidTo = 110,
    InsufficientBalance = 111,
    InsufficientAllowance = 112,
    NegativeAmount = 113,
    Expired = 114,
}
