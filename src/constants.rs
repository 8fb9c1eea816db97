pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;
