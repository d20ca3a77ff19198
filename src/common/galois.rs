// GF(256) arithmetic over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE: u16 = 0x11d;

/// Discrete log of zero. Every consumer checks for it before adding exponents.
pub const LOG_ZERO: u8 = 255;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 256];
    log[0] = LOG_ZERO;
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        log[x as usize] = i as u8;
        exp[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    (log, exp)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

pub static LOG_TABLE: [u8; 256] = TABLES.0;

// exp[255] is the zero sentinel and is never reached through `exp`
pub static EXP_TABLE: [u8; 256] = TABLES.1;

/// Reduces a sum of two exponents below 255.
#[inline]
pub fn modnn(x: usize) -> usize {
    debug_assert!(x < 510, "Exponent sum out of range: {x}");
    if x >= 255 {
        x - 255
    } else {
        x
    }
}

#[inline]
pub fn log(x: u8) -> u8 {
    LOG_TABLE[x as usize]
}

#[inline]
pub fn exp(i: usize) -> u8 {
    EXP_TABLE[modnn(i)]
}
