// Code generated by the fp2 macros takes many arguments
#![allow(clippy::too_many_arguments)]

// Fields used to calibrate the cost of chains between elliptic products.
// All characteristics are 3 mod 4, so GF(p^2) has modulus x^2 + 1.

// 254-bit characteristic of the two-isogenies test vectors, chains of
// length 126
static THETA_254_MODULUS: [u64; 4] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xB52F88A2BBB638F2,
    0x300C882522D1C193,
];

fp2::define_fp2_from_modulus!(
    typename = Theta254,
    base_typename = Theta254Base,
    modulus = THETA_254_MODULUS,
);

// p = 327 * 2^372 - 1, 381 bits
static THETA_381_MODULUS: [u64; 6] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x146FFFFFFFFFFFFF,
];

fp2::define_fp2_from_modulus!(
    typename = Theta381,
    base_typename = Theta381Base,
    modulus = THETA_381_MODULUS,
);

// FESTA-128 characteristic, 1293 bits, chains of length 632
static FESTA_MODULUS: [u64; 21] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x43FFFFFFFFFFFFFF,
    0x9AC3245C4D7BE6B3,
    0x21D7DCD797059B7B,
    0x8F19A73E323F6569,
    0x841FED4773CFDB16,
    0x02979D50DD13D09A,
    0x01712922BAF59934,
    0xBD1C756E54F72C15,
    0xF6B3CF47C54370FE,
    0xCEC87BD4C1480F2B,
    0x11CF13E54B11406F,
    0x000000000000176C,
];

fp2::define_fp2_from_modulus!(
    typename = Festa,
    base_typename = FestaBase,
    modulus = FESTA_MODULUS,
);
