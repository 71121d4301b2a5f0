// ============================================================================
// Limb Arithmetic
// Unsigned multi-limb multiplication and division on 32-bit digits
// ============================================================================
//
// Magnitudes are held as four little-endian base-2^32 digits so that every
// digit product fits in a u64. These are the building blocks behind
// WideInt::checked_mul and WideInt::checked_div_rem:
//
// - mul:           Knuth TAOCP Vol. 2, 4.3.1, Algorithm M
// - div_rem_small: Knuth TAOCP Vol. 2, 4.3.1, exercise 16 (one-digit divisor)
// - div_rem:       Knuth TAOCP Vol. 2, 4.3.1, Algorithm D
//
// All functions work on magnitudes only; sign handling lives in WideInt.

/// Four base-2^32 digits, least significant first.
pub(crate) type Limbs = [u32; 4];

const BASE: u64 = 1 << 32;
const MASK: u64 = 0xffff_ffff;

/// Splits a 128-bit magnitude given as two words into digits.
#[inline]
pub(crate) const fn from_words(high: u64, low: u64) -> Limbs {
    [
        (low & MASK) as u32,
        (low >> 32) as u32,
        (high & MASK) as u32,
        (high >> 32) as u32,
    ]
}

/// Joins digits back into `(high, low)` words.
#[inline]
pub(crate) const fn to_words(limbs: &Limbs) -> (u64, u64) {
    let low = limbs[0] as u64 | (limbs[1] as u64) << 32;
    let high = limbs[2] as u64 | (limbs[3] as u64) << 32;
    (high, low)
}

/// Number of significant digits (0 for zero).
#[inline]
fn significant(limbs: &Limbs) -> usize {
    let mut n = limbs.len();
    while n > 0 && limbs[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Full 256-bit product of two 128-bit magnitudes.
pub(crate) fn mul(u: &Limbs, v: &Limbs) -> [u32; 8] {
    let mut w = [0u32; 8];
    for (j, &vj) in v.iter().enumerate() {
        // M2. Zero multiplier digit contributes nothing
        if vj == 0 {
            continue;
        }
        // M3. Initialize i
        let mut k: u64 = 0;
        for (i, &ui) in u.iter().enumerate() {
            // M4. Multiply and add
            let t = ui as u64 * vj as u64 + w[i + j] as u64 + k;
            w[i + j] = (t & MASK) as u32;
            k = t >> 32;
        }
        w[j + 4] = k as u32;
    }
    w
}

/// Divides a magnitude by a single non-zero digit.
///
/// Returns `(quotient, remainder)`.
pub(crate) fn div_rem_small(u: &Limbs, divisor: u32) -> (Limbs, u32) {
    debug_assert!(divisor != 0);
    let d = divisor as u64;
    let mut q = [0u32; 4];
    let mut r: u64 = 0;
    for j in (0..4).rev() {
        let current = (r << 32) | u[j] as u64;
        q[j] = (current / d) as u32;
        r = current % d;
    }
    (q, r as u32)
}

/// Divides `u` by `v` where `v` has at least two significant digits.
///
/// Returns `(quotient, remainder)`.
pub(crate) fn div_rem(u: &Limbs, v: &Limbs) -> (Limbs, Limbs) {
    let n = significant(v);
    debug_assert!(n >= 2, "divisor must span at least two digits");
    let m = u.len();

    // D1. Normalize so the divisor's top digit has its high bit set
    let shift = v[n - 1].leading_zeros();
    let mut vn = [0u32; 4];
    for i in (1..n).rev() {
        vn[i] = (v[i] << shift) | ((v[i - 1] as u64) >> (32 - shift)) as u32;
    }
    vn[0] = v[0] << shift;

    let mut un = [0u32; 5];
    un[m] = ((u[m - 1] as u64) >> (32 - shift)) as u32;
    for i in (1..m).rev() {
        un[i] = (u[i] << shift) | ((u[i - 1] as u64) >> (32 - shift)) as u32;
    }
    un[0] = u[0] << shift;

    let top = vn[n - 1] as u64;
    let next = vn[n - 2] as u64;
    let mut q = [0u32; 4];

    // D2. Initialize j; D7. Loop on j
    for j in (0..=m - n).rev() {
        // D3. Calculate q-hat
        let numerator = ((un[j + n] as u64) << 32) | un[j + n - 1] as u64;
        let mut qhat = numerator / top;
        let mut rhat = numerator % top;
        while qhat >= BASE || qhat * next > ((rhat << 32) | un[j + n - 2] as u64) {
            qhat -= 1;
            rhat += top;
            if rhat >= BASE {
                break;
            }
        }

        // D4. Multiply and subtract
        let mut borrow: i64 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as u64;
            let t = un[i + j] as i64 - borrow - (p & MASK) as i64;
            un[i + j] = t as u32;
            borrow = (p >> 32) as i64 - (t >> 32);
        }
        let t = un[j + n] as i64 - borrow;
        un[j + n] = t as u32;

        // D5. Test remainder
        q[j] = qhat as u32;
        if t < 0 {
            // D6. Add back
            q[j] = q[j].wrapping_sub(1);
            let mut carry: u64 = 0;
            for i in 0..n {
                let s = un[i + j] as u64 + vn[i] as u64 + carry;
                un[i + j] = s as u32;
                carry = s >> 32;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u32);
        }
    }

    // D8. Unnormalize the remainder
    let mut r = [0u32; 4];
    for i in 0..n - 1 {
        r[i] = (un[i] >> shift) | ((un[i + 1] as u64) << (32 - shift)) as u32;
    }
    r[n - 1] = un[n - 1] >> shift;

    (q, r)
}
