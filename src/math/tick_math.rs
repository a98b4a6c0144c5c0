//! Tick index to sqrt price conversion.
//!
//! A tick `i` corresponds to the price `1.0001^i`, so its sqrt price is
//! `sqrt(1.0001)^i`. The forward direction is computed exactly by binary
//! exponentiation over precomputed ladders of `sqrt(1.0001)^(2^k)` (and its
//! inverse for negative ticks), each entry stored as an integer mantissa with
//! its own binary exponent. The reverse direction uses the natural log, which
//! is only float-accurate; callers that need the exact boundary should verify
//! with [`sqrt_price_from_tick`].

use std::sync::LazyLock;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};

use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{bit_shift, euclidean_division, fixed_point_mul, FixedPoint};
use crate::MAX_TICK;

// sqrt(1.0001)^(2^k) for k in 0..20, as (mantissa, binary exponent).
const POSITIVE_LADDER: [(u128, i32); 20] = [
    (38687560557337355742483221, -85),
    (38689494983725479307861971, -85),
    (38693364126677775184793561, -85),
    (38701103573421987005215721, -85),
    (38716587111352494729706462, -85),
    (38747572773653928660613512, -85),
    (38809618513447185627569983, -85),
    (38934008210058939100663682, -85),
    (39183984934869404935943141, -85),
    (39688763633815974521145659, -85),
    (40717912888646086984030507, -85),
    (42856962434838368098529959, -85),
    (47478079282778087338933597, -85),
    (29134438707490415855866100, -84),
    (43882733799120415566608322, -84),
    (49778031622173924435819796, -83),
    (32025492072892644517427309, -80),
    (53023938993515524338629870, -76),
    (36338278329035183585718600, -66),
    (34133361681864713959105863, -47),
];

// sqrt(1.0001)^-(2^k) for k in 0..20.
const NEGATIVE_LADDER: [(u128, i32); 20] = [
    (19341845997356488514015570, -84),
    (2417609866154190654524678, -81),
    (38677889876083546261210550, -85),
    (38670155071614559132217310, -85),
    (19327345051392939314248854, -84),
    (19311889358453304431405214, -84),
    (77124060166079386301517011, -86),
    (38438828813936263312862610, -85),
    (76387211720013513967242610, -86),
    (75415686436335201065707301, -86),
    (73509547540888574991368714, -86),
    (17460146398643019245576278, -84),
    (126085780994910985395717054, -87),
    (102735988268212419722671870, -87),
    (68208042073114503830679361, -87),
    (60130046442422405275353178, -88),
    (11682706336100247487260846, -88),
    (56449132412055094618915006, -95),
    (20592303012757789234393034, -103),
    (1370156647050591448120178, -118),
];

static POSITIVE_TICK_LADDER: LazyLock<[FixedPoint; 20]> =
    LazyLock::new(|| POSITIVE_LADDER.map(|(v, offset)| FixedPoint::new(BigInt::from(v), offset)));

static NEGATIVE_TICK_LADDER: LazyLock<[FixedPoint; 20]> =
    LazyLock::new(|| NEGATIVE_LADDER.map(|(v, offset)| FixedPoint::new(BigInt::from(v), offset)));

/// Computes the x80 sqrt price at a tick, exactly.
///
/// Errors with [`StateError::TickOutOfBounds`] when `|tick|` exceeds
/// [`MAX_TICK`].
pub fn sqrt_price_from_tick(tick: i32) -> Result<BigInt, Error> {
    if tick.unsigned_abs() > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds.into());
    }
    let ladder: &[FixedPoint; 20] = if tick >= 0 {
        &POSITIVE_TICK_LADDER
    } else {
        &NEGATIVE_TICK_LADDER
    };

    let mut product = FixedPoint::new(BigInt::one(), 0);
    let mut exponent = i64::from(tick.unsigned_abs());
    let mut rung = 0usize;
    while exponent != 0 {
        let (halved, remainder) = euclidean_division(exponent, 2)?;
        if remainder == 1 {
            product = fixed_point_mul(&product, &ladder[rung]);
        }
        exponent = halved;
        rung += 1;
    }

    // Rescale the exact product to the x80 grid, flooring.
    Ok(bit_shift(&product.v, -80 - product.offset))
}

/// Approximates the tick whose sqrt price is closest below `sqrt_price`, then
/// snaps it to the tick spacing grid.
///
/// Float based; accurate to within a tick for prices away from the exact tick
/// boundaries.
pub fn tick_from_sqrt_price(sqrt_price: &BigInt, tick_spacing: i32) -> Result<i32, Error> {
    if !sqrt_price.is_positive() {
        return Err(StateError::PriceNotPositive.into());
    }
    if tick_spacing <= 0 {
        return Err(StateError::TickSpacingNotPositive.into());
    }

    let ratio = sqrt_price
        .to_f64()
        .ok_or(MathError::Unrepresentable)?
        / 2f64.powi(80);
    // price = ratio^2 and tick = log_1.0001(price), so 2/ln(1.0001) ~ 20000.
    let tick = (20_000.0 * ratio.ln()).floor();
    if !tick.is_finite() || tick.abs() > f64::from(MAX_TICK) {
        return Err(StateError::TickOutOfBounds.into());
    }

    Ok(nearest_usable_tick(tick as i32, tick_spacing))
}

/// Rounds a tick down to the nearest multiple of the spacing.
///
/// `tick_spacing` must be positive.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing) * tick_spacing
}
